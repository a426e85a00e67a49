// Copyright (c) 2021, Facebook, Inc. and its affiliates
// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
use rand::rngs::{OsRng, StdRng, ThreadRng};
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;

use crate::error::BenchResult;
use crate::unsecure::rng::ConstantRng;

/// Trait impl'd by concrete types that represent digital cryptographic material
/// (keys and signatures) which can be written to the "wire" as a byte string.
pub trait ToFromBytes: AsRef<[u8]> + Debug + Sized {
    /// Parse a key from its byte representation
    fn from_bytes(bytes: &[u8]) -> BenchResult<Self>;

    /// Borrow a byte slice representing the serialized form of this key
    fn as_bytes(&self) -> &[u8] {
        self.as_ref()
    }
}

/// Trait impl'd by public keys in asymmetric cryptography.
///
/// The payload given to [VerifyingKey::verify] is the value returned by [KeyPair::payload] for the
/// message, i.e. the message itself or its digest for schemes which sign prehashed input.
pub trait VerifyingKey: ToFromBytes + Clone + Eq + Send + Sync + 'static {
    type Sig: ToFromBytes + Clone + Eq + Send + Sync + 'static;
    const LENGTH: usize;

    /// Verify a signature over the given payload.
    fn verify(&self, payload: &[u8], signature: &Self::Sig) -> BenchResult<()>;
}

/// Trait impl'd by a public / private key pair in asymmetric cryptography.
pub trait KeyPair: Sized + Send + Sync + 'static {
    type PubKey: VerifyingKey<Sig = Self::Sig>;
    type Sig: ToFromBytes + Clone + Eq + Send + Sync + 'static;

    /// Human readable name of the scheme.
    const NAME: &'static str;

    /// Bytes handed to [KeyPair::try_sign] and [VerifyingKey::verify] for the given message.
    fn payload(message: &[u8]) -> Vec<u8> {
        message.to_vec()
    }

    /// Get the public key.
    fn public(&'_ self) -> &'_ Self::PubKey;

    /// Generate a new keypair using the given RNG.
    fn generate<R: AllowedRng>(rng: &mut R) -> BenchResult<Self>;

    /// Sign the given payload.
    fn try_sign(&self, payload: &[u8]) -> BenchResult<Self::Sig>;
}

/// Trait for all RNGs a keypair may be generated from.
pub trait AllowedRng: CryptoRng + RngCore {}

// StdRng uses ChaCha12 (see https://github.com/rust-random/rand/pull/1017) in rand 0.8.
impl AllowedRng for StdRng {}
impl AllowedRng for OsRng {}
impl AllowedRng for ThreadRng {}
impl AllowedRng for ConstantRng {}
