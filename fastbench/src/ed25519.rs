// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module contains an implementation of the [Ed25519](https://en.wikipedia.org/wiki/EdDSA#Ed25519) signature scheme.
//!
//! Messages can be signed and the signature can be verified again:
//! ```rust
//! # use fastbench::ed25519::*;
//! # use fastbench::traits::{KeyPair, VerifyingKey};
//! use rand::thread_rng;
//! let kp = Ed25519KeyPair::generate(&mut thread_rng()).unwrap();
//! let message: &[u8] = b"Hello, world!";
//! let signature = kp.try_sign(message).unwrap();
//! assert!(kp.public().verify(message, &signature).is_ok());
//! ```
use crate::{
    error::{BenchError, BenchResult},
    traits::{AllowedRng, KeyPair, ToFromBytes, VerifyingKey},
};
use base64ct::{Base64, Encoding};
use std::fmt::{self, Debug, Display};
use tracing::trace;

/// The length of a private key in bytes.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;

/// The length of a public key in bytes.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// The length of a signature in bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Ed25519 public key.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(pub ed25519_consensus::VerificationKey);

/// Ed25519 key pair.
pub struct Ed25519KeyPair {
    public: Ed25519PublicKey,
    private: ed25519_consensus::SigningKey,
}

/// Ed25519 signature.
#[derive(Clone)]
pub struct Ed25519Signature {
    pub sig: ed25519_consensus::Signature,
    // Helps implementing AsRef<[u8]>.
    bytes: [u8; ED25519_SIGNATURE_LENGTH],
}

//
// Implementation of [Ed25519KeyPair].
//

impl From<ed25519_consensus::SigningKey> for Ed25519KeyPair {
    fn from(private: ed25519_consensus::SigningKey) -> Self {
        Ed25519KeyPair {
            public: Ed25519PublicKey(private.verification_key()),
            private,
        }
    }
}

impl Ed25519KeyPair {
    /// The 32 byte seed the key pair was derived from.
    pub fn seed(&self) -> &[u8] {
        self.private.as_ref()
    }
}

impl KeyPair for Ed25519KeyPair {
    type PubKey = Ed25519PublicKey;
    type Sig = Ed25519Signature;

    const NAME: &'static str = "Ed25519";

    fn public(&'_ self) -> &'_ Self::PubKey {
        &self.public
    }

    fn generate<R: AllowedRng>(rng: &mut R) -> BenchResult<Self> {
        let mut seed = [0u8; ED25519_PRIVATE_KEY_LENGTH];
        rng.try_fill_bytes(&mut seed)?;
        trace!("Drew Ed25519 seed");
        Ok(ed25519_consensus::SigningKey::from(seed).into())
    }

    fn try_sign(&self, payload: &[u8]) -> BenchResult<Ed25519Signature> {
        Ok(self.private.sign(payload).into())
    }
}

impl Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The private part is not printed.
        write!(f, "Ed25519KeyPair({:?})", self.public)
    }
}

//
// Implementation of [Ed25519Signature].
//

impl From<ed25519_consensus::Signature> for Ed25519Signature {
    fn from(sig: ed25519_consensus::Signature) -> Self {
        Ed25519Signature {
            bytes: sig.to_bytes(),
            sig,
        }
    }
}

impl PartialEq for Ed25519Signature {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl Eq for Ed25519Signature {}

impl ToFromBytes for Ed25519Signature {
    fn from_bytes(bytes: &[u8]) -> BenchResult<Self> {
        ed25519_consensus::Signature::try_from(bytes)
            .map(Ed25519Signature::from)
            .map_err(|_| BenchError::InputLengthWrong(ED25519_SIGNATURE_LENGTH))
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

impl Display for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

//
// Implementation of [Ed25519PublicKey].
//

impl ToFromBytes for Ed25519PublicKey {
    fn from_bytes(bytes: &[u8]) -> BenchResult<Self> {
        ed25519_consensus::VerificationKey::try_from(bytes)
            .map(Ed25519PublicKey)
            .map_err(|_| BenchError::InputLengthWrong(ED25519_PUBLIC_KEY_LENGTH))
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

impl Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

impl VerifyingKey for Ed25519PublicKey {
    type Sig = Ed25519Signature;
    const LENGTH: usize = ED25519_PUBLIC_KEY_LENGTH;

    // Compliant to ZIP215: https://zips.z.cash/protocol/protocol.pdf#concreteed25519
    fn verify(&self, payload: &[u8], signature: &Ed25519Signature) -> BenchResult<()> {
        self.0.verify(&signature.sig, payload).map_err(Into::into)
    }
}
