// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Inputs of the timed operations. Every fixture is built once, before the timer is reset, and is
//! only read afterwards.

use crate::error::BenchResult;
use crate::hash::{Digest, HashFunction};
use crate::traits::{AllowedRng, KeyPair, VerifyingKey};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// A key pair together with the payload it signs.
pub struct SignatureFixture<K: KeyPair> {
    pub message: &'static [u8],
    /// What `K` actually signs for `message`, see [KeyPair::payload].
    pub payload: Vec<u8>,
    pub keypair: K,
}

impl<K: KeyPair> SignatureFixture<K> {
    pub fn build<R: AllowedRng>(message: &'static [u8], rng: &mut R) -> BenchResult<Self> {
        let keypair = K::generate(rng)?;
        let payload = K::payload(message);
        debug!(scheme = K::NAME, payload_len = payload.len(), "Built signing fixture");
        Ok(Self {
            message,
            payload,
            keypair,
        })
    }

    pub fn sign(&self) -> BenchResult<K::Sig> {
        self.keypair.try_sign(&self.payload)
    }
}

/// A public key and one valid signature over the payload.
pub struct VerificationFixture<K: KeyPair> {
    pub message: &'static [u8],
    pub payload: Vec<u8>,
    pub public: K::PubKey,
    pub signature: K::Sig,
}

impl<K: KeyPair> VerificationFixture<K> {
    /// Generate a key pair and sign the payload once. The signature is checked before it is
    /// returned, so a broken key pair fails here and not in the timed loop.
    pub fn build<R: AllowedRng>(message: &'static [u8], rng: &mut R) -> BenchResult<Self> {
        let signing = SignatureFixture::<K>::build(message, rng)?;
        let signature = signing.sign()?;
        let public = signing.keypair.public().clone();
        public.verify(&signing.payload, &signature)?;
        debug!(scheme = K::NAME, "Built verification fixture");
        Ok(Self {
            message,
            payload: signing.payload,
            public,
            signature,
        })
    }

    pub fn verify(&self) -> BenchResult<()> {
        self.public.verify(&self.payload, &self.signature)
    }
}

/// The first link of a hash chain, `H(message)`.
pub struct HashChainFixture<H: HashFunction<DIGEST_LEN>, const DIGEST_LEN: usize> {
    pub initial: Digest<DIGEST_LEN>,
    _hash: PhantomData<H>,
}

impl<H: HashFunction<DIGEST_LEN>, const DIGEST_LEN: usize> HashChainFixture<H, DIGEST_LEN> {
    pub fn build(message: &[u8]) -> Self {
        let initial = H::digest(message);
        debug!(hash = H::NAME, ?initial, "Built hash chain fixture");
        Self {
            initial,
            _hash: PhantomData,
        }
    }

    /// One link of the chain: `H_i = H(H_{i-1})`.
    pub fn step(previous: &Digest<DIGEST_LEN>) -> Digest<DIGEST_LEN> {
        previous.rehash::<H>()
    }
}

impl<H: HashFunction<DIGEST_LEN>, const DIGEST_LEN: usize> fmt::Debug
    for HashChainFixture<H, DIGEST_LEN>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashChainFixture({}, {:?})", H::NAME, self.initial)
    }
}
