// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module contains an implementation of the [ECDSA signature scheme](https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm) over the [secp256r1 NIST-P1 curve](https://www.secg.org/SEC2-Ver-1.0.pdf).
//!
//! Signatures are computed over the SHA-256 digest of a message, which is computed by the caller with
//! [KeyPair::payload]. Nonces are derived deterministically as in RFC 6979.
//!
//! # Example
//! ```rust
//! # use fastbench::secp256r1::*;
//! # use fastbench::traits::{KeyPair, VerifyingKey};
//! use rand::thread_rng;
//! let kp = Secp256r1KeyPair::generate(&mut thread_rng()).unwrap();
//! let digest = Secp256r1KeyPair::payload(b"Hello, world!");
//! let signature = kp.try_sign(&digest).unwrap();
//! assert!(kp.public().verify(&digest, &signature).is_ok());
//! ```

use crate::{
    error::{BenchError, BenchResult},
    hash::{HashFunction, Sha256},
    traits::{AllowedRng, KeyPair, ToFromBytes, VerifyingKey},
};
use base64ct::{Base64, Encoding};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::Signature as ExternalSignature;
use p256::ecdsa::SigningKey as ExternalSecretKey;
use p256::ecdsa::VerifyingKey as ExternalPublicKey;
use p256::FieldBytes;
use std::fmt::{self, Debug, Display};
use tracing::trace;

pub const PUBLIC_KEY_SIZE: usize = 33;
pub const SIGNATURE_SIZE: usize = 64;
pub const DIGEST_SIZE: usize = 32;

/// Number of secret key candidates drawn before key generation gives up. A uniformly random
/// candidate is rejected with probability below 2^-32.
pub const MAX_KEYGEN_ATTEMPTS: usize = 8;

/// Secp256r1 public key, cached in compressed SEC1 form.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256r1PublicKey {
    pub pubkey: ExternalPublicKey,
    bytes: [u8; PUBLIC_KEY_SIZE],
}

/// Secp256r1 key pair.
pub struct Secp256r1KeyPair {
    public: Secp256r1PublicKey,
    secret: ExternalSecretKey,
}

/// Secp256r1 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256r1Signature {
    pub sig: ExternalSignature,
    bytes: [u8; SIGNATURE_SIZE],
}

fn check_digest_length(payload: &[u8]) -> BenchResult<()> {
    if payload.len() != DIGEST_SIZE {
        return Err(BenchError::InputLengthWrong(DIGEST_SIZE));
    }
    Ok(())
}

//
// Implementation of [Secp256r1PublicKey].
//

impl From<ExternalPublicKey> for Secp256r1PublicKey {
    fn from(pubkey: ExternalPublicKey) -> Self {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(pubkey.to_encoded_point(true).as_bytes());
        Secp256r1PublicKey { pubkey, bytes }
    }
}

impl ToFromBytes for Secp256r1PublicKey {
    fn from_bytes(bytes: &[u8]) -> BenchResult<Self> {
        ExternalPublicKey::from_sec1_bytes(bytes)
            .map(Secp256r1PublicKey::from)
            .map_err(|_| BenchError::InputLengthWrong(PUBLIC_KEY_SIZE))
    }
}

impl AsRef<[u8]> for Secp256r1PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Debug for Secp256r1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

impl Display for Secp256r1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

impl VerifyingKey for Secp256r1PublicKey {
    type Sig = Secp256r1Signature;
    const LENGTH: usize = PUBLIC_KEY_SIZE;

    fn verify(&self, payload: &[u8], signature: &Secp256r1Signature) -> BenchResult<()> {
        check_digest_length(payload)?;
        self.pubkey
            .verify_prehash(payload, &signature.sig)
            .map_err(|_| BenchError::InvalidSignature)
    }
}

//
// Implementation of [Secp256r1Signature].
//

impl From<ExternalSignature> for Secp256r1Signature {
    fn from(sig: ExternalSignature) -> Self {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(&sig.to_bytes());
        Secp256r1Signature { sig, bytes }
    }
}

impl ToFromBytes for Secp256r1Signature {
    fn from_bytes(bytes: &[u8]) -> BenchResult<Self> {
        ExternalSignature::from_slice(bytes)
            .map(Secp256r1Signature::from)
            .map_err(|_| BenchError::InputLengthWrong(SIGNATURE_SIZE))
    }
}

impl AsRef<[u8]> for Secp256r1Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Debug for Secp256r1Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Base64::encode_string(self.as_ref()))
    }
}

//
// Implementation of [Secp256r1KeyPair].
//

impl From<ExternalSecretKey> for Secp256r1KeyPair {
    fn from(secret: ExternalSecretKey) -> Self {
        Secp256r1KeyPair {
            public: Secp256r1PublicKey::from(*secret.verifying_key()),
            secret,
        }
    }
}

impl KeyPair for Secp256r1KeyPair {
    type PubKey = Secp256r1PublicKey;
    type Sig = Secp256r1Signature;

    const NAME: &'static str = "ECDSAP256";

    /// The SHA-256 digest of the message.
    fn payload(message: &[u8]) -> Vec<u8> {
        Sha256::digest(message).to_vec()
    }

    fn public(&'_ self) -> &'_ Self::PubKey {
        &self.public
    }

    /// Rejection sampling over the scalar field. Zero and values above the group order are
    /// redrawn, so a source which keeps returning such values fails instead of looping forever.
    fn generate<R: AllowedRng>(rng: &mut R) -> BenchResult<Self> {
        let mut candidate = FieldBytes::default();
        for attempt in 0..MAX_KEYGEN_ATTEMPTS {
            rng.try_fill_bytes(&mut candidate)?;
            match ExternalSecretKey::from_bytes(&candidate) {
                Ok(secret) => return Ok(secret.into()),
                Err(_) => trace!(attempt, "Rejected secp256r1 secret key candidate"),
            }
        }
        Err(BenchError::KeyGeneration(format!(
            "no valid secp256r1 scalar after {MAX_KEYGEN_ATTEMPTS} attempts"
        )))
    }

    fn try_sign(&self, payload: &[u8]) -> BenchResult<Secp256r1Signature> {
        check_digest_length(payload)?;
        PrehashSigner::<ExternalSignature>::sign_prehash(&self.secret, payload)
            .map(Secp256r1Signature::from)
            .map_err(|e| BenchError::Signing(e.to_string()))
    }
}

impl Debug for Secp256r1KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The private part is not printed.
        write!(f, "Secp256r1KeyPair({:?})", self.public)
    }
}
