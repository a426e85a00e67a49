// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module contains a hash function abstraction together with the two hash functions the
//! catalog benchmarks: [Sha256] and [Blake2b256].
//!
//! ```rust
//! # use fastbench::hash::*;
//! let digest = Sha256::digest(b"IOTA");
//! let next = digest.rehash::<Sha256>();
//! assert_ne!(digest, next);
//! ```

use base64ct::{Base64, Encoding};
use std::fmt;

/// Represents a digest of `DIGEST_LEN` bytes.
#[derive(Hash, PartialEq, Eq, Clone, Ord, PartialOrd, Copy)]
pub struct Digest<const DIGEST_LEN: usize> {
    pub digest: [u8; DIGEST_LEN],
}

impl<const DIGEST_LEN: usize> Digest<DIGEST_LEN> {
    /// Create a new digest containing the given bytes
    pub fn new(digest: [u8; DIGEST_LEN]) -> Self {
        Digest { digest }
    }

    /// Copy the digest into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.digest.to_vec()
    }

    /// The size of this digest in bytes.
    pub fn size(&self) -> usize {
        DIGEST_LEN
    }

    /// Hash this digest again with the given hash function.
    pub fn rehash<H: HashFunction<DIGEST_LEN>>(&self) -> Self {
        H::digest(self.digest)
    }
}

impl<const DIGEST_LEN: usize> fmt::Debug for Digest<DIGEST_LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", Base64::encode_string(&self.digest))
    }
}

impl<const DIGEST_LEN: usize> fmt::Display for Digest<DIGEST_LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let encoded = Base64::encode_string(&self.digest);
        write!(f, "{}", encoded.get(0..DIGEST_LEN).unwrap_or(&encoded))
    }
}

impl<const DIGEST_LEN: usize> AsRef<[u8]> for Digest<DIGEST_LEN> {
    fn as_ref(&self) -> &[u8] {
        self.digest.as_ref()
    }
}

impl<const DIGEST_LEN: usize> From<Digest<DIGEST_LEN>> for [u8; DIGEST_LEN] {
    fn from(digest: Digest<DIGEST_LEN>) -> Self {
        digest.digest
    }
}

/// Trait implemented by hash functions providing a output of fixed length
pub trait HashFunction<const DIGEST_LENGTH: usize>: Default {
    /// The length of this hash functions digests in bytes.
    const OUTPUT_SIZE: usize = DIGEST_LENGTH;

    /// Name used for reporting.
    const NAME: &'static str;

    /// Create a new hash function of the given type
    fn new() -> Self {
        Self::default()
    }

    /// Process the given data, and update the internal of the hash function.
    fn update<Data: AsRef<[u8]>>(&mut self, data: Data);

    /// Retrieve result and consume hash function.
    fn finalize(self) -> Digest<DIGEST_LENGTH>;

    /// Compute the digest of the given data and consume the hash function.
    fn digest<Data: AsRef<[u8]>>(data: Data) -> Digest<DIGEST_LENGTH> {
        let mut h = Self::default();
        h.update(data);
        h.finalize()
    }
}

/// This wraps a `digest::Digest` as a `fastbench::hash::HashFunction`.
#[derive(Default)]
pub struct HashFunctionWrapper<Variant: digest::Digest + 'static, const DIGEST_LEN: usize>(Variant);

impl<Variant: digest::Digest + 'static, const DIGEST_LEN: usize>
    HashFunctionWrapper<Variant, DIGEST_LEN>
{
    /// Evaluated on use; a `DIGEST_LEN` wider than the output of `Variant` does not compile.
    const OUTPUT_FITS: () = assert!(
        DIGEST_LEN <= <<Variant as digest::OutputSizeUser>::OutputSize as typenum::Unsigned>::USIZE,
        "DIGEST_LEN exceeds the output size of the wrapped hash function"
    );
}

/// Names of the wrapped hash functions.
pub trait NamedDigest {
    const NAME: &'static str;
}

impl NamedDigest for sha2::Sha256 {
    const NAME: &'static str = "SHA256";
}

impl NamedDigest for blake2::Blake2b<typenum::U32> {
    const NAME: &'static str = "Blake2b256";
}

impl<Variant, const DIGEST_LEN: usize> HashFunction<DIGEST_LEN>
    for HashFunctionWrapper<Variant, DIGEST_LEN>
where
    Variant: digest::Digest + NamedDigest + Default + 'static,
{
    const NAME: &'static str = Variant::NAME;

    fn update<Data: AsRef<[u8]>>(&mut self, data: Data) {
        self.0.update(data);
    }

    fn finalize(self) -> Digest<DIGEST_LEN> {
        #[allow(clippy::let_unit_value)]
        let () = Self::OUTPUT_FITS;
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&self.0.finalize()[..DIGEST_LEN]);
        Digest { digest }
    }
}

/// SHA-2
pub type Sha256 = HashFunctionWrapper<sha2::Sha256, 32>;

/// BLAKE2-256
pub type Blake2b256 = HashFunctionWrapper<blake2::Blake2b<typenum::U32>, 32>;
