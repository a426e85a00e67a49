// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The fixed set of benchmarks.
//!
//! Each entry builds its own fixture, resets the timer and runs one operation. Entries share no state
//! and may be run in any order or in isolation.

use crate::bench::fixture::{HashChainFixture, SignatureFixture, VerificationFixture};
use crate::bench::runner::{run_chained, run_timed};
use crate::bench::timer::Bencher;
use crate::bench::MESSAGE;
use crate::ed25519::Ed25519KeyPair;
use crate::error::{BenchError, BenchResult};
use crate::hash::{Blake2b256, Sha256};
use crate::secp256r1::Secp256r1KeyPair;
use crate::traits::KeyPair;
use crate::unsecure::rng::ConstantRng;
use rand::rngs::OsRng;
use regex::Regex;
use std::fmt;
use std::hint::black_box;

pub const ECDSA_P256_KEY_GENERATION: &str = "ECDSAP256KeyGeneration";
pub const ECDSA_P256_SIGN: &str = "ECDSAP256Sign";
pub const ECDSA_P256_VERIFY: &str = "ECDSAP256Verify";
pub const ED25519_KEY_GENERATION: &str = "Ed25519KeyGeneration";
pub const ED25519_SIGN: &str = "Ed25519Sign";
pub const ED25519_VERIFY: &str = "Ed25519Verify";
pub const SHA256: &str = "SHA256";
pub const BLAKE2: &str = "Blake2";

/// Builds the fixture for, and runs, one benchmark against the given bencher.
pub type BenchmarkFn = fn(&mut dyn Bencher) -> BenchResult<()>;

/// A named benchmark.
#[derive(Clone, Copy)]
pub struct BenchmarkEntry {
    name: &'static str,
    run: BenchmarkFn,
}

impl BenchmarkEntry {
    pub const fn new(name: &'static str, run: BenchmarkFn) -> Self {
        Self { name, run }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, bencher: &mut dyn Bencher) -> BenchResult<()> {
        (self.run)(bencher)
    }
}

impl fmt::Debug for BenchmarkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkEntry")
            .field("name", &self.name)
            .finish()
    }
}

/// Read-only table of benchmarks, in registration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<BenchmarkEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<BenchmarkEntry>) -> Self {
        Self { entries }
    }

    /// The eight primitive benchmarks.
    pub fn standard() -> Self {
        Self::new(vec![
            BenchmarkEntry::new(ECDSA_P256_KEY_GENERATION, ecdsa_p256_key_generation),
            BenchmarkEntry::new(ECDSA_P256_SIGN, ecdsa_p256_sign),
            BenchmarkEntry::new(ECDSA_P256_VERIFY, ecdsa_p256_verify),
            BenchmarkEntry::new(ED25519_KEY_GENERATION, ed25519_key_generation),
            BenchmarkEntry::new(ED25519_SIGN, ed25519_sign),
            BenchmarkEntry::new(ED25519_VERIFY, ed25519_verify),
            BenchmarkEntry::new(SHA256, sha256_chain),
            BenchmarkEntry::new(BLAKE2, blake2_chain),
        ])
    }

    pub fn get(&self, name: &str) -> BenchResult<&BenchmarkEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| BenchError::UnknownBenchmark(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(BenchmarkEntry::name).collect()
    }

    /// Entries whose name matches `filter`, in registration order.
    pub fn select(&self, filter: &Regex) -> Vec<&BenchmarkEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.is_match(entry.name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a BenchmarkEntry;
    type IntoIter = std::slice::Iter<'a, BenchmarkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//
// Signature schemes. P-256 rejects the all-zero scalar, so its keys come from the OS RNG.
//

fn ecdsa_p256_key_generation(b: &mut dyn Bencher) -> BenchResult<()> {
    run_timed(b, || Secp256r1KeyPair::generate(&mut OsRng))?;
    Ok(())
}

fn ecdsa_p256_sign(b: &mut dyn Bencher) -> BenchResult<()> {
    let fixture = SignatureFixture::<Secp256r1KeyPair>::build(MESSAGE, &mut OsRng)
        .map_err(|e| BenchError::setup(ECDSA_P256_SIGN, e))?;
    run_timed(b, || fixture.sign())?;
    Ok(())
}

fn ecdsa_p256_verify(b: &mut dyn Bencher) -> BenchResult<()> {
    let fixture = VerificationFixture::<Secp256r1KeyPair>::build(MESSAGE, &mut OsRng)
        .map_err(|e| BenchError::setup(ECDSA_P256_VERIFY, e))?;
    run_timed(b, || fixture.verify())?;
    Ok(())
}

fn ed25519_key_generation(b: &mut dyn Bencher) -> BenchResult<()> {
    let mut rng = ConstantRng::zero();
    run_timed(b, || Ed25519KeyPair::generate(&mut rng))?;
    Ok(())
}

fn ed25519_sign(b: &mut dyn Bencher) -> BenchResult<()> {
    let fixture = SignatureFixture::<Ed25519KeyPair>::build(MESSAGE, &mut ConstantRng::zero())
        .map_err(|e| BenchError::setup(ED25519_SIGN, e))?;
    run_timed(b, || fixture.sign())?;
    Ok(())
}

fn ed25519_verify(b: &mut dyn Bencher) -> BenchResult<()> {
    let fixture = VerificationFixture::<Ed25519KeyPair>::build(MESSAGE, &mut ConstantRng::zero())
        .map_err(|e| BenchError::setup(ED25519_VERIFY, e))?;
    run_timed(b, || fixture.verify())?;
    Ok(())
}

//
// Hash functions. Each iteration hashes the previous digest, so no two calls see the same input.
//

fn sha256_chain(b: &mut dyn Bencher) -> BenchResult<()> {
    let fixture = HashChainFixture::<Sha256, 32>::build(MESSAGE);
    black_box(run_chained(
        b,
        fixture.initial,
        HashChainFixture::<Sha256, 32>::step,
    ));
    Ok(())
}

fn blake2_chain(b: &mut dyn Bencher) -> BenchResult<()> {
    let fixture = HashChainFixture::<Blake2b256, 32>::build(MESSAGE);
    black_box(run_chained(
        b,
        fixture.initial,
        HashChainFixture::<Blake2b256, 32>::step,
    ));
    Ok(())
}
