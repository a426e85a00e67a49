// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

//! Timing harness for signature schemes and hash functions.
//!
//! A benchmark is split in two phases: an untimed fixture build (keys, digests, signatures) and a
//! timed loop that runs a single operation exactly `N` times, where `N` is chosen by whoever drives
//! the benchmark. The fixed set of benchmarks lives in [bench::catalog::Catalog].
//!
//! ```rust
//! use fastbench::bench::{catalog::Catalog, timer::Stopwatch};
//! let catalog = Catalog::standard();
//! let entry = catalog.get("Ed25519Verify").unwrap();
//! let mut stopwatch = Stopwatch::new(16);
//! entry.run(&mut stopwatch).unwrap();
//! ```

use rand::thread_rng;

#[cfg(test)]
#[path = "tests/rng_tests.rs"]
pub mod rng_tests;

#[cfg(test)]
#[path = "tests/hash_tests.rs"]
pub mod hash_tests;

#[cfg(test)]
#[path = "tests/ed25519_tests.rs"]
pub mod ed25519_tests;

#[cfg(test)]
#[path = "tests/secp256r1_tests.rs"]
pub mod secp256r1_tests;

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
pub mod runner_tests;

#[cfg(test)]
#[path = "tests/fixture_tests.rs"]
pub mod fixture_tests;

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
pub mod catalog_tests;

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
pub mod driver_tests;

// Signing traits
pub mod traits;
// Key scheme implementations
pub mod ed25519;
pub mod hash;
pub mod secp256r1;

// Benchmark harness
pub mod bench;

// Other tooling
pub mod error;

/// Primitives which are only meant to make benchmarks reproducible.
///
/// Warning: Nothing in this module may be used to produce keys outside of benchmarks.
pub mod unsecure;

////////////////////////////////////////////////////////////////
// Generic Keypair
////////////////////////////////////////////////////////////////

/// Generate a keypair from the thread-local, OS-seeded RNG.
pub fn generate_production_keypair<K: traits::KeyPair>() -> error::BenchResult<K> {
    generate_keypair::<K, _>(&mut thread_rng())
}

pub fn generate_keypair<K: traits::KeyPair, R>(csprng: &mut R) -> error::BenchResult<K>
where
    R: traits::AllowedRng,
{
    K::generate(csprng)
}
