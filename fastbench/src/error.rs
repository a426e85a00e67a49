// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Collection of errors to be used in fastbench.
//!
//! Benchmarks only measure the happy path, so every error here is fatal for the benchmark that
//! produced it. Failures during fixture construction are wrapped in [BenchError::Setup] and failures
//! inside the timed loop are wrapped in [BenchError::Iteration].

use thiserror::Error;

pub type BenchResult<T> = Result<T, BenchError>;

/// Collection of errors to be used in fastbench.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BenchError {
    /// The entropy source could not fill the requested buffer.
    #[error("Entropy source failed: {0}")]
    Entropy(String),

    /// The entropy source produced bytes that are not a valid secret key.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Producing a signature failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Invalid signature was given to the function
    #[error("Invalid signature was given to the function")]
    InvalidSignature,

    /// Input length is wrong.
    #[error("Expected input of length exactly {0}")]
    InputLengthWrong(usize),

    /// Building the inputs of a benchmark failed before timing started.
    #[error("Setup of {benchmark} failed: {source}")]
    Setup {
        benchmark: &'static str,
        source: Box<BenchError>,
    },

    /// The timed operation failed. The remaining iterations were not executed.
    #[error("Iteration {iteration} failed: {source}")]
    Iteration {
        iteration: u64,
        source: Box<BenchError>,
    },

    /// No benchmark is registered under the given name.
    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),

    /// A driver setting could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BenchError {
    pub fn setup(benchmark: &'static str, source: BenchError) -> Self {
        BenchError::Setup {
            benchmark,
            source: Box::new(source),
        }
    }

    pub fn iteration(iteration: u64, source: BenchError) -> Self {
        BenchError::Iteration {
            iteration,
            source: Box::new(source),
        }
    }
}

impl From<rand::Error> for BenchError {
    fn from(e: rand::Error) -> Self {
        BenchError::Entropy(e.to_string())
    }
}

impl From<ed25519_consensus::Error> for BenchError {
    fn from(_: ed25519_consensus::Error) -> Self {
        BenchError::InvalidSignature
    }
}
