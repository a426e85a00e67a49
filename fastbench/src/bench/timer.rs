// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};

/// The part of a benchmark framework the harness talks to.
pub trait Bencher {
    /// Number of times the measured operation must be executed.
    fn iterations(&self) -> u64;

    /// Discard the time elapsed so far and start measuring from now on.
    fn reset_timer(&mut self);
}

/// A [Bencher] measuring wall-clock time for a fixed iteration count.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    iterations: u64,
    start: Instant,
}

impl Stopwatch {
    pub fn new(iterations: u64) -> Self {
        Self {
            iterations,
            start: Instant::now(),
        }
    }

    /// Time elapsed since creation or the last call to [Bencher::reset_timer].
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Bencher for Stopwatch {
    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn reset_timer(&mut self) {
        self.start = Instant::now();
    }
}
