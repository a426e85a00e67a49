// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Timed execution of a single operation.
//!
//! Both runners reset the timer before the first iteration, so everything the caller did before is
//! excluded from the measurement. The iteration count is read from the [Bencher] and honoured exactly.

use crate::bench::timer::Bencher;
use crate::error::{BenchError, BenchResult};
use std::hint::black_box;

/// Execute `op` exactly `bencher.iterations()` times and return the number of executions.
///
/// The first failing iteration aborts the run. Its index and cause are returned in
/// [BenchError::Iteration] and none of the remaining iterations are executed.
pub fn run_timed<B, T, F>(bencher: &mut B, mut op: F) -> BenchResult<u64>
where
    B: Bencher + ?Sized,
    F: FnMut() -> BenchResult<T>,
{
    bencher.reset_timer();
    let iterations = bencher.iterations();
    for iteration in 0..iterations {
        match op() {
            Ok(output) => {
                black_box(output);
            }
            Err(e) => return Err(BenchError::iteration(iteration, e)),
        }
    }
    Ok(iterations)
}

/// Thread a state through `step` exactly `bencher.iterations()` times, each iteration consuming the
/// output of the previous one, and return the final state.
///
/// With zero iterations `initial` is returned unchanged.
pub fn run_chained<B, T, F>(bencher: &mut B, initial: T, mut step: F) -> T
where
    B: Bencher + ?Sized,
    F: FnMut(&T) -> T,
{
    bencher.reset_timer();
    let mut state = initial;
    for _ in 0..bencher.iterations() {
        state = step(black_box(&state));
    }
    state
}
