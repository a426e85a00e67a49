// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A standalone driver which picks the iteration count for each benchmark.
//!
//! With a time budget, an entry is first run once and then re-run with an extrapolated iteration
//! count until a single run takes at least as long as the budget. With a fixed count, the entry is
//! run exactly once with that count.

use crate::bench::catalog::BenchmarkEntry;
use crate::bench::timer::Stopwatch;
use crate::error::{BenchError, BenchResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, trace, warn};

/// Upper bound on the iteration count of a single run.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000_000;

/// How long, or how often, each benchmark is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTime {
    Duration(Duration),
    Iterations(u64),
}

impl Default for BenchTime {
    fn default() -> Self {
        BenchTime::Duration(Duration::from_secs(1))
    }
}

impl FromStr for BenchTime {
    type Err = BenchError;

    /// Parses `"1000x"` as an iteration count and `"1.5s"`, `"250ms"`, `"10us"`, `"100ns"` or
    /// `"2m"` as a time budget.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BenchError::InvalidConfig(format!("invalid benchtime {s:?}"));
        let s = s.trim();
        if let Some(count) = s.strip_suffix('x') {
            let count = count.parse::<u64>().map_err(|_| invalid())?;
            if count == 0 {
                return Err(invalid());
            }
            return Ok(BenchTime::Iterations(count));
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (value, unit) = s.split_at(split);
        let nanos_per_unit: u128 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            _ => return Err(invalid()),
        };
        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        if whole.is_empty() || fraction.contains('.') || fraction.len() > 9 {
            return Err(invalid());
        }
        let whole = whole.parse::<u128>().map_err(|_| invalid())?;
        let fraction_nanos = if fraction.is_empty() {
            0
        } else {
            let scale = 10u128.pow(fraction.len() as u32);
            fraction.parse::<u128>().map_err(|_| invalid())? * nanos_per_unit / scale
        };
        let nanos = whole
            .checked_mul(nanos_per_unit)
            .and_then(|n| n.checked_add(fraction_nanos))
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(invalid)?;
        if nanos == 0 {
            return Err(invalid());
        }
        let duration = Duration::from_nanos(nanos);
        Ok(BenchTime::Duration(duration))
    }
}

impl fmt::Display for BenchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchTime::Duration(d) => write!(f, "{d:?}"),
            BenchTime::Iterations(n) => write!(f, "{n}x"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub bench_time: BenchTime,
    /// Number of measurements per entry.
    pub count: u32,
    pub max_iterations: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            bench_time: BenchTime::default(),
            count: 1,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The outcome of one calibrated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub iterations: u64,
    pub elapsed_ns: u64,
    pub ns_per_op: f64,
}

impl Measurement {
    pub fn new(name: &str, iterations: u64, elapsed: Duration) -> Self {
        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        let ns_per_op = if iterations == 0 {
            0.0
        } else {
            elapsed_ns as f64 / iterations as f64
        };
        Self {
            name: name.to_string(),
            iterations,
            elapsed_ns,
            ns_per_op,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Benchmark{:<24}\t{:>12}\t{:>14.1} ns/op",
            self.name, self.iterations, self.ns_per_op
        )
    }
}

/// Next iteration count when `prev_iters` iterations took `prev_elapsed` and the goal is `goal`.
///
/// The extrapolation gets 20% headroom, grows by at most 100x and by at least one iteration, and
/// never exceeds `max_iterations`.
pub fn predict_iterations(
    goal: Duration,
    prev_iters: u64,
    prev_elapsed: Duration,
    max_iterations: u64,
) -> u64 {
    let prev_ns = prev_elapsed.as_nanos().max(1);
    let prev_iters = u128::from(prev_iters.max(1));
    let mut n = goal.as_nanos() * prev_iters / prev_ns;
    n += n / 5;
    n = n.min(100 * prev_iters);
    n = n.max(prev_iters + 1);
    n.min(u128::from(max_iterations)) as u64
}

pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn run_once(entry: &BenchmarkEntry, iterations: u64) -> BenchResult<Duration> {
        let mut stopwatch = Stopwatch::new(iterations);
        entry.run(&mut stopwatch)?;
        let elapsed = stopwatch.elapsed();
        trace!(benchmark = entry.name(), iterations, ?elapsed, "Finished round");
        Ok(elapsed)
    }

    /// Calibrate and measure a single entry.
    pub fn measure(&self, entry: &BenchmarkEntry) -> BenchResult<Measurement> {
        let result = match self.config.bench_time {
            BenchTime::Iterations(n) => {
                let n = n.min(self.config.max_iterations);
                Self::run_once(entry, n).map(|elapsed| (n, elapsed))
            }
            BenchTime::Duration(goal) => self.calibrate(entry, goal),
        };
        match result {
            Ok((iterations, elapsed)) => {
                let measurement = Measurement::new(entry.name(), iterations, elapsed);
                info!(
                    benchmark = entry.name(),
                    iterations,
                    ns_per_op = measurement.ns_per_op,
                    "Measured"
                );
                Ok(measurement)
            }
            Err(e) => {
                warn!(benchmark = entry.name(), error = %e, "Benchmark aborted");
                Err(e)
            }
        }
    }

    fn calibrate(&self, entry: &BenchmarkEntry, goal: Duration) -> BenchResult<(u64, Duration)> {
        let mut iterations = 1;
        let mut elapsed = Self::run_once(entry, iterations)?;
        while elapsed < goal && iterations < self.config.max_iterations {
            iterations =
                predict_iterations(goal, iterations, elapsed, self.config.max_iterations);
            elapsed = Self::run_once(entry, iterations)?;
        }
        Ok((iterations, elapsed))
    }

    /// Measure every entry `count` times, in order. The first failure stops the whole run.
    pub fn run_all<'a, I>(&self, entries: I) -> BenchResult<Vec<Measurement>>
    where
        I: IntoIterator<Item = &'a BenchmarkEntry>,
    {
        let mut measurements = Vec::new();
        for entry in entries {
            for _ in 0..self.config.count {
                measurements.push(self.measure(entry)?);
            }
        }
        Ok(measurements)
    }
}
