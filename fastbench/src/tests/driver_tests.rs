// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::bench::catalog::{BenchmarkEntry, Catalog, BLAKE2, SHA256};
use crate::bench::driver::{
    predict_iterations, BenchTime, Driver, DriverConfig, Measurement, DEFAULT_MAX_ITERATIONS,
};
use crate::bench::runner::run_timed;
use crate::bench::timer::Bencher;
use crate::error::{BenchError, BenchResult};
use proptest::prelude::*;
use std::str::FromStr;
use std::time::Duration;

#[test]
fn test_parse_benchtime() {
    assert_eq!(
        BenchTime::from_str("1s").unwrap(),
        BenchTime::Duration(Duration::from_secs(1))
    );
    assert_eq!(
        BenchTime::from_str("1.5s").unwrap(),
        BenchTime::Duration(Duration::from_millis(1500))
    );
    assert_eq!(
        BenchTime::from_str("250ms").unwrap(),
        BenchTime::Duration(Duration::from_millis(250))
    );
    assert_eq!(
        BenchTime::from_str("10us").unwrap(),
        BenchTime::Duration(Duration::from_micros(10))
    );
    assert_eq!(
        BenchTime::from_str("100ns").unwrap(),
        BenchTime::Duration(Duration::from_nanos(100))
    );
    assert_eq!(
        BenchTime::from_str("2m").unwrap(),
        BenchTime::Duration(Duration::from_secs(120))
    );
    assert_eq!(
        BenchTime::from_str("1000x").unwrap(),
        BenchTime::Iterations(1000)
    );
}

#[test]
fn test_parse_invalid_benchtime() {
    for input in ["", "x", "0x", "-1x", "1", "s", "1h", "0s", "1..5s", "fast"] {
        assert!(
            matches!(BenchTime::from_str(input), Err(BenchError::InvalidConfig(_))),
            "{input:?} was accepted"
        );
    }
}

#[test]
fn test_default_config() {
    let config = DriverConfig::default();
    assert_eq!(config.bench_time, BenchTime::Duration(Duration::from_secs(1)));
    assert_eq!(config.count, 1);
    assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);

    let config = DriverConfig {
        bench_time: BenchTime::Iterations(5),
        count: 2,
        max_iterations: 10,
    };
    assert_eq!(Driver::new(config).config(), &config);
}

#[test]
fn test_predict_iterations() {
    // 100 iterations in 1ms, goal 1s: extrapolate to 100_000 with 20% headroom, capped at 100x.
    assert_eq!(
        predict_iterations(Duration::from_secs(1), 100, Duration::from_millis(1), u64::MAX),
        10_000
    );
    // Within the growth limit the headroom is kept.
    assert_eq!(
        predict_iterations(Duration::from_millis(10), 100, Duration::from_millis(1), u64::MAX),
        1_200
    );
    // Always make progress.
    assert_eq!(
        predict_iterations(Duration::from_millis(1), 100, Duration::from_secs(1), u64::MAX),
        101
    );
    // A zero duration is treated as one nanosecond.
    assert_eq!(
        predict_iterations(Duration::from_secs(1), 1, Duration::ZERO, 1_000),
        100
    );
    assert_eq!(
        predict_iterations(Duration::from_secs(1), 1000, Duration::from_nanos(1), 5_000),
        5_000
    );
}

#[test]
fn test_measurement() {
    let measurement = Measurement::new("SHA256", 4, Duration::from_nanos(1000));
    assert_eq!(measurement.ns_per_op, 250.0);
    assert_eq!(measurement.elapsed(), Duration::from_nanos(1000));
    let line = measurement.to_string();
    assert!(line.starts_with("BenchmarkSHA256"));
    assert!(line.ends_with("250.0 ns/op"));

    assert_eq!(Measurement::new("SHA256", 0, Duration::ZERO).ns_per_op, 0.0);
}

#[test]
fn test_fixed_iterations() {
    let catalog = Catalog::standard();
    let driver = Driver::new(DriverConfig {
        bench_time: BenchTime::Iterations(25),
        ..DriverConfig::default()
    });
    let measurement = driver.measure(catalog.get(SHA256).unwrap()).unwrap();
    assert_eq!(measurement.name, SHA256);
    assert_eq!(measurement.iterations, 25);
}

#[test]
fn test_time_budget_is_reached() {
    let catalog = Catalog::standard();
    let goal = Duration::from_millis(5);
    let driver = Driver::new(DriverConfig {
        bench_time: BenchTime::Duration(goal),
        ..DriverConfig::default()
    });
    let measurement = driver.measure(catalog.get(BLAKE2).unwrap()).unwrap();
    assert!(measurement.iterations > 1);
    assert!(measurement.elapsed() >= goal);
}

#[test]
fn test_max_iterations_bounds_calibration() {
    let catalog = Catalog::standard();
    let driver = Driver::new(DriverConfig {
        bench_time: BenchTime::Duration(Duration::from_secs(60)),
        count: 1,
        max_iterations: 64,
    });
    let measurement = driver.measure(catalog.get(SHA256).unwrap()).unwrap();
    assert_eq!(measurement.iterations, 64);
}

#[test]
fn test_run_all_with_count() {
    let catalog = Catalog::standard();
    let driver = Driver::new(DriverConfig {
        bench_time: BenchTime::Iterations(2),
        count: 3,
        ..DriverConfig::default()
    });
    let measurements = driver.run_all(&catalog).unwrap();
    assert_eq!(measurements.len(), 3 * catalog.len());
    assert!(measurements.iter().all(|m| m.iterations == 2));
    assert_eq!(measurements[0].name, measurements[2].name);
}

fn fails_on_second_iteration(b: &mut dyn Bencher) -> BenchResult<()> {
    let mut calls = 0;
    run_timed(b, || {
        calls += 1;
        if calls > 1 {
            Err(BenchError::InvalidSignature)
        } else {
            Ok(())
        }
    })?;
    Ok(())
}

#[test]
fn test_run_all_stops_at_first_failure() {
    let entries = [
        BenchmarkEntry::new("Fails", fails_on_second_iteration),
        BenchmarkEntry::new("NeverRuns", |_| panic!("must not run")),
    ];
    let driver = Driver::new(DriverConfig {
        bench_time: BenchTime::Duration(Duration::from_secs(1)),
        ..DriverConfig::default()
    });
    assert_eq!(
        driver.run_all(&entries),
        Err(BenchError::iteration(1, BenchError::InvalidSignature))
    );
}

proptest! {
    #[test]
    fn test_prediction_is_bounded(
        goal_ms in 1u64..10_000,
        prev_iters in 1u64..1_000_000,
        prev_ns in 0u64..10_000_000_000,
        max in 1u64..DEFAULT_MAX_ITERATIONS,
    ) {
        let next = predict_iterations(
            Duration::from_millis(goal_ms),
            prev_iters,
            Duration::from_nanos(prev_ns),
            max,
        );
        prop_assert!(next <= max);
        prop_assert!(next <= 100 * prev_iters);
        prop_assert!(next > prev_iters || next == max);
    }
}
