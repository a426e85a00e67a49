// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, ValueEnum};
use fastbench::bench::catalog::Catalog;
use fastbench::bench::driver::{
    BenchTime, Driver, DriverConfig, Measurement, DEFAULT_MAX_ITERATIONS,
};
use fastbench::error::BenchError;
use regex::Regex;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[command(name = "bench-cli")]
#[command(about = "Measure key generation, signing, verification and hashing throughput", long_about = None)]
struct Arguments {
    /// Only run benchmarks whose name matches this regular expression.
    #[clap(long, default_value = ".")]
    bench: String,

    /// Time budget per benchmark (e.g. 1s, 250ms) or a fixed iteration count (e.g. 1000x).
    #[clap(long, default_value = "1s")]
    benchtime: String,

    /// Number of measurements per benchmark.
    #[clap(long, default_value_t = 1)]
    count: u32,

    /// Upper bound on the iteration count of a single run.
    #[clap(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u64,

    /// Output format of the measurements.
    #[clap(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List the benchmark names and exit.
    #[clap(long)]
    list: bool,

    /// Log filter, e.g. "info" or "fastbench=trace". Defaults to RUST_LOG, then "warn".
    #[clap(long)]
    log_level: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug)]
enum Failure {
    /// The arguments were not understood.
    Usage(String),
    /// A benchmark aborted.
    Aborted(BenchError),
    /// The measurements could not be written out.
    Output(serde_json::Error),
}

impl Failure {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Failure::Usage(_) => exitcode::USAGE,
            Failure::Aborted(_) => exitcode::SOFTWARE,
            Failure::Output(_) => exitcode::IOERR,
        }
    }

    fn message(&self) -> String {
        match self {
            Failure::Usage(msg) => msg.clone(),
            Failure::Aborted(e) => e.to_string(),
            Failure::Output(e) => format!("failed to encode measurements: {e}"),
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Arguments::parse();
    init_logging(args.log_level.as_deref());
    match execute(args) {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(exitcode::OK);
        }
        Err(failure) => {
            eprintln!("Error: {}", failure.message());
            std::process::exit(failure.exit_code());
        }
    }
}

fn execute(args: Arguments) -> Result<String, Failure> {
    let catalog = Catalog::standard();
    let filter =
        Regex::new(&args.bench).map_err(|e| Failure::Usage(format!("invalid --bench: {e}")))?;
    let selected = catalog.select(&filter);
    if selected.is_empty() {
        return Err(Failure::Usage(format!(
            "no benchmark matches {:?}",
            args.bench
        )));
    }

    if args.list {
        let names: Vec<&str> = selected.iter().map(|entry| entry.name()).collect();
        return Ok(names.join("\n"));
    }

    let bench_time =
        BenchTime::from_str(&args.benchtime).map_err(|e| Failure::Usage(e.to_string()))?;
    if args.count == 0 {
        return Err(Failure::Usage("--count must be positive".to_string()));
    }
    let config = DriverConfig {
        bench_time,
        count: args.count,
        max_iterations: args.max_iterations.max(1),
    };
    debug!(?config, benchmarks = selected.len(), "Starting run");

    let measurements = Driver::new(config)
        .run_all(selected)
        .map_err(Failure::Aborted)?;
    render(&measurements, args.format)
}

fn render(measurements: &[Measurement], format: Format) -> Result<String, Failure> {
    match format {
        Format::Text => Ok(measurements
            .iter()
            .map(Measurement::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => serde_json::to_string_pretty(measurements).map_err(Failure::Output),
    }
}

#[cfg(test)]
mod tests {
    use crate::{execute, render, Arguments, Failure, Format};
    use fastbench::bench::driver::Measurement;
    use fastbench::error::BenchError;
    use std::time::Duration;
    use clap::Parser;

    fn arguments(extra: &[&str]) -> Arguments {
        let mut argv = vec!["bench-cli"];
        argv.extend_from_slice(extra);
        Arguments::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = arguments(&[]);
        assert_eq!(args.bench, ".");
        assert_eq!(args.benchtime, "1s");
        assert_eq!(args.count, 1);
        assert_eq!(args.format, Format::Text);
        assert!(!args.list);
    }

    #[test]
    fn test_list() {
        let result = execute(arguments(&["--list"])).unwrap();
        let expected = "ECDSAP256KeyGeneration\nECDSAP256Sign\nECDSAP256Verify\nEd25519KeyGeneration\nEd25519Sign\nEd25519Verify\nSHA256\nBlake2";
        assert_eq!(expected, result);

        let result = execute(arguments(&["--list", "--bench", "^Ed25519"])).unwrap();
        assert_eq!("Ed25519KeyGeneration\nEd25519Sign\nEd25519Verify", result);
    }

    #[test]
    fn test_fixed_iterations() {
        let result = execute(arguments(&["--bench", "SHA256|Blake2", "--benchtime", "10x"])).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("BenchmarkSHA256"));
        assert!(lines[1].starts_with("BenchmarkBlake2"));
        assert!(lines.iter().all(|line| line.contains("\t          10\t")));
        assert!(lines.iter().all(|line| line.ends_with("ns/op")));
    }

    #[test]
    fn test_count_and_json() {
        let result = execute(arguments(&[
            "--bench",
            "^Ed25519Verify$",
            "--benchtime",
            "3x",
            "--count",
            "2",
            "--format",
            "json",
        ]))
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        let runs = parsed.as_array().unwrap();
        assert_eq!(runs.len(), 2);
        for run in runs {
            assert_eq!(run["name"], "Ed25519Verify");
            assert_eq!(run["iterations"], 3u64);
        }
    }

    #[test]
    fn test_time_budget() {
        let result = execute(arguments(&["--bench", "^SHA256$", "--benchtime", "5ms"])).unwrap();
        assert!(result.starts_with("BenchmarkSHA256"));
    }

    #[test]
    fn test_usage_errors() {
        assert!(matches!(
            execute(arguments(&["--bench", "("])),
            Err(Failure::Usage(_))
        ));
        assert!(matches!(
            execute(arguments(&["--bench", "RSA"])),
            Err(Failure::Usage(_))
        ));
        assert!(matches!(
            execute(arguments(&["--benchtime", "soon"])),
            Err(Failure::Usage(_))
        ));
        assert!(matches!(
            execute(arguments(&["--count", "0"])),
            Err(Failure::Usage(_))
        ));
    }

    #[test]
    fn test_render() {
        let measurements = vec![Measurement::new("SHA256", 4, Duration::from_nanos(100))];
        let text = render(&measurements, Format::Text).unwrap();
        assert!(text.starts_with("BenchmarkSHA256"));
        let json = render(&measurements, Format::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["elapsed_ns"], 100u64);
        assert_eq!(render(&[], Format::Json).unwrap(), "[]");
    }

    #[test]
    fn test_failure_exit_codes() {
        let encoding = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let output = Failure::Output(encoding);
        assert_eq!(output.exit_code(), exitcode::IOERR);
        assert!(output.message().starts_with("failed to encode measurements"));

        let aborted = Failure::Aborted(BenchError::InvalidSignature);
        assert_eq!(aborted.exit_code(), exitcode::SOFTWARE);
        assert_eq!(aborted.message(), BenchError::InvalidSignature.to_string());

        assert_eq!(Failure::Usage("bad".to_string()).exit_code(), exitcode::USAGE);
    }
}
