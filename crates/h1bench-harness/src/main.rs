//! h1bench - HTTP/1.x parser throughput harness
//!
//! Usage: `h1bench [SCENARIO_ID...]`
//!
//! With no arguments every standard scenario runs in order. Reports go to
//! stdout, logs to stderr (`RUST_LOG` controls the filter).

use std::io::{self, Write};
use std::process::ExitCode;

use h1bench_harness::{init_logging, Harness, HarnessConfig, SCENARIOS};
use tracing::error;

fn main() -> ExitCode {
    let config = HarnessConfig::default();
    init_logging(&config.log_level);

    let ids: Vec<String> = std::env::args().skip(1).collect();
    if ids.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let harness = Harness::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if ids.is_empty() {
        harness.run_all(&mut out)
    } else {
        harness.run_selected(&ids, &mut out)
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            error!(error = %err, "harness aborted");
            eprintln!("h1bench: {err}");
            return ExitCode::FAILURE;
        }
    };

    for failure in summary.failures() {
        if let Err(err) = &failure.result {
            eprintln!("FAIL {}: {err}", failure.id);
        }
    }

    let verdict = if summary.all_passed() { "OK" } else { "FAIL" };
    if writeln!(out, "{verdict}: {summary}").is_err() {
        return ExitCode::FAILURE;
    }

    if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_usage() {
    println!("usage: h1bench [SCENARIO_ID...]");
    println!();
    println!("scenarios:");
    for scenario in SCENARIOS {
        println!("  {:<22}{}", scenario.id, scenario.name);
    }
}
