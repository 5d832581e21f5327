//! Throughput reporter
//!
//! Turns a `RunResult` into derived rates and the fixed text block printed
//! per scenario.

use std::time::Duration;

use h1bench_core::{BenchError, BenchResult};

use crate::RunResult;

/// Bytes in one reported megabyte
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Rates derived from a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub mb_processed: f64,
    pub elapsed_secs: f64,
    pub data_rate_mbps: f64,
    pub ops_per_sec: f64,
}

impl Throughput {
    /// Derive rates. A non-positive elapsed time yields zero rates.
    pub fn compute(iterations: u64, total_bytes: u64, elapsed: Duration) -> Self {
        let mb_processed = total_bytes as f64 / BYTES_PER_MB;
        let elapsed_secs = elapsed.as_secs_f64();

        let (data_rate_mbps, ops_per_sec) = if elapsed_secs > 0.0 {
            (mb_processed / elapsed_secs, iterations as f64 / elapsed_secs)
        } else {
            (0.0, 0.0)
        };

        Throughput {
            mb_processed,
            elapsed_secs,
            data_rate_mbps,
            ops_per_sec,
        }
    }

    pub fn from_run(run: &RunResult) -> Self {
        Self::compute(run.iterations, run.total_bytes, run.elapsed)
    }
}

/// Render the report block for one scenario
pub fn report(
    name: &str,
    iterations: u64,
    buffer_len: usize,
    run: &RunResult,
) -> BenchResult<String> {
    let total_bytes = iterations.checked_mul(buffer_len as u64).ok_or(
        BenchError::ByteCountOverflow {
            iterations,
            bytes: buffer_len,
        },
    )?;
    let rates = Throughput::compute(iterations, total_bytes, run.elapsed);

    Ok(format!(
        "Scenario: {name}\n\
         \x20 Iterations: {iterations}\n\
         \x20 Data Size: {:.2} bytes\n\
         \x20 Total Bytes: {total_bytes}\n\
         \x20 Total Processed: {:.2} MB\n\
         \x20 Elapsed Time: {:.4} s\n\
         \x20 Throughput: {:.2} MB/s\n\
         \x20 Rate: {:.2} msg/sec",
        buffer_len as f64,
        rates.mb_processed,
        rates.elapsed_secs,
        rates.data_rate_mbps,
        rates.ops_per_sec,
    ))
}
