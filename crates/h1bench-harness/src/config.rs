//! Harness configuration

use h1bench_core::{BenchError, BenchResult};

/// Iterations per scenario
pub const BENCH_ITERATIONS: u64 = 100_000;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Harness configuration
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Timed iterations per scenario
    pub iterations: u64,
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            iterations: BENCH_ITERATIONS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Set iteration count
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set log filter
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.iterations == 0 {
            return Err(BenchError::ZeroIterations);
        }
        Ok(())
    }
}
