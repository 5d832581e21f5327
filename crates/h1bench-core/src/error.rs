//! Error types for the h1bench harness

use thiserror::Error;

/// Harness errors
#[derive(Error, Debug)]
pub enum BenchError {
    // Correctness gate
    #[error(
        "Consumption mismatch in '{scenario}' at iteration {iteration}: expected {expected} bytes, parser consumed {consumed}{}",
        detail_suffix(.detail)
    )]
    ConsumptionMismatch {
        scenario: String,
        iteration: u64,
        expected: usize,
        consumed: usize,
        detail: Option<String>,
    },

    #[error("Iteration count must be at least 1")]
    ZeroIterations,

    #[error("Total byte count overflows u64: {iterations} iterations of {bytes} bytes")]
    ByteCountOverflow { iterations: u64, bytes: usize },

    // Registry errors
    #[error("Scenario has an empty payload: {0}")]
    EmptyScenario(String),

    #[error("Duplicate scenario identifier: {0}")]
    DuplicateScenario(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    // Output errors
    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Does this error come from the parser under measurement?
    pub fn is_consumption_mismatch(&self) -> bool {
        matches!(self, BenchError::ConsumptionMismatch { .. })
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(" ({d})"),
        None => String::new(),
    }
}

/// Result type for harness operations
pub type BenchResult<T> = Result<T, BenchError>;
