//! h1bench Harness - Parser throughput measurement
//!
//! This crate provides:
//! - Scenario registry (fixed representative HTTP/1.x messages)
//! - `MessageParser` adapter over `httparse`
//! - Run executor (timed init-execute-verify loop)
//! - Throughput reporter (MB/s and messages/s)
//! - Harness driver (sequential run over all scenarios)
//! - Configuration and logging setup for the `h1bench` binary

pub mod config;
pub mod driver;
pub mod executor;
pub mod http;
pub mod logging;
pub mod report;
pub mod scenario;

pub use config::*;
pub use driver::*;
pub use executor::*;
pub use http::*;
pub use logging::*;
pub use report::*;
pub use scenario::*;
