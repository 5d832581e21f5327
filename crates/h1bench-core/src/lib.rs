//! h1bench Core - Types shared between the harness and the measured parser
//!
//! This crate defines:
//! - Message direction (request / response)
//! - The `MessageParser` interface the harness drives
//! - Harness error types

pub mod direction;
pub mod error;
pub mod parser;

pub use direction::*;
pub use error::*;
pub use parser::*;
