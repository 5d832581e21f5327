//! Interface between the harness and a measured parser
//!
//! The harness never looks inside a parser. It only needs to:
//! - build a fresh state for a direction
//! - feed it one buffer with a settings object
//! - compare the returned consumption with the buffer length

use crate::Direction;

/// A message parser the harness can drive and time
pub trait MessageParser: Sized {
    /// Parser configuration, built once and shared read-only by every execution
    type Settings;

    /// Build a parser in its initial state for the given direction
    fn init(direction: Direction) -> Self;

    /// Feed `data` and return how many bytes were consumed
    fn execute(&mut self, settings: &Self::Settings, data: &[u8]) -> usize;

    /// Human-readable reason for the last failed execution, if any
    fn failure(&self) -> Option<String> {
        None
    }
}
