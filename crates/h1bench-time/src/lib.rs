//! h1bench Time - Clocks for timing benchmark runs
//!
//! - `MonotonicClock`: wall time from the OS monotonic clock
//! - `ManualClock`: explicitly advanced, for deterministic tests

pub mod clock;

pub use clock::*;
