//! Clock implementations for timing benchmark runs

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A point in time, measured from the owning clock's reference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    #[inline]
    pub fn from_duration(offset: Duration) -> Self {
        Timestamp(offset)
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

/// Time source sampled around a timed region
pub trait BenchClock {
    /// Current time. Never smaller than a previous reading of the same clock.
    fn now(&self) -> Timestamp;

    /// Duration between two readings of this clock, clamped at zero
    fn elapsed(&self, start: Timestamp, end: Timestamp) -> Duration {
        end.0.saturating_sub(start.0)
    }
}

/// Monotonic clock backed by `Instant`
/// INVARIANT: readings never go backwards
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    /// Reference instant, reading zero
    reference: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            reference: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchClock for MonotonicClock {
    #[inline]
    fn now(&self) -> Timestamp {
        Timestamp(self.reference.elapsed())
    }
}

/// Clock that only moves when told to
///
/// Each `now()` reading advances the clock by `step` afterwards, so a run
/// sampled twice sees exactly `step` elapsed. A zero step freezes time.
#[derive(Debug)]
pub struct ManualClock {
    current: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    /// Clock frozen at zero
    pub fn frozen() -> Self {
        Self::with_step(Duration::ZERO)
    }

    /// Clock advancing by `step` after every reading
    pub fn with_step(step: Duration) -> Self {
        ManualClock {
            current: Cell::new(Duration::ZERO),
            step,
        }
    }

    /// Move the clock forward
    pub fn advance(&self, dt: Duration) {
        self.current.set(self.current.get().saturating_add(dt));
    }
}

impl BenchClock for ManualClock {
    fn now(&self) -> Timestamp {
        let t = self.current.get();
        self.advance(self.step);
        Timestamp(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();

        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let t2 = clock.now();

        assert!(t2 >= t1);
        assert!(clock.elapsed(t1, t2) >= Duration::from_millis(5));
    }

    #[test]
    fn test_elapsed_is_clamped_at_zero() {
        let clock = MonotonicClock::new();
        let early = Timestamp::from_duration(Duration::from_millis(10));
        let late = Timestamp::from_duration(Duration::from_millis(30));

        assert_eq!(clock.elapsed(early, late), Duration::from_millis(20));
        assert_eq!(clock.elapsed(late, early), Duration::ZERO);
    }

    #[test]
    fn test_frozen_clock() {
        let clock = ManualClock::frozen();
        let start = clock.now();
        let end = clock.now();

        assert_eq!(start, Timestamp::ZERO);
        assert_eq!(clock.elapsed(start, end), Duration::ZERO);
    }

    #[test]
    fn test_stepping_clock() {
        let clock = ManualClock::with_step(Duration::from_millis(250));
        let start = clock.now();
        let end = clock.now();

        assert_eq!(clock.elapsed(start, end), Duration::from_millis(250));
        assert!((end.as_secs_f64() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_manual_advance() {
        let clock = ManualClock::frozen();
        let start = clock.now();
        clock.advance(Duration::from_secs(2));
        let end = clock.now();

        assert_eq!(clock.elapsed(start, end), Duration::from_secs(2));
    }
}
