//! Run executor - timed init/execute/verify loop for one scenario

use std::hint::black_box;
use std::time::Duration;

use h1bench_core::{BenchError, BenchResult, MessageParser};
use h1bench_time::BenchClock;

use crate::Scenario;

/// Raw measurements of one scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub iterations: u64,
    pub bytes_per_iteration: u64,
    /// `iterations * bytes_per_iteration`
    pub total_bytes: u64,
    /// Wall time of the whole loop
    pub elapsed: Duration,
}

impl RunResult {
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Run `iterations` fresh parses of `scenario` and time the whole loop.
///
/// Every iteration builds a new parser, so no state carries over. The first
/// iteration whose consumption differs from the payload length aborts the
/// run with `BenchError::ConsumptionMismatch`. A byte total that does not
/// fit in `u64` is rejected before the loop starts.
pub fn run<P, C>(
    scenario: &Scenario<'_>,
    iterations: u64,
    settings: &P::Settings,
    clock: &C,
) -> BenchResult<RunResult>
where
    P: MessageParser,
    C: BenchClock,
{
    if iterations == 0 {
        return Err(BenchError::ZeroIterations);
    }

    let payload = scenario.payload;
    let expected = payload.len();
    let bytes_per_iteration = expected as u64;
    let total_bytes = iterations
        .checked_mul(bytes_per_iteration)
        .ok_or(BenchError::ByteCountOverflow {
            iterations,
            bytes: expected,
        })?;

    let start = clock.now();

    for iteration in 0..iterations {
        let mut parser = P::init(scenario.direction);
        let consumed = black_box(parser.execute(settings, black_box(payload)));

        if consumed != expected {
            return Err(BenchError::ConsumptionMismatch {
                scenario: scenario.name.to_string(),
                iteration,
                expected,
                consumed,
                detail: parser.failure(),
            });
        }
    }

    let end = clock.now();
    let elapsed = clock.elapsed(start, end);

    Ok(RunResult {
        iterations,
        bytes_per_iteration,
        total_bytes,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use h1bench_core::Direction;
    use h1bench_time::{ManualClock, MonotonicClock};
    use httparse::ParserConfig;
    use proptest::prelude::*;

    use crate::{HttpParser, POST_CHUNKED, SCENARIOS, SIMPLE_200_RESPONSE, SIMPLE_GET};

    thread_local! {
        static INITS: Cell<u64> = Cell::new(0);
    }

    /// Consumes one byte less than it is given
    struct ShortParser;

    impl MessageParser for ShortParser {
        type Settings = ();

        fn init(_: Direction) -> Self {
            INITS.with(|n| n.set(n.get() + 1));
            ShortParser
        }

        fn execute(&mut self, _: &(), data: &[u8]) -> usize {
            data.len().saturating_sub(1)
        }

        fn failure(&self) -> Option<String> {
            Some("stopped short".into())
        }
    }

    /// Only succeeds on its first execution, so it fails if ever reused
    struct SingleUseParser {
        used: bool,
    }

    impl MessageParser for SingleUseParser {
        type Settings = ();

        fn init(_: Direction) -> Self {
            SingleUseParser { used: false }
        }

        fn execute(&mut self, _: &(), data: &[u8]) -> usize {
            if std::mem::replace(&mut self.used, true) {
                0
            } else {
                data.len()
            }
        }
    }

    #[test]
    fn test_run_counts_bytes() {
        let result = run::<HttpParser, _>(
            &SIMPLE_GET,
            1_000,
            &ParserConfig::default(),
            &MonotonicClock::new(),
        )
        .unwrap();

        assert_eq!(result.iterations, 1_000);
        assert_eq!(result.bytes_per_iteration, 46);
        assert_eq!(result.total_bytes, 46_000);
    }

    #[test]
    fn test_run_uses_clock_once_around_loop() {
        let clock = ManualClock::with_step(Duration::from_millis(500));
        let result =
            run::<HttpParser, _>(&POST_CHUNKED, 10, &ParserConfig::default(), &clock).unwrap();

        assert_eq!(result.elapsed, Duration::from_millis(500));
        assert!((result.elapsed_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_frozen_clock_gives_zero_elapsed() {
        let result = run::<HttpParser, _>(
            &SIMPLE_200_RESPONSE,
            5,
            &ParserConfig::default(),
            &ManualClock::frozen(),
        )
        .unwrap();

        assert_eq!(result.elapsed, Duration::ZERO);
        assert_eq!(result.total_bytes, 5 * 19);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = run::<HttpParser, _>(
            &SIMPLE_GET,
            0,
            &ParserConfig::default(),
            &MonotonicClock::new(),
        );
        assert!(matches!(result, Err(BenchError::ZeroIterations)));
    }

    #[test]
    fn test_mismatch_aborts_on_first_iteration() {
        INITS.with(|n| n.set(0));
        let result = run::<ShortParser, _>(&SIMPLE_GET, 100, &(), &ManualClock::frozen());

        match result {
            Err(BenchError::ConsumptionMismatch {
                scenario,
                iteration,
                expected,
                consumed,
                detail,
            }) => {
                assert_eq!(scenario, SIMPLE_GET.name);
                assert_eq!(iteration, 0);
                assert_eq!(expected, 46);
                assert_eq!(consumed, 45);
                assert_eq!(detail.as_deref(), Some("stopped short"));
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
        assert_eq!(INITS.with(|n| n.get()), 1);
    }

    #[test]
    fn test_truncated_message_fails_real_parser() {
        // Declared buffer runs past the end of the message
        let mut payload = SIMPLE_GET.payload.to_vec();
        payload.extend_from_slice(b"\x00\x00\x00");
        let scenario = Scenario::new("padded", "Padded GET", Direction::Request, &payload);

        let result = run::<HttpParser, _>(
            &scenario,
            100_000,
            &ParserConfig::default(),
            &MonotonicClock::new(),
        );

        match result {
            Err(BenchError::ConsumptionMismatch {
                iteration,
                expected,
                consumed,
                detail,
                ..
            }) => {
                assert_eq!(iteration, 0);
                assert_eq!(expected, 49);
                assert_eq!(consumed, 46);
                assert_eq!(
                    detail.as_deref(),
                    Some("3 bytes follow the end of the message")
                );
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_byte_total_overflow_rejected_before_loop() {
        INITS.with(|n| n.set(0));
        let result = run::<ShortParser, _>(&SIMPLE_GET, u64::MAX, &(), &ManualClock::frozen());

        assert!(matches!(
            result,
            Err(BenchError::ByteCountOverflow { iterations: u64::MAX, bytes: 46 })
        ));
        assert_eq!(INITS.with(|n| n.get()), 0);
    }

    #[test]
    fn test_fresh_parser_every_iteration() {
        let result = run::<SingleUseParser, _>(&SIMPLE_GET, 50, &(), &ManualClock::frozen());
        assert_eq!(result.unwrap().total_bytes, 50 * 46);
    }

    #[test]
    fn test_run_is_repeatable() {
        let clock = MonotonicClock::new();
        for scenario in SCENARIOS {
            let a = run::<HttpParser, _>(scenario, 200, &ParserConfig::default(), &clock).unwrap();
            let b = run::<HttpParser, _>(scenario, 200, &ParserConfig::default(), &clock).unwrap();
            assert_eq!(a.total_bytes, b.total_bytes);
            assert_eq!(a.bytes_per_iteration, b.bytes_per_iteration);
        }
    }

    proptest! {
        #[test]
        fn prop_total_bytes_is_exact(which in 0usize..5, iterations in 1u64..300) {
            let scenario = &SCENARIOS[which];
            let result = run::<HttpParser, _>(
                scenario,
                iterations,
                &ParserConfig::default(),
                &ManualClock::frozen(),
            ).unwrap();

            prop_assert_eq!(result.total_bytes, iterations * scenario.len() as u64);
            prop_assert_eq!(result.iterations, iterations);
        }
    }
}
