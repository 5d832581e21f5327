//! Harness driver - runs every scenario in order and collects outcomes

use std::fmt;
use std::io::Write;

use h1bench_core::{BenchError, BenchResult, MessageParser};
use h1bench_time::MonotonicClock;
use httparse::ParserConfig;
use tracing::{debug, error, info};

use crate::{
    executor, report, validate_registry, HarnessConfig, HttpParser, RunResult, Scenario, SCENARIOS,
};

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub id: String,
    pub name: String,
    pub result: BenchResult<RunResult>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a full harness run, in run order
#[derive(Debug, Default)]
pub struct HarnessSummary {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl HarnessSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Did every consumption check pass?
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

impl fmt::Display for HarnessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scenarios, {} passed, {} failed",
            self.total(),
            self.passed(),
            self.failed()
        )
    }
}

/// Runs scenarios against a parser type, one after another.
///
/// The parser settings are built once and lent read-only to every
/// iteration of every scenario.
pub struct Harness<'a, P: MessageParser = HttpParser> {
    config: HarnessConfig,
    scenarios: &'a [Scenario<'a>],
    settings: P::Settings,
    clock: MonotonicClock,
}

impl Harness<'static, HttpParser> {
    /// Standard scenarios against `HttpParser` with the default `httparse` config
    pub fn new(config: HarnessConfig) -> Self {
        Harness::with_parts(config, SCENARIOS, ParserConfig::default())
    }
}

impl<'a, P: MessageParser> Harness<'a, P> {
    pub fn with_parts(
        config: HarnessConfig,
        scenarios: &'a [Scenario<'a>],
        settings: P::Settings,
    ) -> Self {
        Harness {
            config,
            scenarios,
            settings,
            clock: MonotonicClock::new(),
        }
    }

    /// Run one scenario and write its report
    pub fn run_one<W: Write>(&self, scenario: &Scenario<'_>, out: &mut W) -> BenchResult<RunResult> {
        info!(scenario = scenario.name, "starting performance test");
        debug!(
            id = scenario.id,
            direction = %scenario.direction,
            bytes = scenario.len(),
            iterations = self.config.iterations,
            "run parameters"
        );

        let run = match executor::run::<P, _>(
            scenario,
            self.config.iterations,
            &self.settings,
            &self.clock,
        ) {
            Ok(run) => run,
            Err(err) => {
                error!(scenario = scenario.name, error = %err, "performance test failed");
                return Err(err);
            }
        };

        let block = report(scenario.name, run.iterations, scenario.len(), &run)?;
        writeln!(out, "{block}\n")?;

        info!(scenario = scenario.name, "finished performance test");
        Ok(run)
    }

    /// Run every scenario in registry order.
    ///
    /// A consumption mismatch fails that scenario only; later scenarios
    /// still run. Registry, configuration and output errors abort.
    pub fn run_all<W: Write>(&self, out: &mut W) -> BenchResult<HarnessSummary> {
        validate_registry(self.scenarios)?;
        self.run_list(self.scenarios, out)
    }

    /// Run only the scenarios with the given ids, in the order given
    pub fn run_selected<W, S>(&self, ids: &[S], out: &mut W) -> BenchResult<HarnessSummary>
    where
        W: Write,
        S: AsRef<str>,
    {
        validate_registry(self.scenarios)?;

        let selected = ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.scenarios
                    .iter()
                    .find(|s| s.id == id)
                    .ok_or_else(|| BenchError::UnknownScenario(id.to_string()))
            })
            .collect::<BenchResult<Vec<_>>>()?;

        self.run_list(selected, out)
    }

    fn run_list<W, I>(&self, scenarios: I, out: &mut W) -> BenchResult<HarnessSummary>
    where
        W: Write,
        I: IntoIterator<Item = &'a Scenario<'a>>,
    {
        self.config.validate()?;

        let mut summary = HarnessSummary::default();
        for scenario in scenarios {
            let result = match self.run_one(scenario, out) {
                Err(err) if !err.is_consumption_mismatch() => return Err(err),
                result => result,
            };

            summary.outcomes.push(ScenarioOutcome {
                id: scenario.id.to_string(),
                name: scenario.name.to_string(),
                result,
            });
        }

        info!(
            total = summary.total(),
            passed = summary.passed(),
            failed = summary.failed(),
            "harness run complete"
        );
        Ok(summary)
    }
}
