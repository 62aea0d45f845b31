use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenario::{ScenarioCtx, TestScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    /// Stage the journey ended on in the last successful iteration.
    #[serde(default)]
    pub final_stage: Option<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    ctx: ScenarioCtx,
}

impl LogicTester {
    pub const fn new(ctx: ScenarioCtx) -> Self {
        Self { ctx }
    }

    pub fn run_scenario(&self, scenario: &TestScenario, iterations: usize) -> ScenarioResult {
        if self.ctx.verbose {
            println!(
                "🧪 Testing scenario: {} ({} iterations)",
                scenario.name.bright_white(),
                iterations
            );
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();
        let mut final_stage = None;

        for i in 0..iterations {
            let start_time = Instant::now();
            match (scenario.run)(&self.ctx) {
                Ok(snapshot) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    final_stage = Some(snapshot.state.stage.to_string());
                    if self.ctx.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) stage:{} answers:{}",
                            i + 1,
                            iterations,
                            snapshot.state.stage,
                            snapshot.state.answers.len()
                        );
                    }
                }
                Err(err) => {
                    log::debug!("{} iteration {} failed: {err:#}", scenario.key, i + 1);
                    if self.ctx.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            format!("{err:#}").red()
                        );
                    }
                    failures.push(format!("Iteration {}: {err:#}", i + 1));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(u32::MAX)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            passed: failures.is_empty() && iterations > 0,
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            final_stage,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_micros())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Duration::from_micros(micros))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::get_scenario;
    use pathwise_core::JourneyTiming;

    #[test]
    fn run_scenario_counts_iterations() {
        let tester = LogicTester::new(ScenarioCtx::new(JourneyTiming::default()));
        let scenario = get_scenario("full-journey").unwrap();
        let result = tester.run_scenario(&scenario, 3);
        assert!(result.passed, "{:?}", result.failures);
        assert_eq!(result.iterations_run, 3);
        assert_eq!(result.successful_iterations, 3);
        assert_eq!(result.final_stage.as_deref(), Some("roadmap"));
    }

    #[test]
    fn zero_iterations_never_pass() {
        let tester = LogicTester::new(ScenarioCtx::new(JourneyTiming::instant()));
        let scenario = get_scenario("smoke").unwrap();
        let result = tester.run_scenario(&scenario, 0);
        assert!(!result.passed);
        assert_eq!(result.average_duration, Duration::ZERO);
    }

    #[test]
    fn results_serialize_durations_as_micros() {
        let result = ScenarioResult {
            scenario_name: String::from("Smoke Test"),
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            final_stage: Some(String::from("questions")),
            average_duration: Duration::from_millis(2),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["average_duration"], 2_000);
        let back: ScenarioResult = serde_json::from_value(value).unwrap();
        assert_eq!(back.average_duration, Duration::from_millis(2));
    }
}
