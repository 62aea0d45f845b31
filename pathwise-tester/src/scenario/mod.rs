use anyhow::Result;
use pathwise_core::{JourneyData, JourneySnapshot, JourneyStore, JourneyTiming};
use std::sync::Arc;

mod driver;
mod flows;

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub data: Arc<JourneyData>,
    pub timing: JourneyTiming,
    /// Run the tokio driver on the configured delays instead of instant timing.
    pub realtime: bool,
    pub verbose: bool,
}

impl ScenarioCtx {
    pub fn new(timing: JourneyTiming) -> Self {
        Self {
            data: JourneyData::shared_default(),
            timing,
            realtime: false,
            verbose: false,
        }
    }

    pub fn store(&self) -> JourneyStore {
        JourneyStore::new(Arc::clone(&self.data), self.timing)
    }
}

pub type ScenarioFn = fn(&ScenarioCtx) -> Result<JourneySnapshot>;

#[derive(Debug, Clone, Copy)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    aliases: &'static [&'static str],
    pub run: ScenarioFn,
}

const SCENARIOS: [TestScenario; 8] = [
    TestScenario {
        key: "smoke",
        name: "Smoke Test",
        aliases: &[],
        run: flows::smoke,
    },
    TestScenario {
        key: "full-journey",
        name: "Full Journey: Questions to Roadmap",
        aliases: &["full"],
        run: flows::full_journey,
    },
    TestScenario {
        key: "direct-paths",
        name: "Direct Entry at Career Paths",
        aliases: &["paths"],
        run: flows::direct_paths,
    },
    TestScenario {
        key: "direct-roadmap",
        name: "Direct Entry at Roadmap",
        aliases: &["roadmap"],
        run: flows::direct_roadmap,
    },
    TestScenario {
        key: "fallback-roadmap",
        name: "Roadmap Fallback for Unmapped Career",
        aliases: &["fallback"],
        run: flows::fallback_roadmap,
    },
    TestScenario {
        key: "reset-mid-analysis",
        name: "Reset While Analyzing",
        aliases: &["reset"],
        run: flows::reset_mid_analysis,
    },
    TestScenario {
        key: "answer-overwrite",
        name: "Answer Overwrite Keeps Last Value",
        aliases: &["overwrite"],
        run: flows::answer_overwrite,
    },
    TestScenario {
        key: "driver-journey",
        name: "Async Driver Journey",
        aliases: &["driver"],
        run: driver::driver_journey,
    },
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = name.trim().to_lowercase();
    SCENARIOS
        .iter()
        .find(|s| s.key == key || s.aliases.contains(&key.as_str()))
        .copied()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.name)).collect()
}

pub fn all_scenario_keys() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.key.to_string()).collect()
}
