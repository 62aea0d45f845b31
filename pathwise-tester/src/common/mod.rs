use anyhow::{Context, Result};
use pathwise_core::JourneyTiming;
use std::path::Path;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Load timing overrides from a JSON file, or the defaults when absent.
pub fn load_timing(path: Option<&Path>) -> Result<JourneyTiming> {
    let Some(path) = path else {
        return Ok(JourneyTiming::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read timing config {}", path.display()))?;
    let timing = JourneyTiming::from_json(&raw)
        .with_context(|| format!("failed to parse timing config {}", path.display()))?;
    timing
        .validate()
        .with_context(|| format!("invalid timing config {}", path.display()))?;
    Ok(timing)
}
