use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Longest cosmetic delay accepted by [`JourneyTiming::validate`].
pub const MAX_DELAY_MS: u64 = 60_000;

/// Cosmetic delays applied between journey transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyTiming {
    #[serde(default = "JourneyTiming::default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "JourneyTiming::default_analyze_answers_ms")]
    pub analyze_answers_ms: u64,
    #[serde(default = "JourneyTiming::default_analyze_path_ms")]
    pub analyze_path_ms: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingConfigError {
    #[error("{field} must be at most {max} ms (got {value} ms)")]
    DelayTooLong {
        field: &'static str,
        max: u64,
        value: u64,
    },
}

impl JourneyTiming {
    const fn default_advance_delay_ms() -> u64 {
        300
    }

    const fn default_analyze_answers_ms() -> u64 {
        2_000
    }

    const fn default_analyze_path_ms() -> u64 {
        1_500
    }

    /// Timing with every delay removed; transitions still go through the
    /// pending-timer slot but fire on the next `advance`.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            advance_delay_ms: 0,
            analyze_answers_ms: 0,
            analyze_path_ms: 0,
        }
    }

    /// Parse timing overrides; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// # Errors
    ///
    /// Returns an error when a delay exceeds [`MAX_DELAY_MS`].
    pub fn validate(&self) -> Result<(), TimingConfigError> {
        let fields = [
            ("advance_delay_ms", self.advance_delay_ms),
            ("analyze_answers_ms", self.analyze_answers_ms),
            ("analyze_path_ms", self.analyze_path_ms),
        ];
        for (field, value) in fields {
            if value > MAX_DELAY_MS {
                return Err(TimingConfigError::DelayTooLong {
                    field,
                    max: MAX_DELAY_MS,
                    value,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    #[must_use]
    pub const fn analyze_answers_delay(&self) -> Duration {
        Duration::from_millis(self.analyze_answers_ms)
    }

    #[must_use]
    pub const fn analyze_path_delay(&self) -> Duration {
        Duration::from_millis(self.analyze_path_ms)
    }
}

impl Default for JourneyTiming {
    fn default() -> Self {
        Self {
            advance_delay_ms: Self::default_advance_delay_ms(),
            analyze_answers_ms: Self::default_analyze_answers_ms(),
            analyze_path_ms: Self::default_analyze_path_ms(),
        }
    }
}
