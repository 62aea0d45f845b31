use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Discrete phase of the guided journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    Hub,
    Questions,
    Analyzing,
    Paths,
    Roadmap,
    Quiz,
    EnhancedQuiz,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Self::Hub,
        Self::Questions,
        Self::Analyzing,
        Self::Paths,
        Self::Roadmap,
        Self::Quiz,
        Self::EnhancedQuiz,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hub => "hub",
            Self::Questions => "questions",
            Self::Analyzing => "analyzing",
            Self::Paths => "paths",
            Self::Roadmap => "roadmap",
            Self::Quiz => "quiz",
            Self::EnhancedQuiz => "enhanced-quiz",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown journey stage `{0}`")]
pub struct StageParseError(pub String);

impl FromStr for Stage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|stage| stage.key() == key)
            .ok_or_else(|| StageParseError(s.to_string()))
    }
}

/// Stages a journey can be entered at directly from the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyEntry {
    Questions,
    Paths,
    Roadmap,
    Quiz,
    EnhancedQuiz,
}

impl From<JourneyEntry> for Stage {
    fn from(entry: JourneyEntry) -> Self {
        match entry {
            JourneyEntry::Questions => Self::Questions,
            JourneyEntry::Paths => Self::Paths,
            JourneyEntry::Roadmap => Self::Roadmap,
            JourneyEntry::Quiz => Self::Quiz,
            JourneyEntry::EnhancedQuiz => Self::EnhancedQuiz,
        }
    }
}

impl TryFrom<Stage> for JourneyEntry {
    type Error = StageParseError;

    fn try_from(stage: Stage) -> Result<Self, Self::Error> {
        match stage {
            Stage::Questions => Ok(Self::Questions),
            Stage::Paths => Ok(Self::Paths),
            Stage::Roadmap => Ok(Self::Roadmap),
            Stage::Quiz => Ok(Self::Quiz),
            Stage::EnhancedQuiz => Ok(Self::EnhancedQuiz),
            Stage::Hub | Stage::Analyzing => Err(StageParseError(stage.key().to_string())),
        }
    }
}

impl FromStr for JourneyEntry {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Stage>()
            .and_then(Self::try_from)
            .map_err(|_| StageParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_keys_round_trip_through_parse() {
        for stage in Stage::ALL {
            assert_eq!(stage.key().parse::<Stage>(), Ok(stage));
        }
        assert_eq!(" Enhanced-Quiz ".parse::<Stage>(), Ok(Stage::EnhancedQuiz));
        assert_eq!(
            "lobby".parse::<Stage>(),
            Err(StageParseError(String::from("lobby")))
        );
        assert_eq!(Stage::default(), Stage::Hub);
    }

    #[test]
    fn entries_exclude_hub_and_analyzing() {
        assert_eq!("paths".parse::<JourneyEntry>(), Ok(JourneyEntry::Paths));
        assert!("hub".parse::<JourneyEntry>().is_err());
        assert!("analyzing".parse::<JourneyEntry>().is_err());
        assert_eq!(Stage::from(JourneyEntry::EnhancedQuiz), Stage::EnhancedQuiz);
    }

    #[test]
    fn serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Stage::EnhancedQuiz).unwrap(),
            r#""enhanced-quiz""#
        );
    }
}
