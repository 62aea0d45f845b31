//! Shared validation for the static journey catalogs.
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised when a catalog violates its structural invariants.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{kind} catalog is empty")]
    EmptyCatalog { kind: &'static str },
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("question {id} has no answer options")]
    EmptyOptions { id: u32 },
    #[error("career id `{id}` is not kebab-case")]
    InvalidCareerId { id: String },
    #[error("career `{id}` has match score {score} (max 100)")]
    MatchScoreOutOfRange { id: String, score: u8 },
    #[error("roadmap catalog is missing its fallback roadmap `{id}`")]
    MissingFallback { id: String },
    #[error("roadmap `{id}` is empty")]
    EmptyRoadmap { id: String },
    #[error("roadmap `{id}` must start at a current step and have only one")]
    MisplacedCurrentStep { id: String },
}

fn kebab_case() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").ok())
        .as_ref()
}

#[must_use]
pub fn is_kebab_case_id(id: &str) -> bool {
    kebab_case().is_some_and(|re| re.is_match(id))
}
