//! Mock career recommendations.
//!
//! Recommendations come from a fixed catalog with pre-authored match scores.
//! Collected answers are accepted but do not influence the result.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::answers::AnswerMap;
use crate::catalog::{CatalogError, is_kebab_case_id};

const DEFAULT_CAREER_DATA: &str = include_str!("../assets/data/careers.json");

/// Labour-market demand shown on a career card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Demand {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
}

impl Demand {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

impl std::fmt::Display for Demand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub id: String,
    pub title: String,
    pub description: String,
    pub match_score: u8,
    #[serde(default)]
    pub skills: Vec<String>,
    pub salary: String,
    pub demand: Demand,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CareerCatalog {
    #[serde(default)]
    pub careers: Vec<CareerPath>,
}

impl CareerCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CAREER_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<CareerCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// Parse and validate a career catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// # Errors
    ///
    /// Returns an error on malformed or duplicate ids, or a score above 100.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.careers.is_empty() {
            return Err(CatalogError::EmptyCatalog { kind: "career" });
        }
        let mut seen = HashSet::with_capacity(self.careers.len());
        for career in &self.careers {
            if !is_kebab_case_id(&career.id) {
                return Err(CatalogError::InvalidCareerId {
                    id: career.id.clone(),
                });
            }
            if !seen.insert(career.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "career",
                    id: career.id.clone(),
                });
            }
            if career.match_score > 100 {
                return Err(CatalogError::MatchScoreOutOfRange {
                    id: career.id.clone(),
                    score: career.match_score,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&CareerPath> {
        self.careers.iter().find(|c| c.id == id)
    }

    /// Produce recommendations ordered by descending match score.
    ///
    /// Ties keep catalog order.
    #[must_use]
    pub fn recommend(&self, _answers: &AnswerMap) -> Vec<CareerPath> {
        let mut paths = self.careers.clone();
        paths.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        paths
    }
}

/// Recommend careers from the built-in catalog.
#[must_use]
pub fn generate_career_paths(answers: &AnswerMap) -> Vec<CareerPath> {
    CareerCatalog::default_catalog().recommend(answers)
}
