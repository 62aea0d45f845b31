use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::catalog::CatalogError;

const DEFAULT_ROADMAP_DATA: &str = include_str!("../assets/data/roadmaps.json");

/// Roadmap used when a career has no dedicated plan.
pub const FALLBACK_CAREER_ID: &str = "software-engineer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub status: StepStatus,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<String>>,
}

/// Where a looked-up roadmap came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoadmapSource {
    Exact,
    Fallback { requested: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapLookup {
    pub steps: Vec<RoadmapStep>,
    pub source: RoadmapSource,
}

impl RoadmapLookup {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, RoadmapSource::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapCatalog {
    #[serde(default = "RoadmapCatalog::default_fallback")]
    pub fallback: String,
    #[serde(default)]
    pub roadmaps: BTreeMap<String, Vec<RoadmapStep>>,
}

impl Default for RoadmapCatalog {
    fn default() -> Self {
        Self {
            fallback: Self::default_fallback(),
            roadmaps: BTreeMap::new(),
        }
    }
}

impl RoadmapCatalog {
    fn default_fallback() -> String {
        FALLBACK_CAREER_ID.to_string()
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ROADMAP_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<RoadmapCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// Parse and validate a roadmap catalog.
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
    /// Returns an error if the fallback roadmap is missing, a roadmap is
    /// empty, or a roadmap does not start with its only `current` step.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.roadmaps.contains_key(&self.fallback) {
            return Err(CatalogError::MissingFallback {
                id: self.fallback.clone(),
            });
        }
        for (id, steps) in &self.roadmaps {
            let Some((first, rest)) = steps.split_first() else {
                return Err(CatalogError::EmptyRoadmap { id: id.clone() });
            };
            let extra_current = rest.iter().any(|s| s.status == StepStatus::Current);
            if first.status != StepStatus::Current || extra_current {
                return Err(CatalogError::MisplacedCurrentStep { id: id.clone() });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, career_id: &str) -> bool {
        self.roadmaps.contains_key(career_id)
    }

    /// Look up a roadmap, falling back to the default career when unknown.
    #[must_use]
    pub fn lookup(&self, career_id: &str) -> RoadmapLookup {
        if let Some(steps) = self.roadmaps.get(career_id) {
            return RoadmapLookup {
                steps: steps.clone(),
                source: RoadmapSource::Exact,
            };
        }
        RoadmapLookup {
            steps: self
                .roadmaps
                .get(&self.fallback)
                .cloned()
                .unwrap_or_default(),
            source: RoadmapSource::Fallback {
                requested: career_id.to_string(),
            },
        }
    }
}

/// Build the roadmap for a career from the built-in catalog.
#[must_use]
pub fn generate_roadmap(career_id: &str) -> Vec<RoadmapStep> {
    lookup_roadmap(career_id).steps
}

#[must_use]
pub fn lookup_roadmap(career_id: &str) -> RoadmapLookup {
    RoadmapCatalog::default_catalog().lookup(career_id)
}
