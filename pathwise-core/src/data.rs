use std::sync::{Arc, OnceLock};

use crate::careers::CareerCatalog;
use crate::catalog::CatalogError;
use crate::questions::QuestionBank;
use crate::roadmap::RoadmapCatalog;

/// Static tables a journey reads from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JourneyData {
    pub questions: QuestionBank,
    pub careers: CareerCatalog,
    pub roadmaps: RoadmapCatalog,
}

impl JourneyData {
    #[must_use]
    pub fn new(questions: QuestionBank, careers: CareerCatalog, roadmaps: RoadmapCatalog) -> Self {
        Self {
            questions,
            careers,
            roadmaps,
        }
    }

    /// Load the embedded catalogs.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self {
            questions: QuestionBank::default_bank().clone(),
            careers: CareerCatalog::default_catalog().clone(),
            roadmaps: RoadmapCatalog::default_catalog().clone(),
        }
    }

    /// Shared handle to the embedded catalogs.
    #[must_use]
    pub fn shared_default() -> Arc<Self> {
        static DATA: OnceLock<Arc<JourneyData>> = OnceLock::new();
        Arc::clone(DATA.get_or_init(|| Arc::new(Self::load_from_static())))
    }

    /// # Errors
    ///
    /// Returns the first invariant violation found across the three catalogs.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.questions.validate()?;
        self.careers.validate()?;
        self.roadmaps.validate()
    }
}
