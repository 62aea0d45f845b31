//! Pathwise Journey Engine
//!
//! Platform-agnostic core logic for the Pathwise career assessment journey.
//! This crate provides the stage machine and the mock recommendation and
//! roadmap generators without UI or platform-specific dependencies.

pub mod answers;
pub mod careers;
pub mod catalog;
pub mod data;
pub mod journey;
pub mod questions;
pub mod roadmap;
pub mod stage;
pub mod timing;

use std::sync::Arc;

// Re-export commonly used types
pub use answers::AnswerMap;
pub use careers::{CareerCatalog, CareerPath, Demand, generate_career_paths};
pub use catalog::CatalogError;
pub use data::JourneyData;
#[cfg(feature = "async")]
pub use journey::JourneyDriver;
pub use journey::{
    DeferredAction, JourneyEvent, JourneySnapshot, JourneyState, JourneyStore, PendingSnapshot,
    TimerTicket,
};
pub use questions::{JourneyQuestion, QuestionBank};
pub use roadmap::{
    FALLBACK_CAREER_ID, RoadmapCatalog, RoadmapLookup, RoadmapSource, RoadmapStep, StepStatus,
    generate_roadmap, lookup_roadmap,
};
pub use stage::{JourneyEntry, Stage, StageParseError};
pub use timing::{JourneyTiming, TimingConfigError};

/// Trait for abstracting catalog loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the question bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the questions cannot be loaded.
    fn load_questions(&self) -> Result<QuestionBank, Self::Error>;

    /// Load the career catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the careers cannot be loaded.
    fn load_careers(&self) -> Result<CareerCatalog, Self::Error>;

    /// Load the roadmap catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the roadmaps cannot be loaded.
    fn load_roadmaps(&self) -> Result<RoadmapCatalog, Self::Error>;
}

/// Loader backed by the catalogs embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLoader;

impl DataLoader for StaticLoader {
    type Error = CatalogError;

    fn load_questions(&self) -> Result<QuestionBank, Self::Error> {
        let bank = QuestionBank::default_bank().clone();
        bank.validate()?;
        Ok(bank)
    }

    fn load_careers(&self) -> Result<CareerCatalog, Self::Error> {
        let catalog = CareerCatalog::default_catalog().clone();
        catalog.validate()?;
        Ok(catalog)
    }

    fn load_roadmaps(&self) -> Result<RoadmapCatalog, Self::Error> {
        let catalog = RoadmapCatalog::default_catalog().clone();
        catalog.validate()?;
        Ok(catalog)
    }
}

/// Builds journey stores from a data source
pub struct JourneyEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
    timing: JourneyTiming,
}

impl<L> JourneyEngine<L>
where
    L: DataLoader,
{
    /// Create a new engine with the provided data loader and default timing
    pub fn new(data_loader: L) -> Self {
        Self {
            data_loader,
            timing: JourneyTiming::default(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: JourneyTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub const fn timing(&self) -> &JourneyTiming {
        &self.timing
    }

    /// Load every catalog through the data loader.
    ///
    /// # Errors
    ///
    /// Returns an error if any catalog cannot be loaded.
    pub fn load_data(&self) -> Result<JourneyData, L::Error> {
        Ok(JourneyData::new(
            self.data_loader.load_questions()?,
            self.data_loader.load_careers()?,
            self.data_loader.load_roadmaps()?,
        ))
    }

    /// Create a fresh journey positioned at the hub.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogs cannot be loaded.
    pub fn create_store(&self) -> Result<JourneyStore, L::Error> {
        let data = self.load_data()?;
        Ok(JourneyStore::new(Arc::new(data), self.timing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_questions(&self) -> Result<QuestionBank, Self::Error> {
            Ok(QuestionBank {
                questions: vec![JourneyQuestion {
                    id: 42,
                    question: String::from("Only question?"),
                    options: vec![String::from("Yes")],
                }],
            })
        }

        fn load_careers(&self) -> Result<CareerCatalog, Self::Error> {
            Ok(CareerCatalog::default_catalog().clone())
        }

        fn load_roadmaps(&self) -> Result<RoadmapCatalog, Self::Error> {
            Ok(RoadmapCatalog::default_catalog().clone())
        }
    }

    #[test]
    fn engine_builds_stores_from_loader() {
        let engine = JourneyEngine::new(FixtureLoader).with_timing(JourneyTiming::instant());
        let mut store = engine.create_store().unwrap();
        assert_eq!(store.stage(), Stage::Hub);

        store.start_journey(JourneyEntry::Questions);
        store.select_answer(42, "Yes");
        assert_eq!(store.stage(), Stage::Analyzing);
        store.advance(std::time::Duration::ZERO);
        assert_eq!(store.stage(), Stage::Paths);
        assert_eq!(store.progress(), (1, 1));
    }

    #[test]
    fn static_loader_yields_default_tables() {
        let engine = JourneyEngine::new(StaticLoader);
        let data = engine.load_data().unwrap();
        assert_eq!(data, *JourneyData::shared_default());
        assert_eq!(engine.timing(), &JourneyTiming::default());
    }
}
