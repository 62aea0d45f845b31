use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::catalog::CatalogError;

const DEFAULT_QUESTION_DATA: &str = include_str!("../assets/data/questions.json");

/// A multiple-choice question asked during the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
}

impl JourneyQuestion {
    #[must_use]
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|option| option == answer)
    }
}

/// Ordered, immutable list of journey questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestionBank {
    #[serde(default)]
    pub questions: Vec<JourneyQuestion>,
}

impl QuestionBank {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_QUESTION_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_bank() -> &'static Self {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(Self::load_from_static)
    }

    /// Parse and validate a question bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the bank is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let bank: Self = serde_json::from_str(json)?;
        bank.validate()?;
        Ok(bank)
    }

    /// # Errors
    ///
    /// Returns an error on duplicate ids or a question with no options.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.questions.is_empty() {
            return Err(CatalogError::EmptyCatalog { kind: "question" });
        }
        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "question",
                    id: question.id.to_string(),
                });
            }
            if question.options.is_empty() {
                return Err(CatalogError::EmptyOptions { id: question.id });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&JourneyQuestion> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn get_by_id(&self, id: u32) -> Option<&JourneyQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Whether `index` points at the final question. An empty bank treats
    /// every index as final so answering always completes the journey.
    #[must_use]
    pub fn is_last_index(&self, index: usize) -> bool {
        index.saturating_add(1) >= self.questions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JourneyQuestion> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a JourneyQuestion;
    type IntoIter = std::slice::Iter<'a, JourneyQuestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
