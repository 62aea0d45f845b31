use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers collected during a journey, keyed by question id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<u32, String>);

impl AnswerMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record an answer, returning the value it replaced.
    pub fn record(&mut self, question_id: u32, answer: impl Into<String>) -> Option<String> {
        self.0.insert(question_id, answer.into())
    }

    #[must_use]
    pub fn get(&self, question_id: u32) -> Option<&str> {
        self.0.get(&question_id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, question_id: u32) -> bool {
        self.0.contains_key(&question_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(id, answer)| (*id, answer.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, answer)| (id, answer.into()))
                .collect(),
        )
    }
}
