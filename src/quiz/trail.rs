use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The session-scoped record of chosen answers, keyed by question name.
///
/// The trail lives client-side as a single JSON object and is
/// read-modified-written on every answer. Re-answering a question
/// overwrites the previous choice; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerTrail {
    entries: BTreeMap<String, String>,
}

impl AnswerTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for a question. Last write wins per question name.
    pub fn record(&mut self, question: &str, answer: &str) {
        self.entries
            .insert(question.to_string(), answer.to_string());
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries.get(question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
