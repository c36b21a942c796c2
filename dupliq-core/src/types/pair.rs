//! Scored similarity pairs produced by the external vector-similarity search.

use serde::{Deserialize, Serialize};

/// An unordered edge candidate between two questions.
///
/// `score` is a similarity in [0, 1], higher meaning more similar. The same
/// unordered pair may appear multiple times or in reversed order, and
/// self-pairs (`a_id == b_id`) may occur; the ingestion boundary tolerates
/// both without corrupting results. Pairs are immutable inputs supplied
/// fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub a_id: String,
    pub b_id: String,
    pub score: f64,
}

impl SimilarityPair {
    pub fn new(a_id: impl Into<String>, b_id: impl Into<String>, score: f64) -> Self {
        Self {
            a_id: a_id.into(),
            b_id: b_id.into(),
            score,
        }
    }

    /// True when both endpoints name the same question.
    pub fn is_self_pair(&self) -> bool {
        self.a_id == self.b_id
    }

    /// Canonical unordered key: endpoints in lexicographic order.
    pub fn unordered_key(&self) -> (&str, &str) {
        if self.a_id <= self.b_id {
            (&self.a_id, &self.b_id)
        } else {
            (&self.b_id, &self.a_id)
        }
    }
}
