//! Materialized question clusters with aggregate metrics and curation state.

use serde::{Deserialize, Serialize};

/// Curation lifecycle of a cluster.
///
/// Freshly assembled clusters start at `Pending`; the other states are
/// reached through curation actions and return to `Pending` via reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStatus {
    #[default]
    Pending,
    ApprovedDuplicates,
    ApprovedVariants,
    Split,
}

/// A grouping of near-duplicate questions.
///
/// `id` is derived from the sorted membership, so identical membership
/// always yields the identical id across regenerations (upsert-by-id safe).
/// Clusters are values: the engine never mutates one in place, every
/// mutator and curation action returns a fresh cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCluster {
    pub id: String,
    /// Unique member question ids, kept in lexicographic order.
    pub question_ids: Vec<String>,
    pub avg_similarity: f64,
    pub max_similarity: f64,
    pub min_similarity: f64,
    #[serde(default)]
    pub status: ClusterStatus,
    #[serde(default)]
    pub flagged_for_review: bool,
    /// Incremental-growth candidates awaiting curation, score-ranked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proposed_additions: Vec<String>,
    /// The member kept as canonical when duplicates are approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_question_id: Option<String>,
}

impl QuestionCluster {
    /// Number of member questions.
    pub fn member_count(&self) -> usize {
        self.question_ids.len()
    }

    /// True when `id` is a member question.
    pub fn contains(&self, id: &str) -> bool {
        self.question_ids.iter().any(|q| q == id)
    }
}
