//! Aggregate similarity metrics over a member set.

use dupliq_core::types::collections::FxHashSet;

use crate::graph::SimilarityGraph;

/// The avg/min/max similarity statistics carried by a cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterMetrics {
    pub avg_similarity: f64,
    pub max_similarity: f64,
    pub min_similarity: f64,
}

impl ClusterMetrics {
    /// Zeroed metrics, the defensive default for evidence-free member sets.
    pub const ZERO: Self = Self {
        avg_similarity: 0.0,
        max_similarity: 0.0,
        min_similarity: 0.0,
    };

    /// Fold a score sequence into avg/min/max.
    ///
    /// An empty sequence yields zeros. A missing edge is absent evidence,
    /// never an implicit score of 0, so the average covers only the edges
    /// that exist, not the theoretical complete graph of the member set.
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for score in scores {
            count += 1;
            sum += score;
            max = max.max(score);
            min = min.min(score);
        }
        if count == 0 {
            return Self::ZERO;
        }
        Self {
            avg_similarity: sum / count as f64,
            max_similarity: max,
            min_similarity: min,
        }
    }

    /// Metrics over the retained edges whose both endpoints are in
    /// `members`. Edges leaving the member set contribute nothing.
    pub fn for_member_ids(graph: &SimilarityGraph, members: &FxHashSet<&str>) -> Self {
        Self::from_scores(
            graph
                .edges()
                .iter()
                .filter(|e| {
                    members.contains(graph.node(e.a)) && members.contains(graph.node(e.b))
                })
                .map(|e| e.score),
        )
    }
}
