//! Similarity graph construction from raw scored pairs.

use std::collections::hash_map::Entry;

use dupliq_core::errors::ClusterError;
use dupliq_core::types::collections::{FxHashMap, SmallVec8};
use dupliq_core::types::SimilarityPair;
use tracing::debug;

/// A retained, deduplicated edge over dense node indices.
///
/// Invariant: the id at index `a` is lexicographically smaller than the id
/// at index `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetainedEdge {
    pub a: usize,
    pub b: usize,
    pub score: f64,
}

/// An undirected, deduplicated, thresholded similarity graph.
///
/// Question ids are interned to dense indices. Each unordered pair is
/// recorded once, keeping the maximum score observed for it; the retained
/// edge list is the evidence the metrics calculator folds over. The whole
/// structure is ephemeral, rebuilt from the flat pair list on every call
/// and discarded afterwards, so no graph state is shared between
/// invocations.
#[derive(Debug, Default)]
pub struct SimilarityGraph {
    nodes: Vec<String>,
    index_of: FxHashMap<String, usize>,
    adjacency: Vec<SmallVec8<usize>>,
    edges: Vec<RetainedEdge>,
}

impl SimilarityGraph {
    /// Build the thresholded graph, retaining pairs with `score >= threshold`.
    ///
    /// Ingestion policy, applied before the threshold comparison:
    /// non-finite scores carry no evidence and are dropped, finite scores
    /// are clamped into [0, 1], self-pairs are ignored, and repeats of an
    /// unordered pair (including reversed order) collapse to the maximum
    /// score seen.
    ///
    /// # Errors
    /// `threshold` outside [0, 1] or NaN.
    pub fn build(pairs: &[SimilarityPair], threshold: f64) -> Result<Self, ClusterError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ClusterError::InvalidThreshold { value: threshold });
        }
        Ok(Self::build_retained(pairs, threshold))
    }

    /// Build the threshold-free evidence graph under the same ingestion
    /// policy. Used where metrics must reflect whatever is known about a
    /// member set, however sparse (merges, exclusions, accepted proposals).
    pub fn evidence(pairs: &[SimilarityPair]) -> Self {
        Self::build_retained(pairs, 0.0)
    }

    fn build_retained(pairs: &[SimilarityPair], threshold: f64) -> Self {
        let mut graph = Self::default();
        let mut edge_slots: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        let mut dropped_non_finite = 0usize;
        let mut dropped_self = 0usize;

        for pair in pairs {
            if !pair.score.is_finite() {
                dropped_non_finite += 1;
                continue;
            }
            if pair.is_self_pair() {
                dropped_self += 1;
                continue;
            }
            let score = pair.score.clamp(0.0, 1.0);
            if score < threshold {
                continue;
            }
            let (low, high) = pair.unordered_key();
            let a = graph.intern(low);
            let b = graph.intern(high);
            match edge_slots.entry((a, b)) {
                // repeated observation of the same pair: keep the strongest
                Entry::Occupied(slot) => {
                    let edge = &mut graph.edges[*slot.get()];
                    if score > edge.score {
                        edge.score = score;
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(graph.edges.len());
                    graph.edges.push(RetainedEdge { a, b, score });
                    graph.adjacency[a].push(b);
                    graph.adjacency[b].push(a);
                }
            }
        }

        // Canonical edge order keeps downstream float folds reproducible
        // regardless of how the input pairs were ordered.
        let nodes = &graph.nodes;
        graph.edges.sort_unstable_by(|x, y| {
            nodes[x.a]
                .cmp(&nodes[y.a])
                .then_with(|| nodes[x.b].cmp(&nodes[y.b]))
        });

        debug!(
            pairs = pairs.len(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            dropped_non_finite,
            dropped_self,
            threshold,
            "built similarity graph"
        );

        graph
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index_of.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index_of.insert(id.to_string(), idx);
        self.adjacency.push(SmallVec8::new());
        idx
    }

    /// Number of nodes with at least one retained edge.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of retained unordered edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Question id at a dense node index.
    pub fn node(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Dense index of a question id, if it has any retained edge.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_of.get(id).copied()
    }

    /// Neighbors of a node, as dense indices.
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Retained edges in canonical (id-sorted) order.
    pub fn edges(&self) -> &[RetainedEdge] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str, score: f64) -> SimilarityPair {
        SimilarityPair::new(a, b, score)
    }

    #[test]
    fn test_empty_input_builds_empty_graph() {
        let graph = SimilarityGraph::build(&[], 0.85).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_threshold_filters_edges() {
        let pairs = vec![pair("q1", "q2", 0.9), pair("q2", "q3", 0.5)];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.index_of("q3").is_none());
    }

    #[test]
    fn test_self_pairs_dropped() {
        let pairs = vec![pair("q1", "q1", 0.99), pair("q1", "q2", 0.9)];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_duplicate_pairs_keep_max_score() {
        let pairs = vec![
            pair("q1", "q2", 0.86),
            pair("q2", "q1", 0.92),
            pair("q1", "q2", 0.88),
        ];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].score, 0.92);
    }

    #[test]
    fn test_non_finite_scores_dropped() {
        let pairs = vec![
            pair("q1", "q2", f64::NAN),
            pair("q1", "q2", f64::INFINITY),
            pair("q2", "q3", 0.9),
        ];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.index_of("q1").is_none());
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        let pairs = vec![pair("q1", "q2", 1.7), pair("q3", "q4", -0.3)];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].score, 1.0);
        let evidence = SimilarityGraph::evidence(&pairs);
        assert_eq!(evidence.edge_count(), 2);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(SimilarityGraph::build(&[], bad).is_err());
        }
    }

    #[test]
    fn test_edges_in_canonical_order() {
        let pairs = vec![
            pair("q9", "q5", 0.9),
            pair("q3", "q1", 0.9),
            pair("q1", "q2", 0.9),
        ];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        let keys: Vec<(&str, &str)> = graph
            .edges()
            .iter()
            .map(|e| (graph.node(e.a), graph.node(e.b)))
            .collect();
        assert_eq!(keys, vec![("q1", "q2"), ("q1", "q3"), ("q5", "q9")]);
    }

    #[test]
    fn test_neighbors_reflect_retained_edges() {
        let pairs = vec![pair("q1", "q2", 0.9), pair("q1", "q3", 0.9)];
        let graph = SimilarityGraph::build(&pairs, 0.85).unwrap();
        let q1 = graph.index_of("q1").unwrap();
        let mut ids: Vec<&str> = graph
            .neighbors(q1)
            .iter()
            .map(|&n| graph.node(n))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["q2", "q3"]);
    }
}
