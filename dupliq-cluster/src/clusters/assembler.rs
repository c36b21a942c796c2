//! Cluster assembly: raw scored pairs to ranked cluster values.

use dupliq_core::errors::ClusterError;
use dupliq_core::types::collections::SmallVec8;
use dupliq_core::types::{ClusterStatus, QuestionCluster, SimilarityPair};
use tracing::debug;

use crate::clusters::identity::cluster_id;
use crate::clusters::metrics::ClusterMetrics;
use crate::graph::{connected_components, SimilarityGraph};

/// Group questions into clusters of near-duplicates.
///
/// Pipeline: threshold-filtered graph, union-find components, minimum-size
/// filter, then per-cluster metrics and deterministic ids. The returned
/// list is sorted by member count descending, ties by average similarity
/// descending, then id ascending, so identical inputs (in any pair order,
/// with any duplication) produce the identical output.
///
/// Every pair-shaped degeneracy (empty input, self-pairs, duplicates,
/// sub-threshold scores) produces a well-defined, possibly empty result.
///
/// # Errors
/// `threshold` outside [0, 1] or NaN, or `min_cluster_size` of 0.
pub fn cluster_questions_by_similarity(
    pairs: &[SimilarityPair],
    min_cluster_size: usize,
    threshold: f64,
) -> Result<Vec<QuestionCluster>, ClusterError> {
    if min_cluster_size == 0 {
        return Err(ClusterError::InvalidMinClusterSize {
            value: min_cluster_size,
        });
    }

    let graph = SimilarityGraph::build(pairs, threshold)?;
    let components = connected_components(&graph);

    // Every retained edge is internal to exactly one component, so one
    // pass groups the metric evidence. Edge order is canonical, keeping
    // the float folds reproducible.
    let mut scores_per_slot: Vec<SmallVec8<f64>> =
        vec![SmallVec8::new(); components.len()];
    for edge in graph.edges() {
        scores_per_slot[components.membership()[edge.a]].push(edge.score);
    }

    let mut clusters = Vec::new();
    for (slot, component) in components.components().iter().enumerate() {
        if component.len() < min_cluster_size {
            continue;
        }
        let question_ids: Vec<String> = component
            .iter()
            .map(|&idx| graph.node(idx).to_string())
            .collect();
        let metrics = ClusterMetrics::from_scores(scores_per_slot[slot].iter().copied());
        clusters.push(pending_cluster(question_ids, metrics));
    }

    sort_clusters(&mut clusters);

    debug!(
        pairs = pairs.len(),
        retained_edges = graph.edge_count(),
        components = components.len(),
        clusters = clusters.len(),
        threshold,
        min_cluster_size,
        "assembled question clusters"
    );

    Ok(clusters)
}

/// Materialize a fresh, uncurated cluster for a sorted member list.
pub(crate) fn pending_cluster(
    question_ids: Vec<String>,
    metrics: ClusterMetrics,
) -> QuestionCluster {
    QuestionCluster {
        id: cluster_id(&question_ids),
        question_ids,
        avg_similarity: metrics.avg_similarity,
        max_similarity: metrics.max_similarity,
        min_similarity: metrics.min_similarity,
        status: ClusterStatus::Pending,
        flagged_for_review: false,
        proposed_additions: Vec::new(),
        canonical_question_id: None,
    }
}

/// Canonical output order: member count descending, then average
/// similarity descending, then id ascending.
pub(crate) fn sort_clusters(clusters: &mut [QuestionCluster]) {
    clusters.sort_by(|a, b| {
        b.question_ids
            .len()
            .cmp(&a.question_ids.len())
            .then_with(|| b.avg_similarity.total_cmp(&a.avg_similarity))
            .then_with(|| a.id.cmp(&b.id))
    });
}
