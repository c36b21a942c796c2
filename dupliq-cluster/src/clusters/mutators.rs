//! Cluster mutators: split at a stricter threshold, merge memberships.

use dupliq_core::errors::ClusterError;
use dupliq_core::types::collections::FxHashSet;
use dupliq_core::types::{QuestionCluster, SimilarityPair};
use tracing::debug;

use crate::clusters::assembler::{cluster_questions_by_similarity, pending_cluster};
use crate::clusters::metrics::ClusterMetrics;
use crate::graph::SimilarityGraph;

/// Re-partition a cluster at a stricter threshold.
///
/// Only pairs with both endpoints inside the cluster participate. The
/// resulting sub-clusters are fresh pending values of at least 2 members
/// each; the input cluster is untouched. An empty result means the cluster
/// has no safely separable sub-groups at that strictness, and the caller
/// decides what to do with it.
///
/// # Errors
/// `higher_threshold` outside [0, 1] or NaN.
pub fn split_cluster(
    cluster: &QuestionCluster,
    pairs: &[SimilarityPair],
    higher_threshold: f64,
) -> Result<Vec<QuestionCluster>, ClusterError> {
    if !(0.0..=1.0).contains(&higher_threshold) {
        return Err(ClusterError::InvalidSplitThreshold {
            value: higher_threshold,
        });
    }

    let members: FxHashSet<&str> = cluster.question_ids.iter().map(String::as_str).collect();
    let internal: Vec<SimilarityPair> = pairs
        .iter()
        .filter(|p| members.contains(p.a_id.as_str()) && members.contains(p.b_id.as_str()))
        .cloned()
        .collect();

    let sub_clusters = cluster_questions_by_similarity(&internal, 2, higher_threshold)?;

    debug!(
        cluster = %cluster.id,
        members = cluster.member_count(),
        children = sub_clusters.len(),
        higher_threshold,
        "split cluster"
    );

    Ok(sub_clusters)
}

/// Union multiple clusters into one fresh cluster.
///
/// Membership is the deduplicated union of all inputs. Metrics are
/// recomputed from every supplied pair that connects two members, with no
/// threshold: the evidence may be sparse and the metrics simply reflect
/// whatever is known. The id is re-derived from the union, so merging a
/// single cluster reproduces its id.
///
/// An empty `clusters` list yields a cluster with empty membership and
/// zero metrics, not an error.
pub fn merge_clusters(
    clusters: &[QuestionCluster],
    pairs: &[SimilarityPair],
) -> QuestionCluster {
    let mut question_ids: Vec<String> = clusters
        .iter()
        .flat_map(|c| c.question_ids.iter().cloned())
        .collect();
    question_ids.sort_unstable();
    question_ids.dedup();

    let members: FxHashSet<&str> = question_ids.iter().map(String::as_str).collect();
    let evidence = SimilarityGraph::evidence(pairs);
    let metrics = ClusterMetrics::for_member_ids(&evidence, &members);

    let merged = pending_cluster(question_ids, metrics);

    debug!(
        inputs = clusters.len(),
        members = merged.member_count(),
        merged = %merged.id,
        "merged clusters"
    );

    merged
}
