//! Incremental growth: proposing unclustered questions to existing clusters.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;

use dupliq_core::errors::ClusterError;
use dupliq_core::types::collections::FxHashMap;
use dupliq_core::types::{QuestionCluster, SimilarityPair};
use tracing::debug;

use crate::graph::SimilarityGraph;

/// Propose unclustered questions for membership in existing clusters.
///
/// A question that appears in `pairs`, belongs to no input cluster, and
/// has at least one retained edge into a cluster's membership is proposed
/// to the single cluster holding its best-scoring edge; score ties go to
/// the lexicographically smaller cluster id. New proposals are appended in
/// score-descending order (ties by question id); existing proposals are
/// kept when the question is still unclustered and not re-targeted to
/// another cluster. Members of any cluster are never proposed.
///
/// Returns fresh cluster values in the input order; the inputs are
/// untouched. Proposals only mark candidates: membership changes happen
/// through curation.
///
/// # Errors
/// `threshold` outside [0, 1] or NaN.
pub fn propose_additions(
    clusters: &[QuestionCluster],
    pairs: &[SimilarityPair],
    threshold: f64,
) -> Result<Vec<QuestionCluster>, ClusterError> {
    let graph = SimilarityGraph::build(pairs, threshold)?;

    let mut member_of: FxHashMap<&str, usize> = FxHashMap::default();
    for (slot, cluster) in clusters.iter().enumerate() {
        for id in &cluster.question_ids {
            member_of.insert(id.as_str(), slot);
        }
    }

    // Best (score, target cluster) per unclustered node.
    let mut best: FxHashMap<usize, (f64, usize)> = FxHashMap::default();
    for edge in graph.edges() {
        for (node, other) in [(edge.a, edge.b), (edge.b, edge.a)] {
            if member_of.contains_key(graph.node(node)) {
                continue;
            }
            let Some(&slot) = member_of.get(graph.node(other)) else {
                continue;
            };
            match best.entry(node) {
                Entry::Vacant(entry) => {
                    entry.insert((edge.score, slot));
                }
                Entry::Occupied(mut entry) => {
                    let (best_score, best_slot) = *entry.get();
                    let replace = match edge.score.total_cmp(&best_score) {
                        Ordering::Greater => true,
                        Ordering::Equal => clusters[slot].id < clusters[best_slot].id,
                        Ordering::Less => false,
                    };
                    if replace {
                        entry.insert((edge.score, slot));
                    }
                }
            }
        }
    }

    let candidate_count = best.len();
    let mut new_target: FxHashMap<&str, usize> = FxHashMap::default();
    let mut appended: Vec<Vec<(f64, String)>> = vec![Vec::new(); clusters.len()];
    for (node, (score, slot)) in best {
        new_target.insert(graph.node(node), slot);
        appended[slot].push((score, graph.node(node).to_string()));
    }

    let result = clusters
        .iter()
        .enumerate()
        .map(|(slot, cluster)| {
            let mut fresh = cluster.clone();
            fresh.proposed_additions.retain(|q| {
                !member_of.contains_key(q.as_str())
                    && new_target.get(q.as_str()).map_or(true, |&t| t == slot)
            });
            let mut additions = std::mem::take(&mut appended[slot]);
            additions.sort_unstable_by(|(sx, qx), (sy, qy)| {
                sy.total_cmp(sx).then_with(|| qx.cmp(qy))
            });
            for (_, q) in additions {
                if !fresh.proposed_additions.contains(&q) {
                    fresh.proposed_additions.push(q);
                }
            }
            fresh
        })
        .collect();

    debug!(
        clusters = clusters.len(),
        candidates = candidate_count,
        threshold,
        "proposed additions"
    );

    Ok(result)
}
