//! Supervised curation actions over clusters.

use serde::{Deserialize, Serialize};

use dupliq_core::errors::{ClusterError, CurationError};
use dupliq_core::types::collections::FxHashSet;
use dupliq_core::types::{ClusterStatus, QuestionCluster, SimilarityPair};
use tracing::debug;

use crate::clusters::identity::cluster_id;
use crate::clusters::metrics::ClusterMetrics;
use crate::clusters::mutators::split_cluster;
use crate::graph::SimilarityGraph;

/// A supervised curation action over one cluster.
///
/// Actions arrive from the host application as data. Splitting is a
/// separate operation (`split_and_mark`) because it produces replacement
/// clusters rather than a single updated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CurationAction {
    /// Mark the members as true duplicates, keeping `keep_id` as canonical.
    ApproveDuplicates { keep_id: String },
    /// Mark the members as intended variants of one another.
    ApproveVariants,
    /// Remove one member, shrinking the cluster.
    ExcludeQuestion { id: String },
    FlagReview,
    ClearReview,
    /// Return to pending. Excluded members are not restored.
    Reset,
    /// Move a proposed addition into membership.
    AcceptProposed { id: String },
    /// Drop a proposed addition.
    RejectProposed { id: String },
}

/// Result of applying a curation action.
#[derive(Debug, Clone, PartialEq)]
pub enum CurationOutcome {
    /// The cluster survives as the returned value.
    Updated(QuestionCluster),
    /// Membership fell below the minimum cluster size; the remainder is
    /// returned so the caller can archive or discard it.
    Dissolved(QuestionCluster),
}

impl CurationOutcome {
    /// The resulting cluster value, however the action left it.
    pub fn cluster(&self) -> &QuestionCluster {
        match self {
            Self::Updated(c) | Self::Dissolved(c) => c,
        }
    }
}

/// Apply a curation action, producing a fresh cluster value.
///
/// Actions are idempotent: re-applying one that is already in effect
/// returns an equal value. `pairs` supplies the similarity evidence for
/// actions that change membership and must refresh metrics; callers
/// normally pass the same pair list the cluster was built from. The
/// evidence is collected threshold-free, like a merge: whatever pairs
/// connect the remaining members count. `min_cluster_size` decides when a
/// shrinking cluster dissolves.
///
/// # Errors
/// Approving duplicates with a `keep_id` outside the membership, or
/// accepting a question that was never proposed.
pub fn apply_action(
    cluster: &QuestionCluster,
    action: &CurationAction,
    pairs: &[SimilarityPair],
    min_cluster_size: usize,
) -> Result<CurationOutcome, CurationError> {
    let mut updated = cluster.clone();
    match action {
        CurationAction::ApproveDuplicates { keep_id } => {
            if !updated.contains(keep_id) {
                return Err(CurationError::UnknownMember {
                    cluster_id: updated.id,
                    question_id: keep_id.clone(),
                });
            }
            updated.status = ClusterStatus::ApprovedDuplicates;
            updated.canonical_question_id = Some(keep_id.clone());
        }
        CurationAction::ApproveVariants => {
            updated.status = ClusterStatus::ApprovedVariants;
            // A canonical member only means something for duplicates.
            updated.canonical_question_id = None;
        }
        CurationAction::ExcludeQuestion { id } => {
            if updated.contains(id) {
                updated.question_ids.retain(|q| q != id);
                if updated.canonical_question_id.as_deref() == Some(id.as_str()) {
                    updated.canonical_question_id = None;
                }
                refresh_membership(&mut updated, pairs);
                if updated.member_count() < min_cluster_size {
                    debug!(cluster = %updated.id, excluded = %id, "cluster dissolved by exclusion");
                    return Ok(CurationOutcome::Dissolved(updated));
                }
            }
        }
        CurationAction::FlagReview => updated.flagged_for_review = true,
        CurationAction::ClearReview => updated.flagged_for_review = false,
        CurationAction::Reset => {
            updated.status = ClusterStatus::Pending;
            updated.canonical_question_id = None;
        }
        CurationAction::AcceptProposed { id } => {
            if updated.contains(id) {
                // Already accepted; tidy any leftover proposal entry.
                updated.proposed_additions.retain(|q| q != id);
            } else {
                let Some(pos) = updated.proposed_additions.iter().position(|q| q == id)
                else {
                    return Err(CurationError::UnknownProposal {
                        cluster_id: updated.id,
                        question_id: id.clone(),
                    });
                };
                updated.proposed_additions.remove(pos);
                let insert_at = updated
                    .question_ids
                    .binary_search(id)
                    .unwrap_or_else(|missing_at| missing_at);
                updated.question_ids.insert(insert_at, id.clone());
                refresh_membership(&mut updated, pairs);
            }
        }
        CurationAction::RejectProposed { id } => {
            updated.proposed_additions.retain(|q| q != id);
        }
    }
    Ok(CurationOutcome::Updated(updated))
}

/// Outcome of a supervised split: the (possibly re-marked) parent and the
/// replacement children.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    pub parent: QuestionCluster,
    pub children: Vec<QuestionCluster>,
}

/// Run a split and mark the parent.
///
/// When the split yields children, the parent's status becomes `Split`
/// and the children are its replacements downstream. A cluster that
/// produced no children keeps its previous status, and the caller decides
/// what to do with it.
///
/// # Errors
/// `higher_threshold` outside [0, 1] or NaN.
pub fn split_and_mark(
    cluster: &QuestionCluster,
    pairs: &[SimilarityPair],
    higher_threshold: f64,
) -> Result<SplitOutcome, ClusterError> {
    let children = split_cluster(cluster, pairs, higher_threshold)?;
    let mut parent = cluster.clone();
    if !children.is_empty() {
        parent.status = ClusterStatus::Split;
    }
    Ok(SplitOutcome { parent, children })
}

/// Recompute metrics and re-derive the id after a membership change.
///
/// Content-derived ids always reflect current membership, so a shrunken or
/// grown cluster is a new identity as far as persistence is concerned.
fn refresh_membership(cluster: &mut QuestionCluster, pairs: &[SimilarityPair]) {
    let members: FxHashSet<&str> = cluster.question_ids.iter().map(String::as_str).collect();
    let evidence = SimilarityGraph::evidence(pairs);
    let metrics = ClusterMetrics::for_member_ids(&evidence, &members);
    cluster.avg_similarity = metrics.avg_similarity;
    cluster.max_similarity = metrics.max_similarity;
    cluster.min_similarity = metrics.min_similarity;
    cluster.id = cluster_id(&cluster.question_ids);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::assembler::cluster_questions_by_similarity;

    fn triangle_cluster() -> (QuestionCluster, Vec<SimilarityPair>) {
        let pairs = vec![
            SimilarityPair::new("q1", "q2", 0.9),
            SimilarityPair::new("q2", "q3", 0.95),
            SimilarityPair::new("q1", "q3", 0.85),
        ];
        let mut clusters = cluster_questions_by_similarity(&pairs, 2, 0.85).unwrap();
        (clusters.remove(0), pairs)
    }

    fn updated(outcome: CurationOutcome) -> QuestionCluster {
        match outcome {
            CurationOutcome::Updated(c) => c,
            CurationOutcome::Dissolved(c) => panic!("unexpected dissolution of {}", c.id),
        }
    }

    #[test]
    fn test_approve_duplicates_requires_membership() {
        let (cluster, pairs) = triangle_cluster();
        let action = CurationAction::ApproveDuplicates {
            keep_id: "q9".to_string(),
        };
        let err = apply_action(&cluster, &action, &pairs, 2).unwrap_err();
        assert!(matches!(err, CurationError::UnknownMember { .. }));
    }

    #[test]
    fn test_approve_then_reset_round_trip() {
        let (cluster, pairs) = triangle_cluster();
        let approve = CurationAction::ApproveDuplicates {
            keep_id: "q1".to_string(),
        };
        let approved = updated(apply_action(&cluster, &approve, &pairs, 2).unwrap());
        assert_eq!(approved.status, ClusterStatus::ApprovedDuplicates);
        assert_eq!(approved.canonical_question_id.as_deref(), Some("q1"));

        let reset = updated(apply_action(&approved, &CurationAction::Reset, &pairs, 2).unwrap());
        assert_eq!(reset.status, ClusterStatus::Pending);
        assert!(reset.canonical_question_id.is_none());
        assert_eq!(reset.question_ids, approved.question_ids);
    }

    #[test]
    fn test_exclusion_rederives_identity() {
        let (cluster, pairs) = triangle_cluster();
        let action = CurationAction::ExcludeQuestion {
            id: "q3".to_string(),
        };
        let shrunk = updated(apply_action(&cluster, &action, &pairs, 2).unwrap());
        assert_eq!(shrunk.question_ids, vec!["q1", "q2"]);
        assert_ne!(shrunk.id, cluster.id);
        // Only the q1-q2 edge remains as evidence.
        assert_eq!(shrunk.avg_similarity, 0.9);
        assert_eq!(shrunk.max_similarity, 0.9);
        assert_eq!(shrunk.min_similarity, 0.9);
    }

    #[test]
    fn test_exclusion_below_min_size_dissolves() {
        let (cluster, pairs) = triangle_cluster();
        let action = CurationAction::ExcludeQuestion {
            id: "q3".to_string(),
        };
        match apply_action(&cluster, &action, &pairs, 3).unwrap() {
            CurationOutcome::Dissolved(remainder) => {
                assert_eq!(remainder.question_ids, vec!["q1", "q2"]);
            }
            CurationOutcome::Updated(c) => panic!("expected dissolution, got {}", c.id),
        }
    }

    #[test]
    fn test_exclude_absent_member_is_noop() {
        let (cluster, pairs) = triangle_cluster();
        let action = CurationAction::ExcludeQuestion {
            id: "q9".to_string(),
        };
        let same = updated(apply_action(&cluster, &action, &pairs, 2).unwrap());
        assert_eq!(same, cluster);
    }

    #[test]
    fn test_split_and_mark_sets_parent_status() {
        let pairs = vec![
            SimilarityPair::new("q1", "q2", 0.93),
            SimilarityPair::new("q3", "q4", 0.92),
            SimilarityPair::new("q2", "q3", 0.82),
        ];
        let mut clusters = cluster_questions_by_similarity(&pairs, 2, 0.80).unwrap();
        let parent = clusters.remove(0);

        let outcome = split_and_mark(&parent, &pairs, 0.9).unwrap();
        assert_eq!(outcome.children.len(), 2);
        assert_eq!(outcome.parent.status, ClusterStatus::Split);

        // Nothing separates at 1.0; the parent keeps its status.
        let unsplit = split_and_mark(&parent, &pairs, 1.0).unwrap();
        assert!(unsplit.children.is_empty());
        assert_eq!(unsplit.parent.status, parent.status);
    }
}
