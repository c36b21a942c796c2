//! Carrying curation state across cluster regenerations.

use dupliq_core::types::collections::FxHashMap;
use dupliq_core::types::QuestionCluster;
use tracing::debug;

/// Carry curation state from previous clusters onto regenerated ones.
///
/// Cluster ids are content-derived, so a regenerated cluster with the same
/// id has the same membership as before and any curation decisions made on
/// it still apply: `status`, `flagged_for_review`, `canonical_question_id`
/// and still-valid proposals are copied over. Proposals naming questions
/// that are now members are dropped. Regenerated clusters with no previous
/// match keep their fresh pending state, and previous clusters whose id no
/// longer appears are absent from the output; the caller decides their
/// fate.
///
/// Pure value-in/value-out: nothing is persisted here.
pub fn reconcile_regenerated(
    previous: &[QuestionCluster],
    regenerated: &[QuestionCluster],
) -> Vec<QuestionCluster> {
    let by_id: FxHashMap<&str, &QuestionCluster> =
        previous.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut carried = 0usize;
    let result = regenerated
        .iter()
        .map(|fresh| {
            let Some(prior) = by_id.get(fresh.id.as_str()) else {
                return fresh.clone();
            };
            carried += 1;
            let mut merged = fresh.clone();
            merged.status = prior.status;
            merged.flagged_for_review = prior.flagged_for_review;
            merged.canonical_question_id = prior.canonical_question_id.clone();
            merged.proposed_additions = prior
                .proposed_additions
                .iter()
                .filter(|q| !merged.contains(q))
                .cloned()
                .collect();
            merged
        })
        .collect();

    debug!(
        previous = previous.len(),
        regenerated = regenerated.len(),
        carried,
        "reconciled regenerated clusters"
    );

    result
}
