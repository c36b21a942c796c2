//! Dupliq clustering engine.
//!
//! Groups near-duplicate exam questions into stable, deterministic
//! clusters from externally computed pairwise similarity scores. The
//! engine is pure and synchronous: every operation is a function of its
//! inputs with no I/O and no shared state, so concurrent invocations for
//! different datasets need no locking.
//!
//! Pipeline: scored pairs → thresholded graph → union-find components →
//! ranked [`QuestionCluster`] values, with split/merge mutators,
//! incremental membership proposals, and a supervised curation layer on
//! top. Persistence and the vector-similarity search producing the pairs
//! are external collaborators.
//!
//! [`QuestionCluster`]: dupliq_core::types::QuestionCluster

pub mod clusters;
pub mod curation;
pub mod graph;

pub use clusters::{
    cluster_id, cluster_questions_by_similarity, merge_clusters, propose_additions,
    split_cluster, ClusterMetrics,
};
pub use curation::{
    apply_action, reconcile_regenerated, split_and_mark, CurationAction, CurationOutcome,
    SplitOutcome,
};
pub use graph::{connected_components, ComponentSet, SimilarityGraph};
