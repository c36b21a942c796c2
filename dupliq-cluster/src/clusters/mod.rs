//! Cluster materialization: metrics, identity, assembly, mutation, growth.

pub mod assembler;
pub mod identity;
pub mod incremental;
pub mod metrics;
pub mod mutators;

pub use assembler::cluster_questions_by_similarity;
pub use identity::cluster_id;
pub use incremental::propose_additions;
pub use metrics::ClusterMetrics;
pub use mutators::{merge_clusters, split_cluster};
