//! Clustering parameter errors.

use super::error_code::{self, DupliqErrorCode};

/// Caller errors rejected by the clustering engine.
///
/// Degenerate pair inputs (empty lists, self-pairs, duplicates, ids seen
/// nowhere else) are never errors; only out-of-contract scalar parameters
/// are.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("Invalid similarity threshold {value}: must be between 0.0 and 1.0")]
    InvalidThreshold { value: f64 },

    #[error("Invalid minimum cluster size {value}: must be at least 1")]
    InvalidMinClusterSize { value: usize },

    #[error("Invalid split threshold {value}: must be a number between 0.0 and 1.0")]
    InvalidSplitThreshold { value: f64 },
}

impl DupliqErrorCode for ClusterError {
    fn error_code(&self) -> &'static str {
        error_code::CLUSTER_ERROR
    }
}
