//! Clustering configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MIN_CLUSTER_SIZE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SPLIT_THRESHOLD_STEP,
};

/// Configuration for the clustering subsystem.
///
/// These are caller-side defaults. Every engine operation still takes its
/// scalar parameters explicitly; hosts resolve them from here when the
/// request does not specify them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClusterConfig {
    /// Similarity threshold for edge retention. Default: 0.85.
    pub similarity_threshold: Option<f64>,
    /// Minimum members for a component to become a cluster. Default: 2.
    pub min_cluster_size: Option<usize>,
    /// Amount added to the build threshold when splitting. Default: 0.05.
    pub split_threshold_step: Option<f64>,
}

impl ClusterConfig {
    /// Returns the effective similarity threshold, defaulting to 0.85.
    pub fn effective_similarity_threshold(&self) -> f64 {
        self.similarity_threshold
            .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD)
    }

    /// Returns the effective minimum cluster size, defaulting to 2.
    pub fn effective_min_cluster_size(&self) -> usize {
        self.min_cluster_size.unwrap_or(DEFAULT_MIN_CLUSTER_SIZE)
    }

    /// Returns the effective split threshold step, defaulting to 0.05.
    pub fn effective_split_threshold_step(&self) -> f64 {
        self.split_threshold_step
            .unwrap_or(DEFAULT_SPLIT_THRESHOLD_STEP)
    }

    /// Returns the split threshold implied by `build_threshold`, capped at 1.0.
    pub fn split_threshold_for(&self, build_threshold: f64) -> f64 {
        (build_threshold + self.effective_split_threshold_step()).min(1.0)
    }
}
