//! Shared constants for the Dupliq clustering engine.

/// Dupliq version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default similarity threshold for edge retention.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Default minimum number of members for a component to become a cluster.
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Default amount added to the build threshold when splitting a cluster.
pub const DEFAULT_SPLIT_THRESHOLD_STEP: f64 = 0.05;

/// Prefix of every deterministic cluster identifier.
pub const CLUSTER_ID_PREFIX: &str = "cluster_";
