//! Core types, errors, config, tracing, and constants for Dupliq.
//!
//! Dupliq groups near-duplicate exam questions into stable, deterministic
//! clusters from externally computed similarity scores. This crate holds
//! the value types and the ambient plumbing shared by the engine crates;
//! the clustering algorithms themselves live in `dupliq-cluster`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::{CliOverrides, ClusterConfig, DupliqConfig};
pub use errors::{ClusterError, ConfigError, CurationError, DupliqErrorCode};
pub use types::{ClusterStatus, QuestionCluster, SimilarityPair};
