//! Configuration system for Dupliq.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod cluster_config;
pub mod dupliq_config;

pub use cluster_config::ClusterConfig;
pub use dupliq_config::{CliOverrides, DupliqConfig};
