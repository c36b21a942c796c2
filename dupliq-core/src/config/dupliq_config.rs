//! Top-level Dupliq configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ClusterConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`DUPLIQ_*`)
/// 3. Project config (`dupliq.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DupliqConfig {
    pub cluster: ClusterConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub similarity_threshold: Option<f64>,
    pub min_cluster_size: Option<usize>,
    pub split_threshold_step: Option<f64>,
}

impl DupliqConfig {
    /// Load configuration with layered resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. CLI flags
    /// 2. Environment variables (`DUPLIQ_*`)
    /// 3. Project config (`dupliq.toml` in `root`)
    /// 4. Compiled defaults
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join("dupliq.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        // Validate the final config
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &DupliqConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.cluster.similarity_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "cluster.similarity_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(size) = config.cluster.min_cluster_size {
            if size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "cluster.min_cluster_size".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(step) = config.cluster.split_threshold_step {
            if !(step > 0.0 && step <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "cluster.split_threshold_step".to_string(),
                    message: "must be greater than 0.0 and at most 1.0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut DupliqConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: DupliqConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut DupliqConfig, other: &DupliqConfig) {
        if other.cluster.similarity_threshold.is_some() {
            base.cluster.similarity_threshold = other.cluster.similarity_threshold;
        }
        if other.cluster.min_cluster_size.is_some() {
            base.cluster.min_cluster_size = other.cluster.min_cluster_size;
        }
        if other.cluster.split_threshold_step.is_some() {
            base.cluster.split_threshold_step = other.cluster.split_threshold_step;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `DUPLIQ_SIMILARITY_THRESHOLD`, `DUPLIQ_MIN_CLUSTER_SIZE`, etc.
    fn apply_env_overrides(config: &mut DupliqConfig) {
        if let Ok(val) = std::env::var("DUPLIQ_SIMILARITY_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.cluster.similarity_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DUPLIQ_MIN_CLUSTER_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.cluster.min_cluster_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DUPLIQ_SPLIT_THRESHOLD_STEP") {
            if let Ok(v) = val.parse::<f64>() {
                config.cluster.split_threshold_step = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut DupliqConfig, cli: &CliOverrides) {
        if let Some(v) = cli.similarity_threshold {
            config.cluster.similarity_threshold = Some(v);
        }
        if let Some(v) = cli.min_cluster_size {
            config.cluster.min_cluster_size = Some(v);
        }
        if let Some(v) = cli.split_threshold_step {
            config.cluster.split_threshold_step = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
