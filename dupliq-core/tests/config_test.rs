//! Tests for the Dupliq configuration system.

use std::sync::Mutex;

use dupliq_core::config::dupliq_config::{CliOverrides, DupliqConfig};
use dupliq_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper: create a temporary directory.
fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all DUPLIQ_ env vars to prevent cross-test contamination.
fn clear_dupliq_env_vars() {
    for key in [
        "DUPLIQ_SIMILARITY_THRESHOLD",
        "DUPLIQ_MIN_CLUSTER_SIZE",
        "DUPLIQ_SPLIT_THRESHOLD_STEP",
    ] {
        std::env::remove_var(key);
    }
}

/// Layered resolution: CLI beats env, env beats project config.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("dupliq.toml");
    std::fs::write(
        &project_toml,
        r#"
[cluster]
similarity_threshold = 0.80
min_cluster_size = 3
"#,
    )
    .unwrap();

    // Set env var to override project config
    std::env::set_var("DUPLIQ_SIMILARITY_THRESHOLD", "0.90");

    let cli = CliOverrides {
        min_cluster_size: Some(4),
        ..Default::default()
    };

    let config = DupliqConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI overrides env and project for min_cluster_size
    assert_eq!(config.cluster.min_cluster_size, Some(4));
    // Env overrides project for similarity_threshold
    assert_eq!(config.cluster.similarity_threshold, Some(0.90));

    clear_dupliq_env_vars();
}

/// Missing config files fall back gracefully to compiled defaults.
#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    // No dupliq.toml exists
    let config = DupliqConfig::load(dir.path(), None).unwrap();

    // Should get compiled defaults
    assert_eq!(config.cluster.effective_similarity_threshold(), 0.85);
    assert_eq!(config.cluster.effective_min_cluster_size(), 2);
    assert_eq!(config.cluster.effective_split_threshold_step(), 0.05);
}

/// Env var override pattern (DUPLIQ_MIN_CLUSTER_SIZE).
#[test]
fn test_env_var_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    std::env::set_var("DUPLIQ_MIN_CLUSTER_SIZE", "5");

    let config = DupliqConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.cluster.min_cluster_size, Some(5));

    clear_dupliq_env_vars();
}

/// Invalid TOML syntax returns ConfigError::ParseError.
#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("dupliq.toml");
    std::fs::write(&project_toml, "this is not valid toml {{{{").unwrap();

    let result = DupliqConfig::load(dir.path(), None);
    assert!(result.is_err());
    match result.unwrap_err() {
        ConfigError::ParseError { .. } => {} // expected
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

/// Valid TOML with an out-of-range threshold fails validation.
#[test]
fn test_invalid_threshold_value() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("dupliq.toml");
    std::fs::write(
        &project_toml,
        r#"
[cluster]
similarity_threshold = 1.5
"#,
    )
    .unwrap();

    let result = DupliqConfig::load(dir.path(), None);
    assert!(result.is_err());
    match result.unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "cluster.similarity_threshold");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

/// A zero minimum cluster size fails validation.
#[test]
fn test_invalid_min_cluster_size() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("dupliq.toml");
    std::fs::write(
        &project_toml,
        r#"
[cluster]
min_cluster_size = 0
"#,
    )
    .unwrap();

    let result = DupliqConfig::load(dir.path(), None);
    assert!(result.is_err());
    match result.unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "cluster.min_cluster_size");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

/// Unrecognized keys are accepted (forward-compatible).
#[test]
fn test_unrecognized_keys_accepted() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("dupliq.toml");
    std::fs::write(
        &project_toml,
        r#"
[cluster]
similarity_threshold = 0.88
future_unknown_key = "hello"

[future_section]
another_key = 42
"#,
    )
    .unwrap();

    // Should not error on unknown keys
    let result = DupliqConfig::load(dir.path(), None);
    assert!(result.is_ok());
}

/// Round-trip: load, serialize, load produces an identical config.
#[test]
fn test_config_round_trip() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_dupliq_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("dupliq.toml");
    std::fs::write(
        &project_toml,
        r#"
[cluster]
similarity_threshold = 0.92
min_cluster_size = 3
split_threshold_step = 0.03
"#,
    )
    .unwrap();

    let config1 = DupliqConfig::load(dir.path(), None).unwrap();
    let toml_str = config1.to_toml().unwrap();

    let config2 = DupliqConfig::from_toml(&toml_str).unwrap();

    assert_eq!(
        config1.cluster.similarity_threshold,
        config2.cluster.similarity_threshold
    );
    assert_eq!(
        config1.cluster.min_cluster_size,
        config2.cluster.min_cluster_size
    );
    assert_eq!(
        config1.cluster.split_threshold_step,
        config2.cluster.split_threshold_step
    );
}
