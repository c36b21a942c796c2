//! Error handling for Dupliq.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod cluster_error;
pub mod config_error;
pub mod curation_error;
pub mod error_code;

pub use cluster_error::ClusterError;
pub use config_error::ConfigError;
pub use curation_error::CurationError;
pub use error_code::DupliqErrorCode;
