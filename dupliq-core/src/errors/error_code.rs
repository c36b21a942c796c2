//! DupliqErrorCode trait for host-facing error codes.

/// Trait for converting Dupliq errors to structured error codes.
/// Every error enum implements this so host applications receive a
/// stable code string alongside the human-readable message.
pub trait DupliqErrorCode {
    /// Returns the stable error code string (e.g., "CLUSTER_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted host error string: `[ERROR_CODE] message`.
    fn host_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the host boundary.
pub const CLUSTER_ERROR: &str = "CLUSTER_ERROR";
pub const CURATION_ERROR: &str = "CURATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
