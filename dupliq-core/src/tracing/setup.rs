//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Dupliq tracing/logging system.
///
/// Reads `DUPLIQ_LOG` environment variable for per-subsystem log levels.
/// Format: `DUPLIQ_LOG=dupliq_cluster=debug,dupliq_core=info`
///
/// Falls back to info for both crates if `DUPLIQ_LOG` is not set or is
/// invalid.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("DUPLIQ_LOG")
            .unwrap_or_else(|_| EnvFilter::new("dupliq_core=info,dupliq_cluster=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
