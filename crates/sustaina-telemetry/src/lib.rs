//! # Sustaina Telemetry
//!
//! Logging bootstrap shared by every Sustaina binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sustaina_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Application code; logs go to stderr
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SU_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `SU_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `SU_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `SU_SERVICE_NAME` | `sustaina` | Service name field |

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging. Hold the returned guard for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::debug!(
        service = %config.service_name,
        subsystem = %config.subsystem_id,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs shutdown when dropped.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Shutting down telemetry");
    }
}
