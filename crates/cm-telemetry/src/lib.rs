//! # CM Telemetry
//!
//! Structured logging setup for processes hosting the messaging chaincode.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cm_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing(&TelemetryConfig::from_env())?;
//!     // spans from cm-messaging now carry tx_id and are filtered by CM_LOG_LEVEL
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CM_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `CM_JSON_LOGS` | `false` | JSON output instead of human-readable |
//! | `CM_LOG_SOURCE` | `false` | Include file and line |
//! | `CM_SERVICE_NAME` | `confidential-messaging` | Service name |

mod config;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("Failed to install global subscriber: {0}")]
    SubscriberInit(String),
}

/// Builds the filter for `config`.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter {
        directive: config.log_level.clone(),
        reason: e.to_string(),
    })
}

/// Installs the global `tracing` subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        filter = %config.log_level,
        json = config.json_logs,
        "Tracing initialized"
    );
    Ok(())
}
