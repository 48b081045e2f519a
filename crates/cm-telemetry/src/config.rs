//! Telemetry configuration from environment variables.

use std::env;

/// Default service name attached to every log line.
pub const DEFAULT_SERVICE_NAME: &str = "confidential-messaging";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name recorded on the startup event
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive list)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include source file and line in each event
    pub with_source_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_source_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CM_SERVICE_NAME`: Service name (default: confidential-messaging)
    /// - `CM_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `CM_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `CM_LOG_SOURCE`: Include file/line (default: false)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("CM_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),

            log_level: env::var("CM_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("CM_JSON_LOGS").map(|v| is_truthy(&v)).unwrap_or(false),

            with_source_location: env::var("CM_LOG_SOURCE")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        }
    }

    /// Configuration for a named tool or host process.
    pub fn for_service(name: &str) -> Self {
        Self {
            service_name: name.to_string(),
            ..Self::from_env()
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
