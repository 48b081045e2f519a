//! Messaging configuration from defaults and environment variables.

use shared_types::{DEFAULT_COLLECTION_SUFFIX, DEFAULT_MSP_SUFFIX};
use std::env;
use thiserror::Error;

/// Object type of notice composite keys.
pub const DEFAULT_NOTICE_OBJECT_TYPE: &str = "mn";

/// Transient map entry carrying a JSON-encoded send request.
pub const DEFAULT_TRANSIENT_MESSAGE_KEY: &str = "message";

/// Upper bound on receivers in one send.
pub const DEFAULT_MAX_RECEIVERS: usize = 64;

/// Upper bound on a single message payload (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Invalid configuration value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be a non-empty string")]
    EmptyField(&'static str),

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Naming conventions and request limits of the messaging service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingConfig {
    /// Object type of notice keys in the shared partition.
    pub notice_object_type: String,
    /// Suffix turning an organization name into its MSP ID.
    pub msp_suffix: String,
    /// Suffix turning an organization name into its collection name.
    pub collection_suffix: String,
    /// Transient map entry read by `send_from_transient`.
    pub transient_message_key: String,
    /// Maximum receivers per send.
    pub max_receivers: usize,
    /// Maximum message payload size in bytes.
    pub max_message_bytes: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            notice_object_type: DEFAULT_NOTICE_OBJECT_TYPE.to_string(),
            msp_suffix: DEFAULT_MSP_SUFFIX.to_string(),
            collection_suffix: DEFAULT_COLLECTION_SUFFIX.to_string(),
            transient_message_key: DEFAULT_TRANSIENT_MESSAGE_KEY.to_string(),
            max_receivers: DEFAULT_MAX_RECEIVERS,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl MessagingConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CM_NOTICE_OBJECT_TYPE`: Notice key object type (default: mn)
    /// - `CM_MSP_SUFFIX`: MSP ID suffix (default: MSP)
    /// - `CM_COLLECTION_SUFFIX`: Collection name suffix (default: MSPCollection)
    /// - `CM_TRANSIENT_KEY`: Transient send entry (default: message)
    /// - `CM_MAX_RECEIVERS`: Receivers per send (default: 64)
    /// - `CM_MAX_MESSAGE_BYTES`: Payload size limit (default: 1048576)
    ///
    /// Unparseable limits fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            notice_object_type: env::var("CM_NOTICE_OBJECT_TYPE")
                .unwrap_or_else(|_| DEFAULT_NOTICE_OBJECT_TYPE.to_string()),

            msp_suffix: env::var("CM_MSP_SUFFIX")
                .unwrap_or_else(|_| DEFAULT_MSP_SUFFIX.to_string()),

            collection_suffix: env::var("CM_COLLECTION_SUFFIX")
                .unwrap_or_else(|_| DEFAULT_COLLECTION_SUFFIX.to_string()),

            transient_message_key: env::var("CM_TRANSIENT_KEY")
                .unwrap_or_else(|_| DEFAULT_TRANSIENT_MESSAGE_KEY.to_string()),

            max_receivers: env::var("CM_MAX_RECEIVERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_RECEIVERS),

            max_message_bytes: env::var("CM_MAX_MESSAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_MESSAGE_BYTES),
        }
    }

    /// Rejects empty names and zero limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("notice_object_type", &self.notice_object_type),
            ("msp_suffix", &self.msp_suffix),
            ("collection_suffix", &self.collection_suffix),
            ("transient_message_key", &self.transient_message_key),
        ];
        if let Some((field, _)) = names.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::EmptyField(*field));
        }
        if self.max_receivers == 0 {
            return Err(ConfigError::ZeroLimit("max_receivers"));
        }
        if self.max_message_bytes == 0 {
            return Err(ConfigError::ZeroLimit("max_message_bytes"));
        }
        Ok(())
    }
}
