//! # Error Types
//!
//! All error types for confidential messaging.
//!
//! Every failure maps onto one of four kinds (see [`ErrorKind`]); the kind
//! decides whether a caller should fix its request, its identity, or simply
//! resubmit.

use cm_ledger::LedgerError;
use thiserror::Error;

// =============================================================================
// ERROR KINDS
// =============================================================================

/// Coarse classification of a [`MessagingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty, missing, or malformed request field. No state was touched.
    Validation,
    /// Caller identity does not match the claimed identity or the peer.
    Authorization,
    /// No mailbox record exists for the requested pair.
    NotFound,
    /// Ledger read/write/scan failure, MVCC conflict, or corrupt record.
    Storage,
}

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// Identity checks that can reject a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Sender named in the request is not the calling organization.
    #[error("sender {sender} does not match client MSP ID {caller}")]
    SenderMismatch { sender: String, caller: String },

    /// Receiver named in the request is not the calling organization.
    #[error("receiver {receiver} does not match client MSP ID {caller}")]
    ReceiverMismatch { receiver: String, caller: String },

    /// Request executed on a peer of another organization.
    #[error("client from org {caller} is not authorized to read or write private data from an org {peer} peer")]
    NotHostedLocally { caller: String, peer: String },
}

// =============================================================================
// MESSAGING ERRORS
// =============================================================================

/// Errors returned by messaging operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagingError {
    /// Request rejected before any state access.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Identity check failed.
    #[error("unauthorized: {0}")]
    Authorization(#[from] AuthorizationError),

    /// No mailbox record for the pair.
    #[error("there is no message from {sender} to {receiver}")]
    NotFound { sender: String, receiver: String },

    /// Underlying ledger failure.
    #[error("storage error: {0}")]
    Storage(#[from] LedgerError),

    /// Stored bytes could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A decoded record violates a stored-data invariant.
    #[error("corrupt record {key:?} in {namespace}: {reason}")]
    CorruptRecord {
        namespace: String,
        key: String,
        reason: String,
    },
}

impl MessagingError {
    /// Classification used by callers to decide how to react.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage(_) | Self::Serialization(_) | Self::CorruptRecord { .. } => {
                ErrorKind::Storage
            }
        }
    }

    /// True only when the whole operation may succeed if resubmitted against
    /// fresh state. Never retried inside this crate.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_conflict())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for MessagingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
