//! # Request and Response Payloads
//!
//! JSON shapes exchanged with clients. Byte payloads are base64 strings on the
//! wire, matching how ledger clients encode binary fields.
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | `send` | `SendRequest` | (none) |
//! | `read_notices` | receiver | `Vec<String>` |
//! | `read_messages` | sender, receiver | `ReadMessagesResponse` |
//! | `read_inbox` | receiver | `Vec<Conversation>` |

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

// =============================================================================
// REQUESTS
// =============================================================================

/// Confidential message from one sender to one or more receivers.
///
/// Usually delivered through the transient map so the payload never appears
/// in the public transaction record.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    /// Sending organization; must be the caller.
    pub sender: String,
    /// Receiving organizations, processed in order.
    pub receivers: Vec<String>,
    /// Opaque payload.
    #[serde_as(as = "Base64")]
    pub message: Vec<u8>,
    /// Free-text note stored alongside the payload.
    pub note: String,
}

impl SendRequest {
    pub fn new(
        sender: impl Into<String>,
        receivers: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<Vec<u8>>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receivers: receivers.into_iter().map(Into::into).collect(),
            message: message.into(),
            note: note.into(),
        }
    }

    /// Encodes the request for the transient map.
    pub fn to_transient_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Every message a sender has sent the caller, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadMessagesResponse {
    pub messages: Vec<String>,
    pub notes: Vec<String>,
}

impl ReadMessagesResponse {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One sender's full conversation with the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub sender: String,
    pub messages: Vec<String>,
    pub notes: Vec<String>,
}

impl Conversation {
    pub fn new(sender: impl Into<String>, response: ReadMessagesResponse) -> Self {
        Self {
            sender: sender.into(),
            messages: response.messages,
            notes: response.notes,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
