//! # Confidential Messaging Chaincode
//!
//! Organization-scoped messaging on a shared, versioned key-value ledger.
//!
//! ## Purpose
//!
//! A sender writes each message into its own private collection under the
//! receiver's name, where only the receiver (and the sender) can read it. A
//! lightweight notice in the shared partition tells the receiver that mail is
//! waiting without revealing its content.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Identity guards | `domain/identity.rs` | Bind claimed sender/receiver and peer to the caller |
//! | Notice index | `notice_index.rs` | Per (receiver, sender) unread flag, scan-and-drain |
//! | Mailbox | `mailbox.rs` | Per (sender, receiver) append-only message log |
//! | Service | `service.rs` | `MessagingApi` facade composing the above |
//!
//! ## Stored Layout
//!
//! | Partition | Key | Value |
//! |-----------|-----|-------|
//! | shared | `\0mn\0{receiver}\0{sender}\0` | `"1"` unread, `"0"` read |
//! | `{sender}MSPCollection` | `{receiver}` | JSON `MailboxRecord` |
//!
//! ## Errors
//!
//! Every failure is one of `Validation`, `Authorization`, `NotFound` or
//! `Storage` (see [`errors::ErrorKind`]). Ledger conflicts at commit are
//! `Storage` errors with [`MessagingError::is_retryable`] set; the caller
//! resubmits the whole operation.
//!
//! ## Usage Example
//!
//! ```ignore
//! use cm_messaging::prelude::*;
//!
//! let peer = LedgerPeer::new(MspId::new("org1MSP"), ledger);
//! let service = MessagingService::default();
//! let request = SendRequest::new("org1", ["org2"], "hello", "greeting");
//! peer.invoke(&MspId::new("org1MSP"), TransientMap::new(), |ctx| {
//!     service.send(ctx, &request)
//! })?;
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod mailbox;
pub mod notice_index;
pub mod ports;
pub mod service;

pub use errors::{AuthorizationError, ErrorKind, MessagingError};

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{LedgerContext, LedgerPeer};
    pub use crate::config::{ConfigError, MessagingConfig};
    pub use crate::domain::{MailboxRecord, NoticeState, NoticeTransition};
    pub use crate::errors::{AuthorizationError, ErrorKind, MessagingError};
    pub use crate::events::{Conversation, ReadMessagesResponse, SendRequest};
    pub use crate::mailbox::Mailbox;
    pub use crate::notice_index::NoticeIndex;
    pub use crate::ports::{ChaincodeStub, MessagingApi, TransactionContext};
    pub use crate::service::MessagingService;
    pub use shared_types::{MspId, OrgId, TransientMap, TxId};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name the chaincode is deployed under.
pub const CONTRACT_NAME: &str = "confidential-messaging";
