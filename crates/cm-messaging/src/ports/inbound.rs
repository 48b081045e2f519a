//! # Driving Port (Inbound)
//!
//! Operations exposed to clients. Each call runs inside the transaction the
//! context belongs to; the caller commits or discards it.

use crate::errors::MessagingError;
use crate::events::{Conversation, ReadMessagesResponse, SendRequest};
use crate::ports::outbound::TransactionContext;

/// Confidential messaging operations.
pub trait MessagingApi {
    /// Appends the message to each receiver's mailbox in the sender's
    /// collection and flags a notice for each receiver.
    ///
    /// # Errors
    ///
    /// - `Validation`: empty field, duplicate receiver, or limit exceeded
    /// - `Authorization`: sender is not the caller, or the peer belongs to
    ///   another organization
    /// - `Storage`: ledger failure
    fn send(&self, ctx: &mut dyn TransactionContext, request: &SendRequest)
        -> Result<(), MessagingError>;

    /// Decodes a [`SendRequest`] from the transient map and sends it.
    fn send_from_transient(&self, ctx: &mut dyn TransactionContext) -> Result<(), MessagingError>;

    /// Lists every sender that has ever messaged `receiver`, marking unread
    /// notices as read.
    fn read_notices(
        &self,
        ctx: &mut dyn TransactionContext,
        receiver: &str,
    ) -> Result<Vec<String>, MessagingError>;

    /// Returns every message `sender` has sent `receiver`, oldest first.
    ///
    /// # Errors
    ///
    /// - `NotFound`: the sender has never messaged the receiver
    fn read_messages(
        &self,
        ctx: &mut dyn TransactionContext,
        sender: &str,
        receiver: &str,
    ) -> Result<ReadMessagesResponse, MessagingError>;

    /// True if `sender` has ever messaged `receiver`. Does not drain.
    fn notice_exists(
        &self,
        ctx: &mut dyn TransactionContext,
        receiver: &str,
        sender: &str,
    ) -> Result<bool, MessagingError>;

    /// Reads notices, then every listed sender's messages.
    fn read_inbox(
        &self,
        ctx: &mut dyn TransactionContext,
        receiver: &str,
    ) -> Result<Vec<Conversation>, MessagingError>;
}
