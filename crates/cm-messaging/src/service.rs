//! # Messaging Service
//!
//! Implements [`MessagingApi`] by composing the identity guards, the mailbox
//! and the notice index inside the caller's transaction.
//!
//! ## Send
//!
//! ```text
//! validate request ─→ sender == caller ─→ peer org == caller
//!        │
//!        └─→ for each receiver, in order:
//!               mailbox append (sender collection, key = receiver)
//!               notice upsert  (shared, key = mn/receiver/sender)
//! ```
//!
//! Any failure aborts the call; the transaction is never committed, so no
//! receiver sees a partial send.
//!
//! ## Concurrency
//!
//! Two sends from the same sender to the same receiver read and rewrite the
//! same mailbox and notice keys. Whichever commits second fails ledger
//! validation and surfaces as a retryable `Storage` error. Nothing here
//! retries.

use crate::config::{ConfigError, MessagingConfig};
use crate::domain::{
    verify_caller_hosted_locally, verify_receiver_matches_caller, verify_sender_matches_caller,
};
use crate::errors::{AuthorizationError, MessagingError};
use crate::events::{Conversation, ReadMessagesResponse, SendRequest};
use crate::mailbox::Mailbox;
use crate::notice_index::NoticeIndex;
use crate::ports::{MessagingApi, TransactionContext};
use shared_types::OrgId;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Confidential messaging chaincode.
#[derive(Debug, Clone, Default)]
pub struct MessagingService {
    config: MessagingConfig,
}

impl MessagingService {
    /// Create a service, rejecting invalid configuration.
    pub fn new(config: MessagingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MessagingConfig {
        &self.config
    }

    fn notices(&self) -> NoticeIndex<'_> {
        NoticeIndex::new(&self.config.notice_object_type)
    }

    fn mailbox(&self) -> Mailbox<'_> {
        Mailbox::new(&self.config.collection_suffix)
    }

    /// Checks every request field before any state is touched.
    fn validate_send(&self, request: &SendRequest) -> Result<(OrgId, Vec<OrgId>), MessagingError> {
        let sender = parse_org("sender", &request.sender)?;

        if request.receivers.is_empty() {
            return Err(MessagingError::validation(
                "receivers field must be a non-empty list",
            ));
        }
        if request.receivers.len() > self.config.max_receivers {
            return Err(MessagingError::validation(format!(
                "{} receivers exceeds the limit of {}",
                request.receivers.len(),
                self.config.max_receivers
            )));
        }
        if request.message.is_empty() {
            return Err(MessagingError::validation("message field must be non-empty"));
        }
        if request.message.len() > self.config.max_message_bytes {
            return Err(MessagingError::validation(format!(
                "message of {} bytes exceeds the limit of {}",
                request.message.len(),
                self.config.max_message_bytes
            )));
        }
        if request.note.is_empty() {
            return Err(MessagingError::validation(
                "note field must be a non-empty string",
            ));
        }

        let mut seen = BTreeSet::new();
        let mut receivers = Vec::with_capacity(request.receivers.len());
        for name in &request.receivers {
            let receiver = parse_org("receiver", name)?;
            if !seen.insert(receiver.clone()) {
                return Err(MessagingError::validation(format!(
                    "receiver {receiver} is listed more than once"
                )));
            }
            receivers.push(receiver);
        }
        Ok((sender, receivers))
    }
}

fn parse_org(field: &str, value: &str) -> Result<OrgId, MessagingError> {
    OrgId::new(value)
        .map_err(|e| MessagingError::validation(format!("{field} field is invalid: {e}")))
}

fn deny(err: AuthorizationError) -> MessagingError {
    warn!(error = %err, "Request rejected");
    err.into()
}

impl MessagingApi for MessagingService {
    #[instrument(
        skip(self, ctx, request),
        fields(tx_id = %ctx.tx_id(), sender = %request.sender, receivers = request.receivers.len())
    )]
    fn send(
        &self,
        ctx: &mut dyn TransactionContext,
        request: &SendRequest,
    ) -> Result<(), MessagingError> {
        let (sender, receivers) = self.validate_send(request)?;

        let suffix = &self.config.msp_suffix;
        verify_sender_matches_caller(&sender, ctx.client_msp_id(), suffix).map_err(deny)?;
        verify_caller_hosted_locally(ctx.client_msp_id(), ctx.peer_msp_id()).map_err(deny)?;

        let (mailbox, notices) = (self.mailbox(), self.notices());
        let stub = ctx.stub();
        for receiver in &receivers {
            let count =
                mailbox.append_message(stub, &sender, receiver, &request.message, &request.note)?;
            let transition = notices.upsert_notice(stub, receiver.as_str(), sender.as_str())?;
            debug!(%receiver, count, ?transition, "Delivered");
        }

        info!("Message sent");
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    fn send_from_transient(&self, ctx: &mut dyn TransactionContext) -> Result<(), MessagingError> {
        let key = &self.config.transient_message_key;
        let bytes = ctx.transient().get(key).ok_or_else(|| {
            MessagingError::validation(format!("{key} must be a key in the transient map"))
        })?;
        let request: SendRequest = serde_json::from_slice(bytes).map_err(|e| {
            MessagingError::validation(format!("failed to decode transient {key}: {e}"))
        })?;
        self.send(ctx, &request)
    }

    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    fn read_notices(
        &self,
        ctx: &mut dyn TransactionContext,
        receiver: &str,
    ) -> Result<Vec<String>, MessagingError> {
        let receiver = parse_org("receiver", receiver)?;
        verify_receiver_matches_caller(&receiver, ctx.client_msp_id(), &self.config.msp_suffix)
            .map_err(deny)?;

        let senders = self.notices().scan_and_drain(ctx.stub(), receiver.as_str())?;
        info!(count = senders.len(), "Notices read");
        Ok(senders)
    }

    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    fn read_messages(
        &self,
        ctx: &mut dyn TransactionContext,
        sender: &str,
        receiver: &str,
    ) -> Result<ReadMessagesResponse, MessagingError> {
        let sender = parse_org("sender", sender)?;
        let receiver = parse_org("receiver", receiver)?;
        verify_receiver_matches_caller(&receiver, ctx.client_msp_id(), &self.config.msp_suffix)
            .map_err(deny)?;

        let response = self.mailbox().read_mailbox(ctx.stub(), &sender, &receiver)?;
        debug!(count = response.len(), "Messages read");
        Ok(response)
    }

    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    fn notice_exists(
        &self,
        ctx: &mut dyn TransactionContext,
        receiver: &str,
        sender: &str,
    ) -> Result<bool, MessagingError> {
        let receiver = parse_org("receiver", receiver)?;
        let sender = parse_org("sender", sender)?;
        let state = self
            .notices()
            .notice_state(ctx.stub(), receiver.as_str(), sender.as_str())?;
        Ok(state.is_some())
    }

    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    fn read_inbox(
        &self,
        ctx: &mut dyn TransactionContext,
        receiver: &str,
    ) -> Result<Vec<Conversation>, MessagingError> {
        let senders = self.read_notices(ctx, receiver)?;
        let mut inbox = Vec::with_capacity(senders.len());
        for sender in senders {
            let response = self.read_messages(ctx, &sender, receiver)?;
            inbox.push(Conversation::new(sender, response));
        }
        Ok(inbox)
    }
}

// =============================================================================
// TESTS
// =============================================================================
