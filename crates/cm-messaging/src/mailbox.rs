//! # Confidential Mailbox
//!
//! One record per (sender, receiver), stored in the sender's private
//! collection under the receiver's name. Only the sender writes it; the
//! receiver reads it through a peer that hosts the collection.

use crate::domain::{check_all_invariants, check_monotonic_invariant, MailboxRecord};
use crate::errors::MessagingError;
use crate::events::ReadMessagesResponse;
use crate::ports::ChaincodeStub;
use cm_ledger::Namespace;
use shared_types::OrgId;
use tracing::debug;

/// Mailbox operations over a chaincode stub.
#[derive(Debug, Clone, Copy)]
pub struct Mailbox<'a> {
    collection_suffix: &'a str,
}

impl<'a> Mailbox<'a> {
    pub fn new(collection_suffix: &'a str) -> Self {
        Self { collection_suffix }
    }

    /// Collection holding every mailbox written by `sender`.
    pub fn collection(&self, sender: &OrgId) -> String {
        sender.collection_name(self.collection_suffix)
    }

    /// Appends one message, creating the record on first send. Returns the
    /// number of messages now in the record.
    pub fn append_message(
        &self,
        stub: &mut dyn ChaincodeStub,
        sender: &OrgId,
        receiver: &OrgId,
        message: &[u8],
        note: &str,
    ) -> Result<usize, MessagingError> {
        if message.is_empty() {
            return Err(MessagingError::validation("message must be non-empty"));
        }
        if note.is_empty() {
            return Err(MessagingError::validation("note must be a non-empty string"));
        }

        let collection = self.collection(sender);
        let existing = self.load(stub, &collection, sender, receiver)?;

        let record = match existing.clone() {
            Some(mut record) => {
                record.append(message.to_vec(), note);
                record
            }
            None => MailboxRecord::new(sender.as_str(), receiver.as_str(), message.to_vec(), note),
        };
        debug_assert!(check_monotonic_invariant(existing.as_ref(), &record));

        let bytes = serde_json::to_vec(&record)?;
        stub.put_private_data(&collection, receiver.as_str(), bytes)?;
        debug!(%sender, %receiver, count = record.len(), "Mailbox record written");
        Ok(record.len())
    }

    /// Every message `sender` has sent `receiver`, oldest first.
    pub fn read_mailbox(
        &self,
        stub: &mut dyn ChaincodeStub,
        sender: &OrgId,
        receiver: &OrgId,
    ) -> Result<ReadMessagesResponse, MessagingError> {
        let collection = self.collection(sender);
        let record = self
            .load(stub, &collection, sender, receiver)?
            .ok_or_else(|| MessagingError::NotFound {
                sender: sender.to_string(),
                receiver: receiver.to_string(),
            })?;

        Ok(ReadMessagesResponse {
            messages: record.messages_as_strings(),
            notes: record.notes,
        })
    }

    fn load(
        &self,
        stub: &mut dyn ChaincodeStub,
        collection: &str,
        sender: &OrgId,
        receiver: &OrgId,
    ) -> Result<Option<MailboxRecord>, MessagingError> {
        let Some(bytes) = stub.get_private_data(collection, receiver.as_str())? else {
            return Ok(None);
        };

        let corrupt = |reason: String| MessagingError::CorruptRecord {
            namespace: Namespace::Private(collection.to_string()).to_string(),
            key: receiver.to_string(),
            reason,
        };
        let record: MailboxRecord =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
        let check = check_all_invariants(&record, sender.as_str(), receiver.as_str());
        if !check.is_valid() {
            return Err(corrupt(check.to_string()));
        }
        Ok(Some(record))
    }
}
