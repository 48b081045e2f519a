//! # Notice Index
//!
//! One shared-partition key per (receiver, sender) pair:
//!
//! ```text
//! U+0000 mn U+0000 receiver U+0000 sender U+0000  →  "1" (unread) | "0" (read)
//! ```
//!
//! The receiver is the leading attribute, so a partial-key scan on the
//! receiver returns every sender that has messaged it, ordered by sender.
//! Notices are never deleted.

use crate::domain::{NoticeState, NoticeTransition};
use crate::errors::MessagingError;
use crate::ports::ChaincodeStub;
use cm_ledger::Namespace;
use tracing::debug;

/// Notice operations over a chaincode stub.
#[derive(Debug, Clone, Copy)]
pub struct NoticeIndex<'a> {
    object_type: &'a str,
}

impl<'a> NoticeIndex<'a> {
    pub fn new(object_type: &'a str) -> Self {
        Self { object_type }
    }

    /// Current state of the (receiver, sender) notice, `None` if absent.
    pub fn notice_state(
        &self,
        stub: &mut dyn ChaincodeStub,
        receiver: &str,
        sender: &str,
    ) -> Result<Option<NoticeState>, MessagingError> {
        let key = stub.create_composite_key(self.object_type, &[receiver, sender])?;
        match stub.get_state(&key)? {
            Some(bytes) => decode_state(&key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Marks the notice unread, writing only if it was absent or read.
    pub fn upsert_notice(
        &self,
        stub: &mut dyn ChaincodeStub,
        receiver: &str,
        sender: &str,
    ) -> Result<NoticeTransition, MessagingError> {
        let key = stub.create_composite_key(self.object_type, &[receiver, sender])?;
        let transition = match stub.get_state(&key)? {
            None => NoticeTransition::Created,
            Some(bytes) => match decode_state(&key, &bytes)? {
                NoticeState::Unread => NoticeTransition::AlreadyUnread,
                NoticeState::Read => NoticeTransition::Refreshed,
            },
        };

        if transition.wrote() {
            stub.put_state(&key, NoticeState::Unread.as_bytes().to_vec())?;
        }
        debug!(receiver, sender, ?transition, "Notice upserted");
        Ok(transition)
    }

    /// Returns every sender with a notice for `receiver`, in key order, and
    /// marks each unread notice read.
    pub fn scan_and_drain(
        &self,
        stub: &mut dyn ChaincodeStub,
        receiver: &str,
    ) -> Result<Vec<String>, MessagingError> {
        let entries = stub.get_state_by_partial_composite_key(self.object_type, &[receiver])?;

        let mut senders = Vec::with_capacity(entries.len());
        for entry in entries {
            let sender = self.sender_of(stub, &entry.key, receiver)?;
            if decode_state(&entry.key, &entry.value)? == NoticeState::Unread {
                stub.put_state(&entry.key, NoticeState::Read.as_bytes().to_vec())?;
                debug!(receiver, sender = %sender, "Notice drained");
            }
            senders.push(sender);
        }
        Ok(senders)
    }

    /// Sender attribute of a scanned key, checking the key has the notice shape.
    fn sender_of(
        &self,
        stub: &dyn ChaincodeStub,
        key: &str,
        receiver: &str,
    ) -> Result<String, MessagingError> {
        let (object_type, mut attributes) = stub.split_composite_key(key)?;
        let well_formed = object_type == self.object_type
            && attributes.len() == 2
            && attributes[0] == receiver;
        if !well_formed {
            return Err(corrupt(key, "expected notice key of form (receiver, sender)"));
        }
        Ok(attributes.swap_remove(1))
    }
}

fn decode_state(key: &str, bytes: &[u8]) -> Result<NoticeState, MessagingError> {
    NoticeState::from_bytes(bytes).ok_or_else(|| {
        corrupt(
            key,
            &format!("notice value {:?} is neither \"1\" nor \"0\"", String::from_utf8_lossy(bytes)),
        )
    })
}

fn corrupt(key: &str, reason: &str) -> MessagingError {
    MessagingError::CorruptRecord {
        namespace: Namespace::Public.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
