use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

// =============================================================================
// NOTICE
// =============================================================================

/// Stored value of a notice. Absence of the key is the third state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeState {
    /// A message arrived since the receiver last read notices.
    Unread,
    /// The receiver has seen this notice and nothing new has arrived.
    Read,
}

impl NoticeState {
    const UNREAD: &'static [u8] = b"1";
    const READ: &'static [u8] = b"0";

    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Unread => Self::UNREAD,
            Self::Read => Self::READ,
        }
    }

    /// Decodes a stored value; anything but `"1"` or `"0"` is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            Self::UNREAD => Some(Self::Unread),
            Self::READ => Some(Self::Read),
            _ => None,
        }
    }
}

/// What an upsert did to a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTransition {
    /// No notice existed; one was written as unread.
    Created,
    /// A read notice was flipped back to unread.
    Refreshed,
    /// Already unread; nothing written.
    AlreadyUnread,
}

impl NoticeTransition {
    pub fn wrote(self) -> bool {
        !matches!(self, Self::AlreadyUnread)
    }
}

// =============================================================================
// MAILBOX RECORD
// =============================================================================

/// Every message one sender has sent one receiver.
///
/// `messages[i]` and `notes[i]` belong to the same send. Both only grow.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxRecord {
    pub sender: String,
    pub receiver: String,
    #[serde_as(as = "Vec<Base64>")]
    pub messages: Vec<Vec<u8>>,
    pub notes: Vec<String>,
}

impl MailboxRecord {
    /// Record holding a single message.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        message: Vec<u8>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            messages: vec![message],
            notes: vec![note.into()],
        }
    }

    pub fn append(&mut self, message: Vec<u8>, note: impl Into<String>) {
        self.messages.push(message);
        self.notes.push(note.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Payloads as strings. Invalid UTF-8 is replaced, not rejected.
    pub fn messages_as_strings(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|m| String::from_utf8_lossy(m).into_owned())
            .collect()
    }
}
