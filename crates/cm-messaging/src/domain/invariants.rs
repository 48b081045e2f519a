//! # Mailbox Invariants
//!
//! Checks applied to every Mailbox Record decoded from storage and to every
//! record about to be written.
//!
//! - Alignment: `messages` and `notes` have equal length.
//! - Ownership: the record's sender and receiver match the key it was stored
//!   under.
//! - Monotonicity: a rewrite keeps every earlier entry and adds exactly one.

use crate::domain::entities::MailboxRecord;
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Messages and notes are index-aligned.
#[must_use]
pub fn check_alignment_invariant(record: &MailboxRecord) -> bool {
    record.messages.len() == record.notes.len() && !record.messages.is_empty()
}

/// The record belongs to the (sender, receiver) pair it is stored under.
#[must_use]
pub fn check_ownership_invariant(record: &MailboxRecord, sender: &str, receiver: &str) -> bool {
    record.sender == sender && record.receiver == receiver
}

/// `after` is `before` plus exactly one appended message.
#[must_use]
pub fn check_monotonic_invariant(before: Option<&MailboxRecord>, after: &MailboxRecord) -> bool {
    let Some(before) = before else {
        return after.len() == 1;
    };
    after.len() == before.len() + 1
        && after.messages.starts_with(&before.messages)
        && after.notes.starts_with(&before.notes)
}

/// Checks alignment and ownership of a stored record.
#[must_use]
pub fn check_all_invariants(
    record: &MailboxRecord,
    sender: &str,
    receiver: &str,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_alignment_invariant(record) {
        violations.push(InvariantViolation::Misaligned {
            messages: record.messages.len(),
            notes: record.notes.len(),
        });
    }

    if !check_ownership_invariant(record, sender, receiver) {
        violations.push(InvariantViolation::WrongOwner {
            sender: record.sender.clone(),
            receiver: record.receiver.clone(),
        });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    Valid,
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Messages and notes differ in length, or the record is empty.
    Misaligned { messages: usize, notes: usize },
    /// Stored sender/receiver disagree with the key.
    WrongOwner { sender: String, receiver: String },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned { messages, notes } => {
                write!(f, "{messages} messages but {notes} notes")
            }
            Self::WrongOwner { sender, receiver } => {
                write!(f, "record addressed from {sender} to {receiver}")
            }
        }
    }
}

impl fmt::Display for InvariantCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid(violations) => {
                let joined: Vec<String> = violations.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join("; "))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
