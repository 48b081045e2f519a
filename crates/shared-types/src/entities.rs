//! # Transaction Entities
//!
//! Per-transaction values handed from the ledger to chaincode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Transient input of a transaction.
///
/// Visible to chaincode during simulation but never written to the
/// transaction's read/write set, so raw payloads stay out of the audit trail.
pub type TransientMap = BTreeMap<String, Vec<u8>>;

/// Unique identifier of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId(pub String);

impl TxId {
    /// Generates a fresh random transaction id.
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrows the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TxId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
