//! # Error Types
//!
//! Errors raised while constructing identity values.

use thiserror::Error;

/// Errors related to organization identity values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Organization name was empty.
    #[error("organization identity must be a non-empty string")]
    Empty,

    /// Organization name contains a character the ledger cannot key on.
    #[error("organization identity {0:?} contains a reserved character")]
    ReservedCharacter(String),
}
