//! # Domain Layer
//!
//! Pure messaging logic with no ledger access.

pub mod entities;
pub mod identity;
pub mod invariants;

pub use entities::*;
pub use identity::*;
pub use invariants::*;
