//! # Shared Types Crate
//!
//! This crate contains the identity types every other crate in the workspace
//! agrees on: the plain organization name (`OrgId`), the membership-service
//! identifier an organization is authenticated as (`MspId`), and the
//! per-transaction aliases handed from the ledger to the messaging core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The `OrgId` -> `MspId` and `OrgId` ->
//!   collection-name derivations live here and nowhere else.
//! - **Context Identity**: Callers are identified by the `MspId` reported by the
//!   transaction context, never by a field in the request payload.

pub mod entities;
pub mod errors;
pub mod identity;

pub use entities::*;
pub use errors::*;
pub use identity::*;
