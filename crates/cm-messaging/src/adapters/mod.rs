//! # Adapters Layer
//!
//! Binds the outbound ports to `cm-ledger` and hosts the service on a peer.

pub mod ledger_context;
pub mod peer;

pub use ledger_context::*;
pub use peer::*;
