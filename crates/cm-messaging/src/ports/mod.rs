//! # Ports Layer
//!
//! - **Driving Port (Inbound)**: `MessagingApi`
//! - **Driven Ports (Outbound)**: `ChaincodeStub`, `TransactionContext`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
