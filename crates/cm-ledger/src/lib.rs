//! # cm-ledger
//!
//! Versioned key-value ledger used to host and exercise the confidential
//! messaging chaincode.
//!
//! ## Role in System
//!
//! - **World State**: Public namespace plus one private namespace per
//!   collection, every key carrying the `Version` of the transaction that
//!   last wrote it.
//! - **Simulation**: Chaincode runs against an immutable snapshot through a
//!   `TxSimulator`, which records every read version, every range scan, and
//!   buffers every write.
//! - **Validation**: Transactions are validated in block order. A read whose
//!   version moved, or a range scan whose result set changed, invalidates the
//!   transaction and none of its writes are applied.
//!
//! ## Transaction Lifecycle
//!
//! ```text
//! simulate(tx_id, client, peer) ──→ TxSimulator (snapshot @ height h)
//!                                        │ get/put/scan
//!                                        ↓
//!                                   TxReadWriteSet
//!                                        │
//!              commit_block([rwset, ...]) ─→ ValidationCode per tx
//!                                        │
//!                                 valid writes applied @ (h+1, tx_num)
//! ```
//!
//! ## Access Control
//!
//! - A peer reads or writes a private collection only if its organization is a
//!   collection member.
//! - A client writes a private collection only if its organization is a
//!   collection writer.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
