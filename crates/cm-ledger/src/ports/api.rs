use crate::adapters::TxSimulator;
use crate::domain::{CollectionConfig, CommitReceipt, LedgerError, TxReadWriteSet, ValidationCode};
use shared_types::{MspId, TxId};

/// Primary API for ledger operations
pub trait LedgerApi: Send + Sync {
    // === Configuration ===

    fn define_collection(&self, config: CollectionConfig);

    fn collection(&self, name: &str) -> Option<CollectionConfig>;

    // === Simulation ===

    /// Opens a simulator over the current committed snapshot.
    ///
    /// `client` is the organization that submitted the transaction; `peer` is
    /// the organization of the peer executing it.
    fn simulate(&self, tx_id: TxId, client: MspId, peer: MspId) -> TxSimulator;

    // === Commit ===

    /// Validates and commits an ordered block of transactions.
    ///
    /// Each transaction is validated against committed state including the
    /// writes of earlier valid transactions in the same block.
    fn commit_block(&self, block: Vec<TxReadWriteSet>) -> Vec<ValidationCode>;

    /// Commits a single transaction as its own block.
    fn commit(&self, rwset: TxReadWriteSet) -> Result<CommitReceipt, LedgerError>;

    // === Queries ===

    /// Number of committed blocks.
    fn height(&self) -> u64;
}
