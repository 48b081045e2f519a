use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Invalid composite key: {0}")]
    InvalidCompositeKey(String),

    #[error("Key must be a non-empty string")]
    EmptyKey,

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Collection {collection} is not hosted by a {peer} peer")]
    CollectionNotHosted { collection: String, peer: String },

    #[error("Client from {client} may not write collection {collection}")]
    CollectionWriteDenied { collection: String, client: String },

    #[error("MVCC read conflict in tx {tx_id}: key {key:?} changed since simulation")]
    MvccConflict { tx_id: String, key: String },

    #[error("Phantom read in tx {tx_id}: range starting at {start_key:?} changed since simulation")]
    PhantomRead { tx_id: String, start_key: String },

    #[error("Duplicate transaction id: {0}")]
    DuplicateTxId(String),
}

impl LedgerError {
    /// True when the transaction lost an optimistic concurrency race and may
    /// succeed if resubmitted against fresh state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::MvccConflict { .. } | Self::PhantomRead { .. })
    }
}
