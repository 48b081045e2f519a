use crate::adapters::TxSimulator;
use crate::domain::{
    validate_transaction, CollectionConfig, CommitReceipt, LedgerError, TxReadWriteSet,
    ValidationCode, Version, WorldState,
};
use crate::ports::LedgerApi;
use parking_lot::RwLock;
use shared_types::{MspId, TxId};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct LedgerState {
    world: Arc<WorldState>,
    collections: Arc<BTreeMap<String, CollectionConfig>>,
    height: u64,
    committed_tx_ids: HashSet<TxId>,
}

impl LedgerState {
    /// Validates one transaction against committed state (including earlier
    /// transactions of the current block) and applies its writes if valid.
    fn apply_transaction(&mut self, rwset: &TxReadWriteSet, version: Version) -> ValidationCode {
        let code = if self.committed_tx_ids.contains(&rwset.tx_id) {
            ValidationCode::DuplicateTxId
        } else {
            validate_transaction(&self.world, rwset)
        };

        if code.is_valid() {
            Arc::make_mut(&mut self.world).apply(&rwset.writes, version);
            self.committed_tx_ids.insert(rwset.tx_id.clone());
            debug!(
                tx_id = %rwset.tx_id,
                block_num = version.block_num,
                tx_num = version.tx_num,
                writes = rwset.writes.len(),
                "Transaction committed"
            );
        } else {
            warn!(
                tx_id = %rwset.tx_id,
                block_num = version.block_num,
                tx_num = version.tx_num,
                code = ?code,
                "Transaction invalidated"
            );
        }
        code
    }
}

/// In-memory ledger for hosting chaincode in tests and local runs.
///
/// Snapshots are shared `Arc`s; a commit clones the world state only while an
/// older snapshot is still held by a simulator.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(collections: impl IntoIterator<Item = CollectionConfig>) -> Self {
        let ledger = Self::new();
        for config in collections {
            ledger.define_collection(config);
        }
        ledger
    }

    /// Current committed snapshot.
    pub fn snapshot(&self) -> Arc<WorldState> {
        Arc::clone(&self.state.read().world)
    }
}

impl LedgerApi for InMemoryLedger {
    fn define_collection(&self, config: CollectionConfig) {
        let mut state = self.state.write();
        Arc::make_mut(&mut state.collections).insert(config.name.clone(), config);
    }

    fn collection(&self, name: &str) -> Option<CollectionConfig> {
        self.state.read().collections.get(name).cloned()
    }

    fn simulate(&self, tx_id: TxId, client: MspId, peer: MspId) -> TxSimulator {
        let state = self.state.read();
        debug!(%tx_id, %client, %peer, height = state.height, "Opening simulator");
        TxSimulator::new(
            tx_id,
            client,
            peer,
            Arc::clone(&state.world),
            Arc::clone(&state.collections),
        )
    }

    fn commit_block(&self, block: Vec<TxReadWriteSet>) -> Vec<ValidationCode> {
        if block.is_empty() {
            return Vec::new();
        }

        let mut state = self.state.write();
        let block_num = state.height + 1;
        let codes = block
            .iter()
            .enumerate()
            .map(|(tx_num, rwset)| {
                state.apply_transaction(rwset, Version::new(block_num, tx_num as u64))
            })
            .collect();
        state.height = block_num;
        codes
    }

    fn commit(&self, rwset: TxReadWriteSet) -> Result<CommitReceipt, LedgerError> {
        let mut state = self.state.write();
        let version = Version::new(state.height + 1, 0);
        let code = state.apply_transaction(&rwset, version);
        state.height = version.block_num;

        let tx_id = rwset.tx_id;
        match code {
            ValidationCode::Valid => Ok(CommitReceipt { tx_id, version }),
            ValidationCode::MvccReadConflict { key, .. } => Err(LedgerError::MvccConflict {
                tx_id: tx_id.to_string(),
                key,
            }),
            ValidationCode::PhantomReadConflict { start_key, .. } => Err(LedgerError::PhantomRead {
                tx_id: tx_id.to_string(),
                start_key,
            }),
            ValidationCode::DuplicateTxId => Err(LedgerError::DuplicateTxId(tx_id.to_string())),
        }
    }

    fn height(&self) -> u64 {
        self.state.read().height
    }
}
