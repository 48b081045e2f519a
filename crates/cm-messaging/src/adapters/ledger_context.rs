//! # Ledger Context
//!
//! Transaction context backed by a `cm-ledger` simulator.

use crate::ports::outbound::{ChaincodeStub, TransactionContext};
use cm_ledger::{KvEntry, LedgerError, TxReadWriteSet, TxSimulator};
use shared_types::{MspId, TransientMap, TxId};

impl ChaincodeStub for TxSimulator {
    fn tx_id(&self) -> &TxId {
        TxSimulator::tx_id(self)
    }

    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        TxSimulator::get_state(self, key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        TxSimulator::put_state(self, key, value)
    }

    fn get_state_by_partial_composite_key(
        &mut self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<Vec<KvEntry>, LedgerError> {
        TxSimulator::get_state_by_partial_composite_key(self, object_type, attributes)
    }

    fn get_private_data(
        &mut self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        TxSimulator::get_private_data(self, collection, key)
    }

    fn put_private_data(
        &mut self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        TxSimulator::put_private_data(self, collection, key, value)
    }
}

/// One in-flight transaction: simulator plus transient input.
#[derive(Debug)]
pub struct LedgerContext {
    simulator: TxSimulator,
    transient: TransientMap,
}

impl LedgerContext {
    pub fn new(simulator: TxSimulator, transient: TransientMap) -> Self {
        Self {
            simulator,
            transient,
        }
    }

    /// Ends simulation. Transient input is dropped here and never reaches the
    /// read/write set.
    pub fn into_rwset(self) -> TxReadWriteSet {
        self.simulator.into_rwset()
    }
}

impl TransactionContext for LedgerContext {
    fn stub(&mut self) -> &mut dyn ChaincodeStub {
        &mut self.simulator
    }

    fn tx_id(&self) -> &TxId {
        self.simulator.tx_id()
    }

    fn client_msp_id(&self) -> &MspId {
        self.simulator.client()
    }

    fn peer_msp_id(&self) -> &MspId {
        self.simulator.peer()
    }

    fn transient(&self) -> &TransientMap {
        &self.transient
    }
}
