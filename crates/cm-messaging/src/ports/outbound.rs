//! # Driven Ports (Outbound)
//!
//! The ledger surface the messaging core runs against. One context exists per
//! transaction; every read is served from that transaction's snapshot and
//! every write is buffered until commit.

use cm_ledger::{KvEntry, LedgerError};
use shared_types::{MspId, TransientMap, TxId};

// =============================================================================
// CHAINCODE STUB
// =============================================================================

/// Key/value access for one transaction.
///
/// Reads never observe writes made earlier in the same transaction.
pub trait ChaincodeStub {
    fn tx_id(&self) -> &TxId;

    /// Reads a key of the shared partition.
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Buffers a write to the shared partition.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Returns every shared-partition entry whose composite key starts with
    /// `object_type` followed by `attributes`, in key order.
    fn get_state_by_partial_composite_key(
        &mut self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<Vec<KvEntry>, LedgerError>;

    /// Reads a key of a private collection.
    fn get_private_data(
        &mut self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Buffers a write to a private collection.
    fn put_private_data(
        &mut self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError>;

    fn create_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<String, LedgerError> {
        cm_ledger::create_composite_key(object_type, attributes)
    }

    fn split_composite_key(&self, key: &str) -> Result<(String, Vec<String>), LedgerError> {
        cm_ledger::split_composite_key(key)
    }
}

// =============================================================================
// TRANSACTION CONTEXT
// =============================================================================

/// Everything a chaincode invocation sees besides its arguments.
pub trait TransactionContext {
    fn stub(&mut self) -> &mut dyn ChaincodeStub;

    fn tx_id(&self) -> &TxId;

    /// MSP ID of the client that submitted the transaction.
    fn client_msp_id(&self) -> &MspId;

    /// MSP ID of the peer executing the transaction.
    fn peer_msp_id(&self) -> &MspId;

    /// Transient input; never written to the transaction record.
    fn transient(&self) -> &TransientMap;
}
