use crate::domain::{
    create_composite_key, prefix_range, CollectionConfig, KvEntry, KvRead, KvWrite,
    LedgerError, Namespace, RangeQueryInfo, TxReadWriteSet, Version, WorldState,
};
use shared_types::{MspId, TxId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Executes one transaction against an immutable snapshot.
///
/// Reads come from the snapshot only; a transaction never observes its own
/// buffered writes. Every read is recorded with the version it saw so the
/// ledger can reject the transaction at commit if that state moved.
#[derive(Debug)]
pub struct TxSimulator {
    tx_id: TxId,
    client: MspId,
    peer: MspId,
    snapshot: Arc<WorldState>,
    collections: Arc<BTreeMap<String, CollectionConfig>>,
    reads: BTreeMap<(Namespace, String), Option<Version>>,
    range_queries: Vec<RangeQueryInfo>,
    writes: BTreeMap<(Namespace, String), Vec<u8>>,
}

impl TxSimulator {
    pub(crate) fn new(
        tx_id: TxId,
        client: MspId,
        peer: MspId,
        snapshot: Arc<WorldState>,
        collections: Arc<BTreeMap<String, CollectionConfig>>,
    ) -> Self {
        Self {
            tx_id,
            client,
            peer,
            snapshot,
            collections,
            reads: BTreeMap::new(),
            range_queries: Vec::new(),
            writes: BTreeMap::new(),
        }
    }

    pub fn tx_id(&self) -> &TxId {
        &self.tx_id
    }

    /// Organization of the submitting client.
    pub fn client(&self) -> &MspId {
        &self.client
    }

    /// Organization of the executing peer.
    pub fn peer(&self) -> &MspId {
        &self.peer
    }

    // === Public namespace ===

    pub fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        check_key(key)?;
        Ok(self.read(Namespace::Public, key))
    }

    pub fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        check_key(key)?;
        self.writes.insert((Namespace::Public, key.to_string()), value);
        Ok(())
    }

    /// Scans every public key sharing the composite prefix built from
    /// `object_type` and the leading `attributes`, in key order.
    pub fn get_state_by_partial_composite_key(
        &mut self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<Vec<KvEntry>, LedgerError> {
        let prefix = create_composite_key(object_type, attributes)?;
        let (start_key, end_key) = prefix_range(&prefix);

        let mut entries = Vec::new();
        let mut results = Vec::new();
        for (key, value) in self.snapshot.range(&Namespace::Public, &start_key, &end_key) {
            results.push((key.clone(), value.version));
            entries.push(KvEntry {
                key: key.clone(),
                value: value.value.clone(),
            });
        }

        self.range_queries.push(RangeQueryInfo {
            namespace: Namespace::Public,
            start_key,
            end_key,
            results,
        });
        Ok(entries)
    }

    // === Private collections ===

    pub fn get_private_data(
        &mut self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        check_key(key)?;
        self.check_hosted(collection)?;
        Ok(self.read(Namespace::Private(collection.to_string()), key))
    }

    pub fn put_private_data(
        &mut self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        check_key(key)?;
        self.check_hosted(collection)?;
        self.check_writable(collection)?;
        self.writes
            .insert((Namespace::Private(collection.to_string()), key.to_string()), value);
        Ok(())
    }

    /// Finishes simulation and hands back what the ledger must validate.
    pub fn into_rwset(self) -> TxReadWriteSet {
        TxReadWriteSet {
            tx_id: self.tx_id,
            reads: self
                .reads
                .into_iter()
                .map(|((namespace, key), version)| KvRead {
                    namespace,
                    key,
                    version,
                })
                .collect(),
            range_queries: self.range_queries,
            writes: self
                .writes
                .into_iter()
                .map(|((namespace, key), value)| KvWrite {
                    namespace,
                    key,
                    value,
                })
                .collect(),
        }
    }

    fn read(&mut self, namespace: Namespace, key: &str) -> Option<Vec<u8>> {
        let committed = self.snapshot.get(&namespace, key);
        let version = committed.map(|v| v.version);
        let value = committed.map(|v| v.value.clone());
        self.reads.insert((namespace, key.to_string()), version);
        value
    }

    fn collection_config(&self, collection: &str) -> Result<&CollectionConfig, LedgerError> {
        self.collections
            .get(collection)
            .ok_or_else(|| LedgerError::UnknownCollection(collection.to_string()))
    }

    fn check_hosted(&self, collection: &str) -> Result<(), LedgerError> {
        if self.collection_config(collection)?.is_member(&self.peer) {
            Ok(())
        } else {
            Err(LedgerError::CollectionNotHosted {
                collection: collection.to_string(),
                peer: self.peer.to_string(),
            })
        }
    }

    fn check_writable(&self, collection: &str) -> Result<(), LedgerError> {
        if self.collection_config(collection)?.is_writer(&self.client) {
            Ok(())
        } else {
            Err(LedgerError::CollectionWriteDenied {
                collection: collection.to_string(),
                client: self.client.to_string(),
            })
        }
    }
}

fn check_key(key: &str) -> Result<(), LedgerError> {
    if key.is_empty() {
        return Err(LedgerError::EmptyKey);
    }
    Ok(())
}
