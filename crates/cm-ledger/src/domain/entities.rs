use serde::{Deserialize, Serialize};
use shared_types::{MspId, TxId};
use std::collections::BTreeSet;
use std::fmt;

/// Height of the transaction that last wrote a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub block_num: u64,
    pub tx_num: u64,
}

impl Version {
    pub fn new(block_num: u64, tx_num: u64) -> Self {
        Self { block_num, tx_num }
    }
}

/// Logical partition of the world state.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Shared partition, readable by every organization on the channel.
    Public,
    /// Private data collection, identified by name.
    Private(String),
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private(name) => write!(f, "private:{name}"),
        }
    }
}

/// Committed value together with its version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: Version,
}

/// Key/value pair returned by a range scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: Vec<u8>,
}

/// A point read recorded during simulation. `version` is `None` when the key
/// was absent from the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRead {
    pub namespace: Namespace,
    pub key: String,
    pub version: Option<Version>,
}

/// A buffered write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvWrite {
    pub namespace: Namespace,
    pub key: String,
    pub value: Vec<u8>,
}

/// A range scan recorded during simulation, with every `(key, version)` it
/// returned. Re-running the scan at validation must yield the same sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQueryInfo {
    pub namespace: Namespace,
    pub start_key: String,
    pub end_key: String,
    pub results: Vec<(String, Version)>,
}

/// Everything a simulated transaction read and wants to write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReadWriteSet {
    pub tx_id: TxId,
    pub reads: Vec<KvRead>,
    pub range_queries: Vec<RangeQueryInfo>,
    pub writes: Vec<KvWrite>,
}

impl TxReadWriteSet {
    pub fn new(tx_id: TxId) -> Self {
        Self {
            tx_id,
            reads: vec![],
            range_queries: vec![],
            writes: vec![],
        }
    }

    /// True if the transaction only read state.
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Outcome of validating one transaction of a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationCode {
    Valid,
    MvccReadConflict { namespace: Namespace, key: String },
    PhantomReadConflict { namespace: Namespace, start_key: String },
    DuplicateTxId,
}

impl ValidationCode {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Receipt for a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    pub tx_id: TxId,
    pub version: Version,
}

/// Private data collection definition.
///
/// `members` are the organizations whose peers host the collection and may
/// therefore serve reads and endorse writes. `writers` are the organizations
/// whose clients may submit writes to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    pub members: BTreeSet<MspId>,
    pub writers: BTreeSet<MspId>,
}

impl CollectionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
            writers: BTreeSet::new(),
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = MspId>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn with_writers(mut self, writers: impl IntoIterator<Item = MspId>) -> Self {
        self.writers.extend(writers);
        self
    }

    /// Collection owned by a single organization: only `owner` writes, the
    /// owner and every reader host it.
    pub fn sender_owned(
        name: impl Into<String>,
        owner: MspId,
        readers: impl IntoIterator<Item = MspId>,
    ) -> Self {
        Self::new(name)
            .with_members(std::iter::once(owner.clone()).chain(readers))
            .with_writers([owner])
    }

    pub fn is_member(&self, msp: &MspId) -> bool {
        self.members.contains(msp)
    }

    pub fn is_writer(&self, msp: &MspId) -> bool {
        self.writers.contains(msp)
    }
}
