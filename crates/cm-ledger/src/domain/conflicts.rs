use super::{Namespace, TxReadWriteSet, ValidationCode, WorldState};
use serde::{Deserialize, Serialize};

/// Validates a simulated transaction against committed state.
///
/// Point reads must still see the version recorded at simulation time
/// (absent keys must still be absent). Range scans must return the same
/// `(key, version)` sequence, so a key inserted into or removed from a scanned
/// range is caught even though no single recorded read changed.
pub fn validate_transaction(state: &WorldState, rwset: &TxReadWriteSet) -> ValidationCode {
    for read in &rwset.reads {
        if state.version(&read.namespace, &read.key) != read.version {
            return ValidationCode::MvccReadConflict {
                namespace: read.namespace.clone(),
                key: read.key.clone(),
            };
        }
    }

    for query in &rwset.range_queries {
        let current = state
            .range(&query.namespace, &query.start_key, &query.end_key)
            .map(|(key, value)| (key, value.version));
        if !current.eq(query.results.iter().map(|(key, version)| (key, *version))) {
            return ValidationCode::PhantomReadConflict {
                namespace: query.namespace.clone(),
                start_key: query.start_key.clone(),
            };
        }
    }

    ValidationCode::Valid
}

/// Conflict type between two transactions simulated on the same snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictType {
    ReadWrite,
    WriteWrite,
    RangeWrite,
}

/// Conflict information
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub tx1_index: usize,
    pub tx2_index: usize,
    pub conflict_type: ConflictType,
    pub namespace: Namespace,
    pub key: String,
}

/// Finds pairs of transactions that cannot both commit if ordered into the
/// same block after simulating against the same snapshot.
///
/// This is a static analysis over read/write sets; `validate_transaction` is
/// what actually rejects the later transaction at commit.
#[allow(clippy::excessive_nesting)]
pub fn detect_conflicts(rwsets: &[TxReadWriteSet]) -> Vec<ConflictInfo> {
    let mut conflicts = Vec::new();

    for i in 0..rwsets.len() {
        for j in (i + 1)..rwsets.len() {
            let p1 = &rwsets[i];
            let p2 = &rwsets[j];

            // Write-Write
            for w1 in &p1.writes {
                for w2 in &p2.writes {
                    if w1.namespace == w2.namespace && w1.key == w2.key {
                        conflicts.push(ConflictInfo {
                            tx1_index: i,
                            tx2_index: j,
                            conflict_type: ConflictType::WriteWrite,
                            namespace: w1.namespace.clone(),
                            key: w1.key.clone(),
                        });
                    }
                }
            }

            // Read-Write in either direction
            for (reader, writer) in [(p1, p2), (p2, p1)] {
                for read in &reader.reads {
                    for write in &writer.writes {
                        if read.namespace == write.namespace && read.key == write.key {
                            conflicts.push(ConflictInfo {
                                tx1_index: i,
                                tx2_index: j,
                                conflict_type: ConflictType::ReadWrite,
                                namespace: read.namespace.clone(),
                                key: read.key.clone(),
                            });
                        }
                    }
                }

                for query in &reader.range_queries {
                    for write in &writer.writes {
                        if query.namespace == write.namespace
                            && query.start_key <= write.key
                            && write.key < query.end_key
                        {
                            conflicts.push(ConflictInfo {
                                tx1_index: i,
                                tx2_index: j,
                                conflict_type: ConflictType::RangeWrite,
                                namespace: query.namespace.clone(),
                                key: write.key.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    conflicts
}
