use super::{KvWrite, Namespace, Version, VersionedValue};
use std::collections::BTreeMap;

/// Committed key/value state of every namespace.
///
/// Keys are ordered by their UTF-8 bytes, which matches code point order, so
/// range scans return composite keys in attribute order.
#[derive(Clone, Debug, Default)]
pub struct WorldState {
    namespaces: BTreeMap<Namespace, BTreeMap<String, VersionedValue>>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, namespace: &Namespace, key: &str) -> Option<&VersionedValue> {
        self.namespaces.get(namespace).and_then(|ns| ns.get(key))
    }

    pub fn version(&self, namespace: &Namespace, key: &str) -> Option<Version> {
        self.get(namespace, key).map(|v| v.version)
    }

    /// Entries with `start <= key < end`, in key order.
    pub fn range<'a>(
        &'a self,
        namespace: &Namespace,
        start: &str,
        end: &str,
    ) -> impl Iterator<Item = (&'a String, &'a VersionedValue)> + 'a {
        // BTreeMap::range panics on an inverted range.
        let bounds = (start < end).then(|| (start.to_string(), end.to_string()));
        self.namespaces
            .get(namespace)
            .zip(bounds)
            .into_iter()
            .flat_map(|(ns, (start, end))| ns.range(start..end))
    }

    /// Applies a transaction's writes at the given version.
    pub fn apply(&mut self, writes: &[KvWrite], version: Version) {
        for write in writes {
            self.namespaces
                .entry(write.namespace.clone())
                .or_default()
                .insert(
                    write.key.clone(),
                    VersionedValue {
                        value: write.value.clone(),
                        version,
                    },
                );
        }
    }

    /// Number of keys in a namespace.
    pub fn len(&self, namespace: &Namespace) -> usize {
        self.namespaces.get(namespace).map_or(0, BTreeMap::len)
    }
}
