//! Ordered secondary indexes.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::IndexMeta;

use super::record::{Record, Rid};

/// Secondary index mapping a field's cell bytes to the rows holding them.
///
/// Keys are the raw cell bytes, so equality is byte equality of the stored
/// encoding.
#[derive(Debug, Clone)]
pub struct Index {
    meta: IndexMeta,
    entries: BTreeMap<Vec<u8>, BTreeSet<Rid>>,
}

impl Index {
    pub fn new(meta: IndexMeta) -> Self {
        Self {
            meta,
            entries: BTreeMap::new(),
        }
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Extracts the key bytes of `record`.
    pub fn key_of<'a>(&self, record: &'a Record) -> &'a [u8] {
        &record.data()[self.meta.field.cell_range()]
    }

    /// Returns true when inserting `key` for `rid` would break uniqueness.
    pub fn conflicts(&self, key: &[u8], rid: Rid) -> bool {
        self.meta.unique
            && self
                .entries
                .get(key)
                .is_some_and(|rids| rids.iter().any(|&r| r != rid))
    }

    pub(crate) fn insert(&mut self, key: &[u8], rid: Rid) {
        self.entries.entry(key.to_vec()).or_default().insert(rid);
    }

    pub(crate) fn remove(&mut self, key: &[u8], rid: Rid) {
        if let Some(rids) = self.entries.get_mut(key) {
            rids.remove(&rid);
            if rids.is_empty() {
                self.entries.remove(key);
            }
        }
    }

    /// Rows whose key equals `key`, in rid order.
    pub fn lookup(&self, key: &[u8]) -> Vec<Rid> {
        self.entries
            .get(key)
            .map(|rids| rids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}
