//! Tables: rows plus secondary indexes.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::catalog::{FieldMeta, IndexMeta, TableId, TableMeta};
use crate::datum::Value;
use crate::error::{DbError, Result};

use super::index::Index;
use super::record::{Record, Rid};

/// Row store state guarded by one lock.
struct TableRows {
    records: BTreeMap<Rid, Record>,
    /// Sequence number of the next rid to hand out.
    next_seq: u64,
}

/// A table of fixed-width records with secondary indexes.
///
/// Lock order is always rows before indexes, so a mutator running inside
/// [`visit_record`](Self::visit_record) may call
/// [`update_index`](Self::update_index).
pub struct Table {
    meta: Arc<TableMeta>,
    slots_per_page: u16,
    rows: RwLock<TableRows>,
    indexes: RwLock<Vec<Index>>,
}

impl Table {
    /// Creates an empty table.
    ///
    /// `slots_per_page` controls how rids are laid out; it is clamped to at
    /// least one.
    pub fn new(meta: TableMeta, slots_per_page: u16) -> Self {
        Self {
            meta: Arc::new(meta),
            slots_per_page: slots_per_page.max(1),
            rows: RwLock::new(TableRows {
                records: BTreeMap::new(),
                next_seq: 0,
            }),
            indexes: RwLock::new(Vec::new()),
        }
    }

    pub fn meta(&self) -> &Arc<TableMeta> {
        &self.meta
    }

    pub fn name(&self) -> &str {
        self.meta.name()
    }

    pub fn table_id(&self) -> TableId {
        self.meta.table_id()
    }

    pub fn row_count(&self) -> usize {
        self.rows.read().records.len()
    }

    fn rid_for(&self, seq: u64) -> Result<Rid> {
        let per_page = u64::from(self.slots_per_page);
        let page_num = u32::try_from(seq / per_page)
            .map_err(|_| DbError::InvalidArgument(format!("table \"{}\" is full", self.name())))?;
        // The remainder is below slots_per_page, which is a u16.
        Ok(Rid::new(page_num, (seq % per_page) as u16))
    }

    /// Encodes `value` into the cell of `field`, casting it to the field's type.
    fn encode_cell(&self, field: &FieldMeta, value: &Value, cell: &mut [u8]) -> Result<()> {
        let value = value.cast_to(field.attr_type())?;
        if value.length() > field.size() {
            return Err(DbError::ValueTooLong {
                field: field.name().to_string(),
                len: value.length(),
                max: field.size(),
            });
        }
        value.write_cell(cell)
    }

    /// Inserts a row and indexes it.
    ///
    /// `values` are given in schema order and cast to the field types. A
    /// unique index violation is detected before anything is stored.
    pub fn insert_record(&self, values: &[Value]) -> Result<Rid> {
        let fields = self.meta.fields();
        if values.len() != fields.len() {
            return Err(DbError::InvalidArgument(format!(
                "table \"{}\" has {} fields but {} values were given",
                self.name(),
                fields.len(),
                values.len()
            )));
        }

        let mut data = vec![0u8; self.meta.record_size()];
        for (field, value) in fields.iter().zip(values) {
            self.encode_cell(field, value, &mut data[field.cell_range()])?;
        }

        let mut rows = self.rows.write();
        let rid = self.rid_for(rows.next_seq)?;
        let record = Record::new(rid, data);

        let mut indexes = self.indexes.write();
        if let Some(index) = indexes
            .iter()
            .find(|index| index.conflicts(index.key_of(&record), rid))
        {
            return Err(DbError::DuplicateKey {
                index: index.name().to_string(),
            });
        }
        for index in indexes.iter_mut() {
            let key = index.key_of(&record).to_vec();
            index.insert(&key, rid);
        }
        drop(indexes);

        rows.next_seq += 1;
        rows.records.insert(rid, record);
        trace!(table = %self.name(), %rid, "inserted record");
        Ok(rid)
    }

    /// Returns a copy of the row at `rid`.
    pub fn get_record(&self, rid: Rid) -> Result<Record> {
        self.rows
            .read()
            .records
            .get(&rid)
            .cloned()
            .ok_or(DbError::RecordNotFound(rid))
    }

    /// Snapshot of all rows in rid order.
    pub fn scan_records(&self) -> Vec<Record> {
        self.rows.read().records.values().cloned().collect()
    }

    /// Runs `mutator` with exclusive access to the row at `rid`.
    ///
    /// The mutator returns whether to keep its change; on `false` the row is
    /// restored to its prior bytes. The row store stays write-locked for the
    /// whole call, so readers observe either the old or the new row. A
    /// mutator that changes the row width is rejected and rolled back.
    pub fn visit_record<F>(&self, rid: Rid, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut Record) -> bool,
    {
        let mut rows = self.rows.write();
        let record = rows
            .records
            .get_mut(&rid)
            .ok_or(DbError::RecordNotFound(rid))?;
        let backup = record.clone();

        if !mutator(&mut *record) {
            debug!(table = %self.name(), %rid, "mutation rolled back");
            *record = backup;
            return Ok(());
        }
        if record.len() != backup.len() {
            let actual = record.len();
            *record = backup;
            return Err(DbError::RecordSizeMismatch {
                expected: self.meta.record_size(),
                actual,
            });
        }
        Ok(())
    }

    /// Moves every index entry of `old` to the key found in `new`.
    ///
    /// Both records must be the same row. Unique violations are checked on
    /// all indexes before any of them changes, so on error every index still
    /// reflects `old`.
    pub fn update_index(&self, old: &Record, new: &Record) -> Result<()> {
        if old.rid() != new.rid() {
            return Err(DbError::InvalidArgument(format!(
                "cannot move index entries from {} to {}",
                old.rid(),
                new.rid()
            )));
        }
        let rid = new.rid();

        let mut indexes = self.indexes.write();
        for index in indexes.iter() {
            let new_key = index.key_of(new);
            if index.key_of(old) != new_key && index.conflicts(new_key, rid) {
                return Err(DbError::DuplicateKey {
                    index: index.name().to_string(),
                });
            }
        }
        for index in indexes.iter_mut() {
            let old_key = index.key_of(old).to_vec();
            let new_key = index.key_of(new).to_vec();
            if old_key != new_key {
                index.remove(&old_key, rid);
                index.insert(&new_key, rid);
            }
        }
        Ok(())
    }

    /// Creates an index over `field_name` and fills it from existing rows.
    pub fn create_index(&self, name: &str, field_name: &str, unique: bool) -> Result<()> {
        let field = self
            .meta
            .field(field_name)
            .ok_or_else(|| DbError::FieldNotExist {
                table: self.name().to_string(),
                field: field_name.to_string(),
            })?
            .clone();

        let rows = self.rows.read();
        let mut indexes = self.indexes.write();
        if indexes.iter().any(|index| index.name() == name) {
            return Err(DbError::IndexExists {
                name: name.to_string(),
            });
        }

        let mut index = Index::new(IndexMeta {
            name: name.to_string(),
            field,
            unique,
        });
        for record in rows.records.values() {
            let key = index.key_of(record).to_vec();
            if index.conflicts(&key, record.rid()) {
                return Err(DbError::DuplicateKey {
                    index: name.to_string(),
                });
            }
            index.insert(&key, record.rid());
        }
        debug!(table = %self.name(), index = name, keys = index.key_count(), "created index");
        indexes.push(index);
        Ok(())
    }

    /// Rows whose indexed field equals `value`, in rid order.
    pub fn index_lookup(&self, index_name: &str, value: &Value) -> Result<Vec<Rid>> {
        let indexes = self.indexes.read();
        let index = indexes
            .iter()
            .find(|index| index.name() == index_name)
            .ok_or_else(|| DbError::IndexNotExist {
                name: index_name.to_string(),
            })?;
        let field = &index.meta().field;
        let mut key = vec![0u8; field.size()];
        self.encode_cell(field, value, &mut key)?;
        Ok(index.lookup(&key))
    }

    /// Descriptors of the table's indexes, in creation order.
    pub fn indexes(&self) -> Vec<IndexMeta> {
        self.indexes
            .read()
            .iter()
            .map(|index| index.meta().clone())
            .collect()
    }
}
