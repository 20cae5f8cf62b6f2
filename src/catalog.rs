//! Table metadata and the table registry.
//!
//! Schema types ([`TableMeta`], [`FieldMeta`], [`AttrInfo`], [`IndexMeta`])
//! describe how rows are laid out, and [`Catalog`] maps table names and
//! [`TableId`]s to live [`Table`]s.
//!
//! The catalog is accessed through [`Db`](crate::db::Db), which guards it
//! with a lock and hands out shared table handles.

mod schema;

pub use schema::{AttrInfo, FieldMeta, IndexMeta, TableId, TableMeta};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::heap::Table;

/// Registry of tables, indexed by name and by id.
#[derive(Default)]
pub struct Catalog {
    /// Name → table_id index for O(1) name lookups.
    table_ids: HashMap<String, TableId>,
    /// table_id → table, ordered so listings are stable.
    tables: BTreeMap<TableId, Arc<Table>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the id the next registered table will get.
    pub(crate) fn next_table_id(&self) -> TableId {
        self.tables
            .keys()
            .next_back()
            .map(TableId::next)
            .unwrap_or(TableId::FIRST_USER_TABLE)
    }

    /// Registers `table`. Returns false when the name is already taken.
    pub(crate) fn register(&mut self, table: Arc<Table>) -> bool {
        let name = table.name().to_string();
        if self.table_ids.contains_key(&name) {
            return false;
        }
        self.table_ids.insert(name, table.table_id());
        self.tables.insert(table.table_id(), table);
        true
    }

    /// Resolves a table by name.
    pub fn resolve_table(&self, name: &str) -> Option<&Arc<Table>> {
        let table_id = self.table_ids.get(name)?;
        self.tables.get(table_id)
    }

    /// Resolves a table by id.
    pub fn resolve_table_by_id(&self, table_id: TableId) -> Option<&Arc<Table>> {
        self.tables.get(&table_id)
    }

    /// Table names in id order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.values().map(|t| t.name().to_string()).collect()
    }
}
