//! The database handle.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::config::DbConfig;
use crate::catalog::{AttrInfo, Catalog, TableId, TableMeta};
use crate::error::{DbError, Result};
use crate::heap::Table;
use crate::tx::{TransactionManager, Trx};

/// A database: a catalog of tables plus a transaction manager.
///
/// Tables are shared as `Arc<Table>`, so a handle obtained from
/// [`find_table`](Self::find_table) stays usable while the catalog changes.
pub struct Db {
    config: DbConfig,
    catalog: RwLock<Catalog>,
    tx_manager: TransactionManager,
}

impl Db {
    /// Creates an empty database named `name` with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(DbConfig {
            name: name.into(),
            ..DbConfig::default()
        })
    }

    pub fn with_config(config: DbConfig) -> Self {
        Self {
            config,
            catalog: RwLock::new(Catalog::new()),
            tx_manager: TransactionManager::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn tx_manager(&self) -> &TransactionManager {
        &self.tx_manager
    }

    /// Begins a transaction.
    pub fn begin(&self) -> Trx {
        self.tx_manager.begin()
    }

    /// Creates an empty table.
    pub fn create_table(&self, name: &str, attrs: &[AttrInfo]) -> Result<Arc<Table>> {
        let mut catalog = self.catalog.write();
        if catalog.resolve_table(name).is_some() {
            return Err(DbError::TableExists {
                name: name.to_string(),
            });
        }
        let meta = TableMeta::new(catalog.next_table_id(), name, attrs)?;
        let table = Arc::new(Table::new(meta, self.config.slots_per_page));
        catalog.register(Arc::clone(&table));
        debug!(db = %self.name(), table = name, table_id = %table.table_id(), "created table");
        Ok(table)
    }

    /// Looks a table up by name.
    pub fn find_table(&self, name: &str) -> Option<Arc<Table>> {
        self.catalog.read().resolve_table(name).cloned()
    }

    /// Looks a table up by id.
    pub fn table_by_id(&self, table_id: TableId) -> Option<Arc<Table>> {
        self.catalog.read().resolve_table_by_id(table_id).cloned()
    }

    /// Names of all tables, in creation order.
    pub fn table_names(&self) -> Vec<String> {
        self.catalog.read().table_names()
    }
}
