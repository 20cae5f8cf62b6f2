//! UPDATE binding.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::catalog::{FieldMeta, TableId};
use crate::datum::Value;
use crate::db::Db;
use crate::error::{DbError, Result};
use crate::sql::UpdateSqlNode;

use super::filter::FilterStmt;

/// A bound `UPDATE table SET field = value WHERE ...`.
///
/// Owns the bound filter. The value is kept exactly as written; conversion
/// to the field's type happens when the statement executes.
#[derive(Debug, Clone)]
pub struct UpdateStmt {
    pub(crate) table_id: TableId,
    pub(crate) table_name: String,
    pub(crate) field: FieldMeta,
    pub(crate) value: Value,
    pub(crate) filter: FilterStmt,
}

impl UpdateStmt {
    /// Binds `node` against `db`.
    ///
    /// Checks, in order: the table name is present, the table exists, the
    /// field exists, and the conditions bind with the table in scope.
    pub fn create(db: &Db, node: &UpdateSqlNode) -> Result<Self> {
        let table_name = node.relation_name.as_str();
        if table_name.is_empty() {
            warn!("invalid argument. relation name is empty");
            return Err(DbError::InvalidArgument(
                "update target table name is empty".to_string(),
            ));
        }

        let Some(table) = db.find_table(table_name) else {
            warn!(db = %db.name(), table = table_name, "no such table");
            return Err(DbError::TableNotExist {
                name: table_name.to_string(),
            });
        };

        let Some(field) = table.meta().field(&node.attribute_name) else {
            warn!(
                table = table_name,
                field = %node.attribute_name,
                "no such field"
            );
            return Err(DbError::FieldNotExist {
                table: table_name.to_string(),
                field: node.attribute_name.clone(),
            });
        };

        let tables = HashMap::from([(table_name.to_string(), Arc::clone(&table))]);
        let filter = FilterStmt::create(&table, &tables, &node.conditions)?;

        Ok(Self {
            table_id: table.table_id(),
            table_name: table_name.to_string(),
            field: field.clone(),
            value: node.value.clone(),
            filter,
        })
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The field being assigned.
    pub fn field(&self) -> &FieldMeta {
        &self.field
    }

    /// The assigned value, as written in the statement.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn filter(&self) -> &FilterStmt {
        &self.filter
    }
}
