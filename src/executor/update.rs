//! The UPDATE operator.
//!
//! All the work happens in [`UpdatePhysicalOperator::open`]: it drains its
//! child and, for every row the child yields, rewrites the target cell in
//! place and moves the row's index entries. The operator produces no rows
//! of its own, so `next` reports end-of-stream immediately.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::catalog::FieldMeta;
use crate::datum::Value;
use crate::error::{DbError, Result};
use crate::heap::{Rid, Table};
use crate::tuple::RowTuple;
use crate::tx::Trx;

use super::node::PhysicalOperator;

/// Physical UPDATE: assigns one value to one field of every child row.
pub struct UpdatePhysicalOperator {
    table: Arc<Table>,
    field: FieldMeta,
    /// Assigned value; replaced by its cast to the field type on open.
    value: Value,
    child: Box<PhysicalOperator>,
    updated_rows: usize,
    index_failures: Vec<Rid>,
}

impl UpdatePhysicalOperator {
    pub fn new(table: Arc<Table>, field: FieldMeta, value: Value, child: PhysicalOperator) -> Self {
        Self {
            table,
            field,
            value,
            child: Box::new(child),
            updated_rows: 0,
            index_failures: Vec::new(),
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// The value being assigned. After a successful `open` it has the
    /// field's type.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Rows whose target cell was rewritten by the last `open`.
    pub fn updated_rows(&self) -> usize {
        self.updated_rows
    }

    /// Rows updated by the last `open` whose index entries could not be
    /// moved. Such rows keep their new bytes and their old index entries.
    pub fn index_failures(&self) -> &[Rid] {
        &self.index_failures
    }

    /// Opens the child, converts the value to the field's type and updates
    /// every row the child yields. The child is closed before returning.
    ///
    /// A value that cannot be cast to the field's type or does not fit the
    /// field's width fails with [`DbError::InvalidArgument`] before any row
    /// is touched.
    ///
    /// A failure to move one row's index entries is logged and recorded in
    /// [`index_failures`](Self::index_failures) but does not stop the
    /// statement.
    #[instrument(
        level = "trace",
        skip_all,
        name = "executor::update::open",
        fields(table = %self.table.name(), field = %self.field.name(), trx = %trx.id())
    )]
    pub fn open(&mut self, trx: &Trx) -> Result<()> {
        self.updated_rows = 0;
        self.index_failures.clear();

        if let Err(err) = self.child.open(trx) {
            warn!(child = self.child.name(), error = %err, "failed to open child operator");
            return Err(err);
        }

        if let Err(err) = self.prepare_value() {
            warn!(
                from = %self.value.attr_type(),
                to = %self.field.attr_type(),
                value = %self.value,
                error = %err,
                "cannot assign value to field"
            );
            if let Err(close_err) = self.child.close() {
                warn!(error = %close_err, "failed to close child operator");
            }
            return Err(DbError::InvalidArgument(format!(
                "cannot assign {} value {} to {} field \"{}\": {}",
                self.value.attr_type(),
                self.value,
                self.field.attr_type(),
                self.field.name(),
                err
            )));
        }

        let result = self.drive();
        let close_result = self.child.close();
        result?;
        close_result?;

        debug!(
            updated_rows = self.updated_rows,
            index_failures = self.index_failures.len(),
            "update finished"
        );
        Ok(())
    }

    /// Casts the value to the field's type and checks that it fits the cell.
    fn prepare_value(&mut self) -> Result<()> {
        let field_type = self.field.attr_type();
        if self.value.attr_type() != field_type {
            self.value = self.value.cast_to(field_type)?;
        }
        if self.value.length() > self.field.size() {
            return Err(DbError::ValueTooLong {
                field: self.field.name().to_string(),
                len: self.value.length(),
                max: self.field.size(),
            });
        }
        Ok(())
    }

    /// Pulls every row from the child; end of stream is success.
    fn drive(&mut self) -> Result<()> {
        while let Some(tuple) = self.child.next()? {
            self.update_row(&tuple);
        }
        Ok(())
    }

    fn update_row(&mut self, tuple: &RowTuple) {
        let rid = tuple.rid();
        let field_id = self.field.field_id();
        let value = &self.value;
        let table = &self.table;
        let mut cell_error = None;
        let mut index_error = None;

        let result = table.visit_record(rid, |record| {
            let old_record = record.clone();
            match tuple.set_cell_at(field_id, value, record.data_mut()) {
                Ok(()) => {
                    if let Err(err) = table.update_index(&old_record, record) {
                        index_error = Some(err);
                    }
                }
                Err(err) => cell_error = Some(err),
            }
            true
        });

        if let Err(err) = result {
            warn!(%rid, error = %err, "failed to update record");
            return;
        }
        if let Some(err) = cell_error {
            warn!(%rid, error = %err, "failed to set cell");
            return;
        }
        self.updated_rows += 1;
        if let Some(err) = index_error {
            warn!(%rid, error = %err, "failed to update index");
            self.index_failures.push(rid);
        }
    }

    /// Always end-of-stream.
    pub fn next(&mut self) -> Result<Option<RowTuple>> {
        Ok(None)
    }

    /// Nothing to release; the child was closed by `open`.
    pub fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::open_test_db;
    use crate::db::Db;
    use crate::executor::plan::QueryPlan;

    fn update(db: &Db, field: &str, value: Value) -> UpdatePhysicalOperator {
        let table = db.find_table("t").unwrap();
        let field = table.meta().field(field).unwrap().clone();
        let scan = PhysicalOperator::build(
            QueryPlan::TableScan {
                table_name: "t".to_string(),
                table_id: table.table_id(),
            },
            db,
        )
        .unwrap();
        UpdatePhysicalOperator::new(table, field, value, scan)
    }

    fn dates(db: &Db) -> Vec<Value> {
        let table = db.find_table("t").unwrap();
        table
            .scan_records()
            .into_iter()
            .map(|r| RowTuple::new(r, Arc::clone(table.meta())).find_cell("d").unwrap())
            .collect()
    }

    #[test]
    fn test_open_updates_every_child_row() {
        let db = open_test_db();
        let trx = db.begin();
        let mut op = update(&db, "d", Value::from("2025-03-04"));
        op.open(&trx).unwrap();
        assert_eq!(op.value(), &Value::Date(20250304));
        assert_eq!(op.updated_rows(), 2);
        assert!(op.index_failures().is_empty());
        assert!(op.next().unwrap().is_none());
        op.close().unwrap();
        assert_eq!(dates(&db), vec![Value::Date(20250304); 2]);
    }

    #[test]
    fn test_open_rejects_uncastable_value() {
        let db = open_test_db();
        let trx = db.begin();
        let mut op = update(&db, "d", Value::from("2025-02-30"));
        let err = op.open(&trx).unwrap_err();
        assert!(matches!(err, DbError::InvalidArgument(_)));
        assert_eq!(
            dates(&db),
            vec![Value::Date(20240101), Value::Date(20240202)]
        );

        let mut op = update(&db, "d", Value::Int(20250101));
        assert!(matches!(
            op.open(&trx),
            Err(DbError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_index_failure_keeps_going() {
        let db = open_test_db();
        let trx = db.begin();
        let table = db.find_table("t").unwrap();
        table.create_index("t_d", "d", true).unwrap();

        // Both rows get the same date: the first succeeds, the second
        // collides in the unique index.
        let mut op = update(&db, "d", Value::Date(20250101));
        op.open(&trx).unwrap();
        assert_eq!(op.updated_rows(), 2);
        let second = table.scan_records()[1].rid();
        assert_eq!(op.index_failures(), &[second]);
        assert_eq!(dates(&db), vec![Value::Date(20250101); 2]);
        assert_eq!(
            table
                .index_lookup("t_d", &Value::Date(20240202))
                .unwrap(),
            vec![second]
        );
    }

    #[test]
    fn test_open_rejects_value_longer_than_field() {
        let db = Db::new("test");
        let table = db
            .create_table("t", &[crate::catalog::AttrInfo::chars("name", 2)])
            .unwrap();
        table.insert_record(&[Value::from("ab")]).unwrap();
        table.insert_record(&[Value::from("cd")]).unwrap();
        let trx = db.begin();
        let field = table.meta().field("name").unwrap().clone();
        let scan = PhysicalOperator::build(
            QueryPlan::TableScan {
                table_name: "t".to_string(),
                table_id: table.table_id(),
            },
            &db,
        )
        .unwrap();
        let mut op = UpdatePhysicalOperator::new(Arc::clone(&table), field, Value::from("xyz"), scan);
        let err = op.open(&trx).unwrap_err();
        assert!(matches!(err, DbError::InvalidArgument(_)), "{err}");
        assert_eq!(op.updated_rows(), 0);
        let data: Vec<_> = table.scan_records().iter().map(|r| r.data().to_vec()).collect();
        assert_eq!(data, vec![b"ab".to_vec(), b"cd".to_vec()]);
    }

    #[test]
    fn test_open_accepts_value_filling_field() {
        let db = Db::new("test");
        let table = db
            .create_table("t", &[crate::catalog::AttrInfo::chars("name", 2)])
            .unwrap();
        table.insert_record(&[Value::from("ab")]).unwrap();
        let trx = db.begin();
        let field = table.meta().field("name").unwrap().clone();
        let scan = PhysicalOperator::build(
            QueryPlan::TableScan {
                table_name: "t".to_string(),
                table_id: table.table_id(),
            },
            &db,
        )
        .unwrap();
        let mut op = UpdatePhysicalOperator::new(Arc::clone(&table), field, Value::from("yz"), scan);
        op.open(&trx).unwrap();
        assert_eq!(op.updated_rows(), 1);
        assert_eq!(table.scan_records()[0].data(), b"yz");
    }
}
