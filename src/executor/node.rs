//! Physical operators implementing the Volcano iterator model.
//!
//! Each operator is driven through `open` → `next`* → `close`. A parent
//! pulls rows from its child one at a time; `next` returning `Ok(None)`
//! marks the end of the stream.

use std::sync::Arc;

use tracing::instrument;

use crate::db::Db;
use crate::error::{DbError, Result};
use crate::heap::{Record, Table};
use crate::stmt::FilterStmt;
use crate::tuple::RowTuple;
use crate::tx::Trx;

use super::plan::QueryPlan;

/// A row-producing physical operator.
///
/// Uses enum dispatch instead of `dyn Trait`, since the set of operators is
/// small and fixed.
pub enum PhysicalOperator {
    /// Full table scan.
    TableScan(TableScan),
    /// Row filter (WHERE clause).
    Predicate(Predicate),
}

impl PhysicalOperator {
    /// Converts a logical [`QueryPlan`] into a physical operator tree.
    ///
    /// Table ids are resolved here; no rows are read until `open`.
    pub fn build(plan: QueryPlan, db: &Db) -> Result<Self> {
        match plan {
            QueryPlan::TableScan {
                table_name,
                table_id,
            } => {
                let table = db
                    .table_by_id(table_id)
                    .ok_or(DbError::TableNotExist { name: table_name })?;
                Ok(PhysicalOperator::TableScan(TableScan::new(table)))
            }
            QueryPlan::Predicate { input, filter } => {
                let child = Self::build(*input, db)?;
                Ok(PhysicalOperator::Predicate(Predicate::new(child, filter)))
            }
        }
    }

    /// Operator name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            PhysicalOperator::TableScan(_) => "TableScan",
            PhysicalOperator::Predicate(_) => "Predicate",
        }
    }

    pub fn open(&mut self, trx: &Trx) -> Result<()> {
        match self {
            PhysicalOperator::TableScan(op) => op.open(trx),
            PhysicalOperator::Predicate(op) => op.open(trx),
        }
    }

    /// Returns the next row, or `None` when exhausted.
    ///
    /// Follows the Volcano naming convention rather than
    /// `std::iter::Iterator`, because it returns `Result<Option<_>>`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<RowTuple>> {
        match self {
            PhysicalOperator::TableScan(op) => op.next(),
            PhysicalOperator::Predicate(op) => op.next(),
        }
    }

    pub fn close(&mut self) -> Result<()> {
        match self {
            PhysicalOperator::TableScan(op) => op.close(),
            PhysicalOperator::Predicate(op) => op.close(),
        }
    }
}

fn not_open(operator: &str) -> DbError {
    DbError::InvalidArgument(format!("{} operator is not open", operator))
}

/// Full scan over a snapshot of a table's rows.
///
/// The snapshot is taken in `open`, so rows changed while the scan is being
/// drained are not produced again.
pub struct TableScan {
    table: Arc<Table>,
    /// Rows still to be produced; `None` while closed.
    buffer: Option<std::vec::IntoIter<Record>>,
}

impl TableScan {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            buffer: None,
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    #[instrument(level = "trace", skip_all, name = "executor::table_scan::open", fields(table = %self.table.name(), trx = %trx.id()))]
    fn open(&mut self, trx: &Trx) -> Result<()> {
        self.buffer = Some(self.table.scan_records().into_iter());
        Ok(())
    }

    fn next(&mut self) -> Result<Option<RowTuple>> {
        let buffer = self.buffer.as_mut().ok_or_else(|| not_open("TableScan"))?;
        Ok(buffer
            .next()
            .map(|record| RowTuple::new(record, Arc::clone(self.table.meta()))))
    }

    fn close(&mut self) -> Result<()> {
        self.buffer = None;
        Ok(())
    }
}

/// Filter that passes on the child's rows satisfying a [`FilterStmt`].
pub struct Predicate {
    child: Box<PhysicalOperator>,
    filter: FilterStmt,
}

impl Predicate {
    pub fn new(child: PhysicalOperator, filter: FilterStmt) -> Self {
        Self {
            child: Box::new(child),
            filter,
        }
    }

    fn open(&mut self, trx: &Trx) -> Result<()> {
        self.child.open(trx)
    }

    fn next(&mut self) -> Result<Option<RowTuple>> {
        while let Some(tuple) = self.child.next()? {
            if self.filter.evaluate(&tuple)? {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> Result<()> {
        self.child.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TableId;
    use crate::datum::Value;
    use crate::db::tests::open_test_db;
    use crate::sql::{CompOp, ConditionSqlNode};
    use std::collections::HashMap;

    fn scan_plan(db: &Db) -> QueryPlan {
        let table = db.find_table("t").unwrap();
        QueryPlan::TableScan {
            table_name: "t".to_string(),
            table_id: table.table_id(),
        }
    }

    fn drain(op: &mut PhysicalOperator) -> Vec<Value> {
        let mut ids = Vec::new();
        while let Some(tuple) = op.next().unwrap() {
            ids.push(tuple.find_cell("id").unwrap());
        }
        ids
    }

    #[test]
    fn test_table_scan() {
        let db = open_test_db();
        let trx = db.begin();
        let mut op = PhysicalOperator::build(scan_plan(&db), &db).unwrap();
        assert_eq!(op.name(), "TableScan");
        assert!(op.next().is_err());

        op.open(&trx).unwrap();
        assert_eq!(drain(&mut op), vec![Value::Int(1), Value::Int(2)]);
        assert!(op.next().unwrap().is_none());
        op.close().unwrap();
    }

    #[test]
    fn test_scan_snapshot_ignores_later_inserts() {
        let db = open_test_db();
        let trx = db.begin();
        let mut op = PhysicalOperator::build(scan_plan(&db), &db).unwrap();
        op.open(&trx).unwrap();
        db.find_table("t")
            .unwrap()
            .insert_record(&[Value::Int(3), Value::Date(20240303)])
            .unwrap();
        assert_eq!(drain(&mut op).len(), 2);
    }

    #[test]
    fn test_predicate() {
        let db = open_test_db();
        let trx = db.begin();
        let table = db.find_table("t").unwrap();
        let tables = HashMap::from([("t".to_string(), Arc::clone(&table))]);
        let filter = FilterStmt::create(
            &table,
            &tables,
            &[ConditionSqlNode::attr_value("d", CompOp::GreaterThan, "2024-01-15")],
        )
        .unwrap();
        let plan = QueryPlan::Predicate {
            input: Box::new(scan_plan(&db)),
            filter,
        };
        let mut op = PhysicalOperator::build(plan, &db).unwrap();
        op.open(&trx).unwrap();
        assert_eq!(drain(&mut op), vec![Value::Int(2)]);
        op.close().unwrap();
    }

    #[test]
    fn test_build_unknown_table() {
        let db = open_test_db();
        let plan = QueryPlan::TableScan {
            table_name: "gone".to_string(),
            table_id: TableId::new(4242),
        };
        assert!(matches!(
            PhysicalOperator::build(plan, &db),
            Err(DbError::TableNotExist { .. })
        ));
    }
}
