//! Statement execution entry points.

use tracing::{debug, instrument};

use crate::db::Db;
use crate::error::Result;
use crate::heap::Rid;
use crate::sql::UpdateSqlNode;
use crate::stmt::UpdateStmt;
use crate::tx::Trx;

use super::planner::{build_update, plan_update};

/// Result of executing an UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Number of rows whose target cell was rewritten.
    pub updated_rows: usize,
    /// Updated rows whose index entries could not be moved.
    pub index_failures: Vec<Rid>,
}

impl UpdateOutcome {
    /// Formats the PostgreSQL-style command completion tag.
    pub fn command_tag(&self) -> String {
        format!("UPDATE {}", self.updated_rows)
    }
}

/// Binds, plans and executes an UPDATE inside `trx`.
///
/// # Errors
///
/// Binding errors (missing table or field, bad conditions) and the failure
/// to convert the assigned value to the field's type. Per-row failures do
/// not fail the statement; see [`UpdateOutcome::index_failures`].
#[instrument(level = "debug", skip_all, name = "executor::execute_update", fields(table = %node.relation_name, trx = %trx.id()))]
pub fn execute_update(db: &Db, trx: &Trx, node: &UpdateSqlNode) -> Result<UpdateOutcome> {
    let stmt = UpdateStmt::create(db, node)?;
    let plan = plan_update(stmt);
    debug!(plan = %plan.explain(), "planned update");

    let mut op = build_update(plan, db)?;
    op.open(trx)?;
    while op.next()?.is_some() {}
    op.close()?;

    Ok(UpdateOutcome {
        updated_rows: op.updated_rows(),
        index_failures: op.index_failures().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::Value;
    use crate::db::tests::open_test_db;
    use crate::error::DbError;
    use crate::sql::{CompOp, ConditionSqlNode};

    #[test]
    fn test_execute_update() {
        let db = open_test_db();
        let trx = db.begin();
        let node = UpdateSqlNode {
            relation_name: "t".to_string(),
            attribute_name: "d".to_string(),
            value: Value::from("2025-03-04"),
            conditions: vec![ConditionSqlNode::attr_value("id", CompOp::EqualTo, 2)],
        };
        let outcome = execute_update(&db, &trx, &node).unwrap();
        assert_eq!(outcome.updated_rows, 1);
        assert_eq!(outcome.command_tag(), "UPDATE 1");
        assert!(outcome.index_failures.is_empty());
    }

    #[test]
    fn test_execute_update_bind_error() {
        let db = open_test_db();
        let trx = db.begin();
        let node = UpdateSqlNode {
            relation_name: "missing".to_string(),
            attribute_name: "d".to_string(),
            value: Value::Int(1),
            conditions: Vec::new(),
        };
        assert!(matches!(
            execute_update(&db, &trx, &node),
            Err(DbError::TableNotExist { .. })
        ));
    }
}
