//! Planner for UPDATE statements.
//!
//! Turns a bound [`UpdateStmt`] into an [`UpdateLogicalOperator`] and then
//! into an executable [`UpdatePhysicalOperator`] by resolving table ids
//! through the database.

use tracing::warn;

use crate::db::Db;
use crate::error::{DbError, Result};
use crate::stmt::UpdateStmt;

use super::node::PhysicalOperator;
use super::plan::{QueryPlan, UpdateLogicalOperator};
use super::update::UpdatePhysicalOperator;

/// Plans a bound UPDATE.
///
/// The plan scans the target table and, when the statement has conditions,
/// filters the scan with them. The statement's filter moves into the plan.
pub fn plan_update(stmt: UpdateStmt) -> UpdateLogicalOperator {
    let UpdateStmt {
        table_id,
        table_name,
        field,
        value,
        filter,
    } = stmt;

    let scan = QueryPlan::TableScan {
        table_name: table_name.clone(),
        table_id,
    };
    let input = if filter.is_empty() {
        scan
    } else {
        QueryPlan::Predicate {
            input: Box::new(scan),
            filter,
        }
    };

    UpdateLogicalOperator {
        table_name,
        table_id,
        field,
        value,
        input: Box::new(input),
    }
}

/// Builds the physical operator tree for a logical UPDATE.
///
/// # Errors
///
/// Returns [`DbError::TableNotExist`] if the table was dropped from the
/// catalog since the statement was bound.
pub fn build_update(plan: UpdateLogicalOperator, db: &Db) -> Result<UpdatePhysicalOperator> {
    let UpdateLogicalOperator {
        table_name,
        table_id,
        field,
        value,
        input,
    } = plan;

    let Some(table) = db.table_by_id(table_id) else {
        warn!(table = %table_name, %table_id, "table disappeared before execution");
        return Err(DbError::TableNotExist { name: table_name });
    };
    let child = PhysicalOperator::build(*input, db)?;
    Ok(UpdatePhysicalOperator::new(table, field, value, child))
}
