//! Logical plan representation.
//!
//! Plans describe *what* to execute without touching any rows:
//!
//! - [`QueryPlan`]: row-producing plans (scan, predicate), turned into
//!   [`PhysicalOperator`](super::PhysicalOperator) trees by
//!   [`PhysicalOperator::build`](super::PhysicalOperator::build)
//! - [`UpdateLogicalOperator`]: the row-mutating root of an UPDATE plan

use crate::catalog::{FieldMeta, TableId};
use crate::datum::Value;
use crate::stmt::FilterStmt;

/// A row-producing logical plan node.
#[derive(Debug, Clone)]
pub enum QueryPlan {
    /// Full scan of one table.
    TableScan {
        /// Table name (for EXPLAIN output).
        table_name: String,
        /// Catalog table ID.
        table_id: TableId,
    },
    /// Row filter (WHERE clause).
    Predicate {
        /// Child plan to pull rows from.
        input: Box<QueryPlan>,
        /// Bound conditions.
        filter: FilterStmt,
    },
}

impl QueryPlan {
    /// Formats this plan as a human-readable EXPLAIN string.
    ///
    /// # Example output
    ///
    /// ```text
    /// Predicate: id = 1
    ///   TableScan on t
    /// ```
    pub fn explain(&self) -> String {
        self.format_explain(0)
    }

    fn format_explain(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            QueryPlan::TableScan { table_name, .. } => {
                format!("{}TableScan on {}", prefix, table_name)
            }
            QueryPlan::Predicate { input, filter } => {
                let child_str = input.format_explain(indent + 1);
                format!("{}Predicate: {}\n{}", prefix, filter, child_str)
            }
        }
    }
}

/// Logical UPDATE: assign `value` to `field` in every row `input` yields.
///
/// The value is carried as written; it is converted to the field's type
/// when the physical operator opens.
#[derive(Debug, Clone)]
pub struct UpdateLogicalOperator {
    /// Table name (for EXPLAIN output and log fields).
    pub table_name: String,
    /// Catalog table ID, resolved when the physical operator is built.
    pub table_id: TableId,
    /// Target field.
    pub field: FieldMeta,
    /// Assigned value.
    pub value: Value,
    /// Plan producing the rows to update.
    pub input: Box<QueryPlan>,
}

impl UpdateLogicalOperator {
    /// The single child plan.
    pub fn child(&self) -> &QueryPlan {
        &self.input
    }

    /// Formats the plan as a human-readable EXPLAIN string.
    ///
    /// # Example output
    ///
    /// ```text
    /// Update t SET d = '2025-03-04'
    ///   Predicate: id = 1
    ///     TableScan on t
    /// ```
    pub fn explain(&self) -> String {
        let value = match &self.value {
            Value::Chars(s) => format!("'{}'", s),
            other => other.to_string(),
        };
        format!(
            "Update {} SET {} = {}\n{}",
            self.table_name,
            self.field.name(),
            value,
            self.input.format_explain(1)
        )
    }
}
