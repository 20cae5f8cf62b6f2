//! WHERE clause binding and evaluation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::catalog::FieldMeta;
use crate::datum::Value;
use crate::error::{DbError, Result};
use crate::heap::Table;
use crate::sql::{CompOp, ConditionOperand, ConditionSqlNode, RelAttrSqlNode};
use crate::tuple::RowTuple;

/// A bound operand.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterObj {
    /// A field of a table in scope.
    Field { table: String, field: FieldMeta },
    /// A literal.
    Value(Value),
}

impl FilterObj {
    fn bind(
        operand: &ConditionOperand,
        default_table: &Table,
        tables: &HashMap<String, Arc<Table>>,
    ) -> Result<Self> {
        match operand {
            ConditionOperand::Value(value) => Ok(FilterObj::Value(value.clone())),
            ConditionOperand::Attr(attr) => Self::bind_attr(attr, default_table, tables),
        }
    }

    fn bind_attr(
        attr: &RelAttrSqlNode,
        default_table: &Table,
        tables: &HashMap<String, Arc<Table>>,
    ) -> Result<Self> {
        let table = if attr.relation_name.is_empty() {
            default_table
        } else {
            tables
                .get(&attr.relation_name)
                .map(|t| t.as_ref())
                .ok_or_else(|| DbError::TableNotExist {
                    name: attr.relation_name.clone(),
                })?
        };
        let field = table
            .meta()
            .field(&attr.attribute_name)
            .ok_or_else(|| DbError::FieldNotExist {
                table: table.name().to_string(),
                field: attr.attribute_name.clone(),
            })?;
        Ok(FilterObj::Field {
            table: table.name().to_string(),
            field: field.clone(),
        })
    }

    fn value(&self, tuple: &RowTuple) -> Result<Value> {
        match self {
            FilterObj::Field { field, .. } => tuple.cell_at(field.field_id()),
            FilterObj::Value(value) => Ok(value.clone()),
        }
    }
}

impl fmt::Display for FilterObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterObj::Field { field, .. } => f.write_str(field.name()),
            FilterObj::Value(Value::Chars(s)) => write!(f, "'{}'", s),
            FilterObj::Value(value) => write!(f, "{}", value),
        }
    }
}

/// One bound `left <op> right` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterUnit {
    pub left: FilterObj,
    pub comp: CompOp,
    pub right: FilterObj,
}

impl FilterUnit {
    /// Returns whether `tuple` satisfies the comparison.
    ///
    /// Operands without a defined ordering (e.g. a date against a malformed
    /// date literal) do not match.
    pub fn evaluate(&self, tuple: &RowTuple) -> Result<bool> {
        let left = self.left.value(tuple)?;
        let right = self.right.value(tuple)?;
        Ok(left
            .compare(&right)
            .is_some_and(|ordering| self.comp.matches(ordering)))
    }
}

impl fmt::Display for FilterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.comp, self.right)
    }
}

/// A bound WHERE clause: the conjunction of its units.
///
/// An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStmt {
    units: Vec<FilterUnit>,
}

impl FilterStmt {
    /// Binds `conditions` against the tables in scope.
    ///
    /// Unqualified attributes resolve against `default_table`; qualified ones
    /// through `tables`.
    pub fn create(
        default_table: &Table,
        tables: &HashMap<String, Arc<Table>>,
        conditions: &[ConditionSqlNode],
    ) -> Result<Self> {
        let mut units = Vec::with_capacity(conditions.len());
        for cond in conditions {
            let unit = Self::bind_unit(cond, default_table, tables).inspect_err(|err| {
                warn!(table = %default_table.name(), error = %err, "failed to bind condition")
            })?;
            units.push(unit);
        }
        Ok(Self { units })
    }

    fn bind_unit(
        cond: &ConditionSqlNode,
        default_table: &Table,
        tables: &HashMap<String, Arc<Table>>,
    ) -> Result<FilterUnit> {
        Ok(FilterUnit {
            left: FilterObj::bind(&cond.left, default_table, tables)?,
            comp: cond.comp,
            right: FilterObj::bind(&cond.right, default_table, tables)?,
        })
    }

    pub fn units(&self) -> &[FilterUnit] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns whether `tuple` satisfies every unit.
    pub fn evaluate(&self, tuple: &RowTuple) -> Result<bool> {
        for unit in &self.units {
            if !unit.evaluate(tuple)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for FilterStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", unit)?;
        }
        Ok(())
    }
}
