//! The per-type strategy contract.

use std::cmp::Ordering;

use tracing::warn;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::column::Column;
use super::value::Value;

/// Cost reported by [`DataType::cast_cost`] for targets with no implicit
/// conversion.
pub const INFINITE_CAST_COST: i32 = i32::MAX;

/// Operations the execution engine needs to treat values of one type
/// uniformly.
///
/// Implementations are stateless; one instance exists per [`AttrType`] and
/// is shared through [`AttrType::data_type`]. Arithmetic defaults to
/// `Unsupported` and casting to `Unimplemented`, so a type only overrides
/// what it actually supports.
pub trait DataType: Send + Sync {
    /// Tag this strategy serves.
    fn attr_type(&self) -> AttrType;

    /// Compares `left` (of this type) with `right`.
    ///
    /// `right` must be of this type or of a representation this type knows
    /// how to interpret (e.g. a date literal held in Chars). Returns `None`
    /// when the operands have no defined ordering.
    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering>;

    /// Compares slot `left_idx` of `left` with slot `right_idx` of `right`.
    ///
    /// Both columns must hold this type.
    fn compare_column(
        &self,
        left: &Column,
        right: &Column,
        left_idx: usize,
        right_idx: usize,
    ) -> Option<Ordering> {
        debug_assert_eq!(left.attr_type(), self.attr_type());
        debug_assert_eq!(right.attr_type(), self.attr_type());
        let left = left.value_at(left_idx).ok()?;
        let right = right.value_at(right_idx).ok()?;
        self.compare(&left, &right)
    }

    fn add(&self, _left: &Value, _right: &Value) -> Result<Value> {
        Err(unsupported(self.attr_type(), "addition"))
    }

    fn subtract(&self, _left: &Value, _right: &Value) -> Result<Value> {
        Err(unsupported(self.attr_type(), "subtraction"))
    }

    fn multiply(&self, _left: &Value, _right: &Value) -> Result<Value> {
        Err(unsupported(self.attr_type(), "multiplication"))
    }

    fn divide(&self, _left: &Value, _right: &Value) -> Result<Value> {
        Err(unsupported(self.attr_type(), "division"))
    }

    fn negative(&self, _val: &Value) -> Result<Value> {
        Err(unsupported(self.attr_type(), "negation"))
    }

    /// Converts `val` into a new value of type `target`.
    fn cast_to(&self, _val: &Value, target: AttrType) -> Result<Value> {
        Err(unimplemented_cast(self.attr_type(), target))
    }

    /// Ranks the implicit conversion from this type to `target`.
    ///
    /// 0 for the identity, [`INFINITE_CAST_COST`] when no implicit
    /// conversion exists.
    fn cast_cost(&self, target: AttrType) -> i32 {
        if target == self.attr_type() {
            0
        } else {
            INFINITE_CAST_COST
        }
    }

    /// Parses the type's canonical storage text into `val`.
    ///
    /// `val` is left untouched on failure.
    fn set_value_from_str(&self, val: &mut Value, data: &str) -> Result<()>;

    /// Renders the display text of `val`.
    fn to_string(&self, val: &Value) -> Result<String>;
}

/// Builds (and logs) the error for an operation a type does not support.
pub(crate) fn unsupported(attr_type: AttrType, op: &'static str) -> DbError {
    warn!(%attr_type, op, "operation is not supported");
    DbError::Unsupported { attr_type, op }
}

/// Builds (and logs) the error for a cast with no defined conversion.
pub(crate) fn unimplemented_cast(from: AttrType, to: AttrType) -> DbError {
    warn!(%from, %to, "trying to cast to an unsupported type");
    DbError::Unimplemented { from, to }
}

/// Error for a value whose variant does not match the strategy handling it.
pub(crate) fn type_mismatch(expected: AttrType, val: &Value) -> DbError {
    DbError::FieldTypeMismatch {
        expected,
        input: format!("{:?}", val),
    }
}
