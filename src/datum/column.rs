//! Columnar buffers.

use std::cmp::Ordering;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::value::Value;

/// One attribute over many rows, stored as contiguous fixed-width slots.
///
/// Slot `i` occupies bytes `i * attr_len .. (i + 1) * attr_len` and uses the
/// same cell encoding as a row (see [`Value::write_cell`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    attr_type: AttrType,
    attr_len: usize,
    data: Vec<u8>,
    count: usize,
}

impl Column {
    /// Creates an empty column of `attr_len`-byte slots.
    ///
    /// Fixed-width types always use their own width; `attr_len` only sizes
    /// Chars slots.
    pub fn new(attr_type: AttrType, attr_len: usize) -> Self {
        Self {
            attr_type,
            attr_len: attr_type.fixed_size().unwrap_or(attr_len),
            data: Vec::new(),
            count: 0,
        }
    }

    /// Builds a column holding `values` in order.
    pub fn from_values(attr_type: AttrType, attr_len: usize, values: &[Value]) -> Result<Self> {
        let mut column = Self::new(attr_type, attr_len);
        for value in values {
            column.append_value(value)?;
        }
        Ok(column)
    }

    /// Appends one slot.
    ///
    /// The value must already be of the column's type.
    pub fn append_value(&mut self, value: &Value) -> Result<()> {
        if value.attr_type() != self.attr_type {
            return Err(DbError::FieldTypeMismatch {
                expected: self.attr_type,
                input: value.to_string(),
            });
        }
        let start = self.data.len();
        self.data.resize(start + self.attr_len, 0);
        if let Err(err) = value.write_cell(&mut self.data[start..]) {
            self.data.truncate(start);
            return Err(err);
        }
        self.count += 1;
        Ok(())
    }

    pub fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    pub fn attr_len(&self) -> usize {
        self.attr_len
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes of slot `idx`, or `None` past the end.
    pub fn slot(&self, idx: usize) -> Option<&[u8]> {
        if idx >= self.count {
            return None;
        }
        let start = idx * self.attr_len;
        self.data.get(start..start + self.attr_len)
    }

    /// Decodes slot `idx`.
    pub fn value_at(&self, idx: usize) -> Result<Value> {
        let slot = self
            .slot(idx)
            .ok_or_else(|| DbError::InvalidArgument(format!(
                "row {} out of range for column of {} rows",
                idx, self.count
            )))?;
        Value::from_cell(self.attr_type, slot)
    }

    /// Compares row `idx` of this column with row `other_idx` of `other`.
    ///
    /// Returns `None` when the columns hold different types or either index
    /// is out of range.
    pub fn compare(&self, other: &Column, idx: usize, other_idx: usize) -> Option<Ordering> {
        if self.attr_type != other.attr_type {
            return None;
        }
        self.attr_type
            .data_type()
            .compare_column(self, other, idx, other_idx)
    }
}
