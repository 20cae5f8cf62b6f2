//! Typed scalar values.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::data_type::INFINITE_CAST_COST;
use super::date::{is_valid_date, pack_date};

/// A typed database value.
///
/// The variant is the type tag, so the active representation always
/// matches it. Values are cheap to clone; casting produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Character string (Chars).
    Chars(String),
    /// 32-bit signed integer (Ints).
    Int(i32),
    /// 32-bit floating point (Floats).
    Float(f32),
    /// Calendar date packed as `year * 10000 + month * 100 + day` (Dates).
    Date(i32),
}

impl Value {
    /// Creates a date value, validating the calendar fields.
    pub fn date(year: i32, month: i32, day: i32) -> Result<Self> {
        if !is_valid_date(year, month, day) {
            return Err(DbError::InvalidArgument(format!(
                "invalid date {}-{}-{}",
                year, month, day
            )));
        }
        Ok(Value::Date(pack_date(year, month, day)))
    }

    /// Returns the type tag of this value.
    pub fn attr_type(&self) -> AttrType {
        match self {
            Value::Chars(_) => AttrType::Chars,
            Value::Int(_) => AttrType::Ints,
            Value::Float(_) => AttrType::Floats,
            Value::Date(_) => AttrType::Dates,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Chars(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the packed `YYYYMMDD` integer of a date value.
    pub fn as_date(&self) -> Option<i32> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number of bytes the value occupies in a cell.
    pub fn length(&self) -> usize {
        match self {
            Value::Chars(s) => s.len(),
            Value::Int(_) | Value::Float(_) | Value::Date(_) => 4,
        }
    }

    /// Converts this value into `target`, producing a new value.
    ///
    /// The identity cast is a clone; anything else is delegated to the
    /// source type's strategy.
    pub fn cast_to(&self, target: AttrType) -> Result<Value> {
        if self.attr_type() == target {
            return Ok(self.clone());
        }
        self.attr_type().data_type().cast_to(self, target)
    }

    /// Compares two values, resolving implicit conversions by cast cost.
    ///
    /// Returns `None` when the values have no defined ordering, including
    /// when the implicit conversion of one operand fails.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let left_type = self.attr_type();
        let right_type = other.attr_type();
        if left_type == right_type {
            return left_type.data_type().compare(self, other);
        }

        let left_to_right = left_type.data_type().cast_cost(right_type);
        let right_to_left = right_type.data_type().cast_cost(left_type);
        if right_to_left == INFINITE_CAST_COST && left_to_right == INFINITE_CAST_COST {
            return None;
        }

        if right_to_left <= left_to_right {
            let right = other.cast_to(left_type).ok()?;
            left_type.data_type().compare(self, &right)
        } else {
            let left = self.cast_to(right_type).ok()?;
            right_type.data_type().compare(&left, other)
        }
    }

    /// Decodes a fixed-width cell of type `attr_type`.
    pub fn from_cell(attr_type: AttrType, cell: &[u8]) -> Result<Value> {
        match attr_type {
            AttrType::Chars => {
                let end = cell.iter().position(|&b| b == 0).unwrap_or(cell.len());
                std::str::from_utf8(&cell[..end])
                    .map(|s| Value::Chars(s.to_string()))
                    .map_err(|_| DbError::FieldTypeMismatch {
                        expected: AttrType::Chars,
                        input: String::from_utf8_lossy(&cell[..end]).into_owned(),
                    })
            }
            AttrType::Ints => Ok(Value::Int(i32::from_le_bytes(word(cell)?))),
            AttrType::Floats => Ok(Value::Float(f32::from_le_bytes(word(cell)?))),
            AttrType::Dates => Ok(Value::Date(i32::from_le_bytes(word(cell)?))),
        }
    }

    /// Encodes the value into a fixed-width cell.
    ///
    /// Chars are zero-padded to the cell width; the cell is not modified
    /// when the value does not fit.
    pub fn write_cell(&self, cell: &mut [u8]) -> Result<()> {
        let len = self.length();
        if len > cell.len() {
            return Err(DbError::RecordSizeMismatch {
                expected: cell.len(),
                actual: len,
            });
        }
        match self {
            Value::Chars(s) => {
                cell[..len].copy_from_slice(s.as_bytes());
                cell[len..].fill(0);
            }
            Value::Int(v) | Value::Date(v) => cell[..4].copy_from_slice(&v.to_le_bytes()),
            Value::Float(v) => cell[..4].copy_from_slice(&v.to_le_bytes()),
        }
        Ok(())
    }
}

/// Leading four bytes of a fixed-width cell.
fn word(cell: &[u8]) -> Result<[u8; 4]> {
    cell.get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or(DbError::RecordSizeMismatch {
            expected: 4,
            actual: cell.len(),
        })
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Chars(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attr_type().data_type().to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_type_matches_variant() {
        assert_eq!(Value::Int(1).attr_type(), AttrType::Ints);
        assert_eq!(Value::Float(1.0).attr_type(), AttrType::Floats);
        assert_eq!(Value::from("a").attr_type(), AttrType::Chars);
        assert_eq!(Value::Date(20250101).attr_type(), AttrType::Dates);
        assert_eq!(Value::Int(7).as_date(), None);
    }

    #[test]
    fn test_date_constructor_validates() {
        assert_eq!(Value::date(2024, 2, 29), Ok(Value::Date(20240229)));
        assert!(matches!(
            Value::date(2023, 2, 29),
            Err(DbError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_compare_same_type() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(
            Value::from("b").compare(&Value::from("a")),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_int_with_float() {
        assert_eq!(
            Value::Int(2).compare(&Value::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(2.0).compare(&Value::Int(2)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_compare_date_with_literal_either_side() {
        let date = Value::Date(20250917);
        assert_eq!(
            date.compare(&Value::from("2025-09-18")),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("2025-09-18").compare(&date),
            Some(Ordering::Greater)
        );
        assert_eq!(date.compare(&Value::from("2025-13-40")), None);
        assert_eq!(Value::from("not a date").compare(&date), None);
    }

    #[test]
    fn test_compare_without_conversion() {
        assert_eq!(Value::Date(20250917).compare(&Value::Int(20250917)), None);
    }

    #[test]
    fn test_cast_to() {
        assert_eq!(
            Value::from("2025-03-04").cast_to(AttrType::Dates),
            Ok(Value::Date(20250304))
        );
        assert_eq!(
            Value::Date(20250304).cast_to(AttrType::Dates),
            Ok(Value::Date(20250304))
        );
        assert!(matches!(
            Value::Date(20250304).cast_to(AttrType::Ints),
            Err(DbError::Unimplemented { .. })
        ));
    }

    #[test]
    fn test_cell_encoding() {
        let mut cell = [0xffu8; 8];
        Value::from("abc").write_cell(&mut cell).unwrap();
        assert_eq!(&cell, b"abc\0\0\0\0\0");
        assert_eq!(
            Value::from_cell(AttrType::Chars, &cell).unwrap(),
            Value::from("abc")
        );

        let mut cell = [0u8; 4];
        Value::Date(20250917).write_cell(&mut cell).unwrap();
        assert_eq!(
            Value::from_cell(AttrType::Dates, &cell).unwrap(),
            Value::Date(20250917)
        );

        let mut small = [0u8; 2];
        assert!(Value::from("abc").write_cell(&mut small).is_err());
        assert_eq!(small, [0, 0]);
    }

    #[test]
    fn test_from_cell_decodes_each_tag() {
        let bytes = 7i32.to_le_bytes();
        assert_eq!(Value::from_cell(AttrType::Ints, &bytes), Ok(Value::Int(7)));
        assert_eq!(
            Value::from_cell(AttrType::Floats, &2.5f32.to_le_bytes()),
            Ok(Value::Float(2.5))
        );
        assert_eq!(
            Value::from_cell(AttrType::Dates, &20250917i32.to_le_bytes()),
            Ok(Value::Date(20250917))
        );
        assert_eq!(
            Value::from_cell(AttrType::Ints, &[1, 2]),
            Err(DbError::RecordSizeMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Date(20250101).to_string(), "2025-01-01");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }
}
