use std::cmp::Ordering;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::data_type::{type_mismatch, unimplemented_cast, DataType};
use super::date::{pack_date, parse_date_literal};
use super::value::Value;

/// Strategy for [`AttrType::Chars`].
///
/// Strings compare lexicographically by byte. Casting interprets the text as
/// a literal of the target type.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharType;

impl DataType for CharType {
    fn attr_type(&self) -> AttrType {
        AttrType::Chars
    }

    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        match (left, right) {
            (Value::Chars(l), Value::Chars(r)) => Some(l.as_bytes().cmp(r.as_bytes())),
            _ => {
                debug_assert!(false, "cannot compare {:?} with {:?}", left, right);
                None
            }
        }
    }

    fn cast_to(&self, val: &Value, target: AttrType) -> Result<Value> {
        let text = val
            .as_str()
            .ok_or_else(|| type_mismatch(AttrType::Chars, val))?;
        let mismatch = || DbError::FieldTypeMismatch {
            expected: target,
            input: text.to_string(),
        };
        match target {
            AttrType::Dates => {
                let (year, month, day) = parse_date_literal(text).ok_or_else(mismatch)?;
                Ok(Value::Date(pack_date(year, month, day)))
            }
            AttrType::Ints => text.trim().parse().map(Value::Int).map_err(|_| mismatch()),
            AttrType::Floats => text
                .trim()
                .parse()
                .map(Value::Float)
                .map_err(|_| mismatch()),
            _ => Err(unimplemented_cast(AttrType::Chars, target)),
        }
    }

    fn cast_cost(&self, target: AttrType) -> i32 {
        match target {
            AttrType::Chars => 0,
            AttrType::Dates => 1,
            AttrType::Ints | AttrType::Floats => 2,
        }
    }

    fn set_value_from_str(&self, val: &mut Value, data: &str) -> Result<()> {
        *val = Value::Chars(data.to_string());
        Ok(())
    }

    fn to_string(&self, val: &Value) -> Result<String> {
        val.as_str()
            .map(str::to_string)
            .ok_or_else(|| type_mismatch(AttrType::Chars, val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_to_date() {
        assert_eq!(
            CharType.cast_to(&Value::from("2025-3-4"), AttrType::Dates),
            Ok(Value::Date(20250304))
        );
        assert_eq!(
            CharType.cast_to(&Value::from("2025-02-30"), AttrType::Dates),
            Err(DbError::FieldTypeMismatch {
                expected: AttrType::Dates,
                input: "2025-02-30".to_string()
            })
        );
    }

    #[test]
    fn test_cast_to_numbers() {
        assert_eq!(
            CharType.cast_to(&Value::from(" 12 "), AttrType::Ints),
            Ok(Value::Int(12))
        );
        assert_eq!(
            CharType.cast_to(&Value::from("1.5"), AttrType::Floats),
            Ok(Value::Float(1.5))
        );
        assert!(CharType.cast_to(&Value::from("x"), AttrType::Ints).is_err());
    }

    #[test]
    fn test_arithmetic_unsupported() {
        let a = Value::from("a");
        assert!(matches!(
            CharType.add(&a, &a),
            Err(DbError::Unsupported {
                attr_type: AttrType::Chars,
                op: "addition"
            })
        ));
    }

    #[test]
    fn test_compare_bytes() {
        assert_eq!(
            CharType.compare(&Value::from("abc"), &Value::from("abd")),
            Some(Ordering::Less)
        );
        assert_eq!(
            CharType.compare(&Value::from("b"), &Value::from("abc")),
            Some(Ordering::Greater)
        );
    }
}
