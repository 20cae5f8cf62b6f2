use std::cmp::Ordering;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::data_type::{type_mismatch, unimplemented_cast, DataType, INFINITE_CAST_COST};
use super::value::Value;

/// Strategy for [`AttrType::Ints`].
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerType;

impl IntegerType {
    fn operands(left: &Value, right: &Value) -> Result<(i32, i32)> {
        let l = left
            .as_int()
            .ok_or_else(|| type_mismatch(AttrType::Ints, left))?;
        let r = right
            .as_int()
            .ok_or_else(|| type_mismatch(AttrType::Ints, right))?;
        Ok((l, r))
    }
}

impl DataType for IntegerType {
    fn attr_type(&self) -> AttrType {
        AttrType::Ints
    }

    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        let left = left.as_int()?;
        match right {
            Value::Int(right) => Some(left.cmp(right)),
            Value::Float(right) => (left as f32).partial_cmp(right),
            _ => {
                debug_assert!(false, "cannot compare an integer with {:?}", right);
                None
            }
        }
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        let (l, r) = Self::operands(left, right)?;
        l.checked_add(r)
            .map(Value::Int)
            .ok_or(DbError::IntegerOverflow)
    }

    fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        let (l, r) = Self::operands(left, right)?;
        l.checked_sub(r)
            .map(Value::Int)
            .ok_or(DbError::IntegerOverflow)
    }

    fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        let (l, r) = Self::operands(left, right)?;
        l.checked_mul(r)
            .map(Value::Int)
            .ok_or(DbError::IntegerOverflow)
    }

    /// Integer division yields a float.
    fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        let (l, r) = Self::operands(left, right)?;
        if r == 0 {
            return Err(DbError::DivisionByZero);
        }
        Ok(Value::Float(l as f32 / r as f32))
    }

    fn negative(&self, val: &Value) -> Result<Value> {
        let v = val
            .as_int()
            .ok_or_else(|| type_mismatch(AttrType::Ints, val))?;
        v.checked_neg()
            .map(Value::Int)
            .ok_or(DbError::IntegerOverflow)
    }

    fn cast_to(&self, val: &Value, target: AttrType) -> Result<Value> {
        let v = val
            .as_int()
            .ok_or_else(|| type_mismatch(AttrType::Ints, val))?;
        match target {
            AttrType::Floats => Ok(Value::Float(v as f32)),
            AttrType::Chars => Ok(Value::Chars(v.to_string())),
            _ => Err(unimplemented_cast(AttrType::Ints, target)),
        }
    }

    fn cast_cost(&self, target: AttrType) -> i32 {
        match target {
            AttrType::Ints => 0,
            AttrType::Floats => 1,
            _ => INFINITE_CAST_COST,
        }
    }

    fn set_value_from_str(&self, val: &mut Value, data: &str) -> Result<()> {
        let v = data.parse().map_err(|_| DbError::FieldTypeMismatch {
            expected: AttrType::Ints,
            input: data.to_string(),
        })?;
        *val = Value::Int(v);
        Ok(())
    }

    fn to_string(&self, val: &Value) -> Result<String> {
        val.as_int()
            .map(|v| v.to_string())
            .ok_or_else(|| type_mismatch(AttrType::Ints, val))
    }
}
