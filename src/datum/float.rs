use std::cmp::Ordering;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::data_type::{type_mismatch, unimplemented_cast, DataType, INFINITE_CAST_COST};
use super::value::Value;

/// Strategy for [`AttrType::Floats`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatType;

fn as_f32(val: &Value) -> Result<f32> {
    match val {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f32),
        _ => Err(type_mismatch(AttrType::Floats, val)),
    }
}

impl DataType for FloatType {
    fn attr_type(&self) -> AttrType {
        AttrType::Floats
    }

    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        let left = left.as_float()?;
        match right {
            Value::Float(right) => left.partial_cmp(right),
            Value::Int(right) => left.partial_cmp(&(*right as f32)),
            _ => {
                debug_assert!(false, "cannot compare a float with {:?}", right);
                None
            }
        }
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::Float(as_f32(left)? + as_f32(right)?))
    }

    fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::Float(as_f32(left)? - as_f32(right)?))
    }

    fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::Float(as_f32(left)? * as_f32(right)?))
    }

    fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        let divisor = as_f32(right)?;
        if divisor == 0.0 {
            return Err(DbError::DivisionByZero);
        }
        Ok(Value::Float(as_f32(left)? / divisor))
    }

    fn negative(&self, val: &Value) -> Result<Value> {
        Ok(Value::Float(-as_f32(val)?))
    }

    fn cast_to(&self, val: &Value, target: AttrType) -> Result<Value> {
        let v = val
            .as_float()
            .ok_or_else(|| type_mismatch(AttrType::Floats, val))?;
        match target {
            AttrType::Ints => {
                let rounded = v.round();
                if !rounded.is_finite() || rounded < i32::MIN as f32 || rounded >= i32::MAX as f32
                {
                    return Err(DbError::IntegerOverflow);
                }
                Ok(Value::Int(rounded as i32))
            }
            AttrType::Chars => Ok(Value::Chars(self.to_string(val)?)),
            _ => Err(unimplemented_cast(AttrType::Floats, target)),
        }
    }

    fn cast_cost(&self, target: AttrType) -> i32 {
        match target {
            AttrType::Floats => 0,
            AttrType::Ints => 2,
            _ => INFINITE_CAST_COST,
        }
    }

    fn set_value_from_str(&self, val: &mut Value, data: &str) -> Result<()> {
        let v = data.parse().map_err(|_| DbError::FieldTypeMismatch {
            expected: AttrType::Floats,
            input: data.to_string(),
        })?;
        *val = Value::Float(v);
        Ok(())
    }

    /// Renders with at most two decimals and no trailing zeros.
    fn to_string(&self, val: &Value) -> Result<String> {
        let v = val
            .as_float()
            .ok_or_else(|| type_mismatch(AttrType::Floats, val))?;
        let text = format!("{:.2}", v);
        if !text.contains('.') {
            return Ok(text);
        }
        Ok(text
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string())
    }
}
