//! Calendar dates.
//!
//! A date is stored as the packed integer `year * 10000 + month * 100 + day`
//! so that packed dates order the same way as the calendar. Two text forms
//! exist and are deliberately different:
//!
//! - display form `YYYY-MM-DD`, produced by [`DataType::to_string`] and
//!   accepted as a literal when comparing or casting from Chars
//! - storage text form, the bare packed integer (`20250917`) written with
//!   ASCII digits only, accepted only by [`DataType::set_value_from_str`]

use std::cmp::Ordering;

use crate::error::{DbError, Result};

use super::attr_type::AttrType;
use super::column::Column;
use super::data_type::{type_mismatch, unimplemented_cast, DataType};
use super::value::Value;

/// Smallest accepted year.
pub const MIN_YEAR: i32 = 1900;
/// Largest accepted year.
pub const MAX_YEAR: i32 = 2100;

const DAYS_IN_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns true when the fields name a real day within the supported range.
pub fn is_valid_date(year: i32, month: i32, day: i32) -> bool {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return false;
    }
    let mut max_day = DAYS_IN_MONTH[(month - 1) as usize];
    if month == 2 && is_leap_year(year) {
        max_day += 1;
    }
    (1..=max_day).contains(&day)
}

pub const fn pack_date(year: i32, month: i32, day: i32) -> i32 {
    year * 10000 + month * 100 + day
}

/// Splits a packed date into `(year, month, day)`.
pub const fn unpack_date(packed: i32) -> (i32, i32, i32) {
    (packed / 10000, packed % 10000 / 100, packed % 100)
}

/// Parses a `YYYY-MM-DD` literal.
///
/// The year group takes 1 to 4 digits and the month and day groups 1 or 2,
/// so `2025-2-3` is accepted. Returns `None` for any other shape or for a
/// date that fails [`is_valid_date`].
pub fn parse_date_literal(text: &str) -> Option<(i32, i32, i32)> {
    let mut parts = text.split('-');
    let year = parse_group(parts.next()?, 4)?;
    let month = parse_group(parts.next()?, 2)?;
    let day = parse_group(parts.next()?, 2)?;
    if parts.next().is_some() || !is_valid_date(year, month, day) {
        return None;
    }
    Some((year, month, day))
}

fn parse_group(group: &str, max_digits: usize) -> Option<i32> {
    if group.is_empty() || group.len() > max_digits || !group.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    group.parse().ok()
}

/// Strategy for [`AttrType::Dates`].
///
/// Dates compare with other dates and with date literals held in Chars.
/// Arithmetic is not supported and the only cast is to Chars.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateType;

impl DataType for DateType {
    fn attr_type(&self) -> AttrType {
        AttrType::Dates
    }

    fn compare(&self, left: &Value, right: &Value) -> Option<Ordering> {
        debug_assert_eq!(left.attr_type(), AttrType::Dates);
        let left = left.as_date()?;
        match right {
            Value::Date(right) => Some(left.cmp(right)),
            Value::Chars(text) => {
                let (year, month, day) = parse_date_literal(text)?;
                Some(left.cmp(&pack_date(year, month, day)))
            }
            _ => {
                debug_assert!(false, "cannot compare a date with {:?}", right);
                None
            }
        }
    }

    fn compare_column(
        &self,
        left: &Column,
        right: &Column,
        left_idx: usize,
        right_idx: usize,
    ) -> Option<Ordering> {
        debug_assert_eq!(left.attr_type(), AttrType::Dates);
        debug_assert_eq!(right.attr_type(), AttrType::Dates);
        let left = i32::from_le_bytes(left.slot(left_idx)?.try_into().ok()?);
        let right = i32::from_le_bytes(right.slot(right_idx)?.try_into().ok()?);
        Some(left.cmp(&right))
    }

    fn cast_to(&self, val: &Value, target: AttrType) -> Result<Value> {
        match target {
            AttrType::Chars => Ok(Value::Chars(self.to_string(val)?)),
            _ => Err(unimplemented_cast(AttrType::Dates, target)),
        }
    }

    fn set_value_from_str(&self, val: &mut Value, data: &str) -> Result<()> {
        let mismatch = || DbError::FieldTypeMismatch {
            expected: AttrType::Dates,
            input: data.to_string(),
        };
        let packed = parse_group(data, 8).ok_or_else(mismatch)?;
        let (year, month, day) = unpack_date(packed);
        if !is_valid_date(year, month, day) {
            return Err(mismatch());
        }
        *val = Value::Date(packed);
        Ok(())
    }

    fn to_string(&self, val: &Value) -> Result<String> {
        let packed = val
            .as_date()
            .ok_or_else(|| type_mismatch(AttrType::Dates, val))?;
        let (year, month, day) = unpack_date(packed);
        Ok(format!("{}-{:02}-{:02}", year, month, day))
    }
}
