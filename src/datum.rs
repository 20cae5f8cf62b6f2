//! Database data types and values.
//!
//! This module defines the type system the executor works with:
//!
//! - [`AttrType`]: the type tag carried by every value and schema field
//! - [`Value`]: a single typed scalar
//! - [`Column`]: fixed-width slots of one attribute across many rows
//! - [`DataType`]: the per-tag strategy implementing comparison, arithmetic,
//!   casting and text (de)serialization
//!
//! Exactly one strategy instance exists per tag; obtain it with
//! [`AttrType::data_type`].
//!
//! ```
//! use relcore::datum::{AttrType, Value};
//!
//! let date = Value::date(2025, 9, 17).unwrap();
//! assert_eq!(date.to_string(), "2025-09-17");
//!
//! let text = date.cast_to(AttrType::Chars).unwrap();
//! assert_eq!(text, Value::Chars("2025-09-17".to_string()));
//! ```

mod attr_type;
mod chars;
mod column;
mod data_type;
mod date;
mod float;
mod integer;
mod value;

pub use attr_type::AttrType;
pub use chars::CharType;
pub use column::Column;
pub use data_type::{DataType, INFINITE_CAST_COST};
pub use date::{
    is_leap_year, is_valid_date, pack_date, parse_date_literal, unpack_date, DateType, MAX_YEAR,
    MIN_YEAR,
};
pub use float::FloatType;
pub use integer::IntegerType;
pub use value::Value;
