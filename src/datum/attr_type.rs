//! Type tags.

use std::fmt;

use super::chars::CharType;
use super::data_type::DataType;
use super::date::DateType;
use super::float::FloatType;
use super::integer::IntegerType;

static CHAR_TYPE: CharType = CharType;
static INTEGER_TYPE: IntegerType = IntegerType;
static FLOAT_TYPE: FloatType = FloatType;
static DATE_TYPE: DateType = DateType;

/// Type tag of a value or schema field.
///
/// The set is open: new tags come with their own [`DataType`] strategy.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrType {
    /// Fixed-length character string.
    Chars,
    /// 4-byte signed integer.
    Ints,
    /// 4-byte floating point.
    Floats,
    /// Calendar date stored as a packed `YYYYMMDD` integer.
    Dates,
}

impl AttrType {
    /// Returns the lower-case tag name used in messages and schemas.
    pub const fn name(self) -> &'static str {
        match self {
            AttrType::Chars => "chars",
            AttrType::Ints => "ints",
            AttrType::Floats => "floats",
            AttrType::Dates => "dates",
        }
    }

    /// Looks a tag up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            AttrType::Chars,
            AttrType::Ints,
            AttrType::Floats,
            AttrType::Dates,
        ]
        .into_iter()
        .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    /// Returns the cell width for fixed-size types, or `None` when the width
    /// is declared per field (Chars).
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            AttrType::Ints | AttrType::Floats | AttrType::Dates => Some(4),
            AttrType::Chars => None,
        }
    }

    /// Returns the strategy object for this tag.
    pub fn data_type(self) -> &'static dyn DataType {
        match self {
            AttrType::Chars => &CHAR_TYPE,
            AttrType::Ints => &INTEGER_TYPE,
            AttrType::Floats => &FLOAT_TYPE,
            AttrType::Dates => &DATE_TYPE,
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
