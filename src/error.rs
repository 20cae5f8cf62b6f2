//! Error taxonomy shared by the type system, the binder and the executor.
//!
//! Every fallible operation in the crate returns [`Result`]. Success is `Ok`;
//! end-of-stream from a physical operator is `Ok(None)` rather than an error.

use thiserror::Error;

use crate::datum::AttrType;
use crate::heap::Rid;

/// Crate-wide result alias.
pub type Result<T, E = DbError> = std::result::Result<T, E>;

/// Errors produced while binding, planning or executing statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// A caller supplied an argument the operation cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced table does not exist.
    #[error("table \"{name}\" does not exist")]
    TableNotExist { name: String },

    /// Referenced field does not exist in the table's schema.
    #[error("field \"{field}\" does not exist in table \"{table}\"")]
    FieldNotExist { table: String, field: String },

    /// Text could not be interpreted as the expected type.
    #[error("cannot interpret {input:?} as {expected}")]
    FieldTypeMismatch { expected: AttrType, input: String },

    /// The type does not support the requested operation.
    #[error("{op} is not supported for {attr_type}")]
    Unsupported { attr_type: AttrType, op: &'static str },

    /// No conversion is defined between the two types.
    #[error("cast from {from} to {to} is not implemented")]
    Unimplemented { from: AttrType, to: AttrType },

    /// A table with the same name is already registered.
    #[error("table \"{name}\" already exists")]
    TableExists { name: String },

    /// Two fields of one table share a name.
    #[error("duplicate field \"{name}\"")]
    DuplicateField { name: String },

    /// No live record at the given row identifier.
    #[error("record {0} not found")]
    RecordNotFound(Rid),

    /// A unique index already holds the key for another row.
    #[error("duplicate key in unique index \"{index}\"")]
    DuplicateKey { index: String },

    /// An index with the same name already exists on the table.
    #[error("index \"{name}\" already exists")]
    IndexExists { name: String },

    /// Referenced index does not exist.
    #[error("index \"{name}\" does not exist")]
    IndexNotExist { name: String },

    /// Row buffer length does not match the table's record size.
    #[error("record size mismatch: expected {expected} bytes, got {actual}")]
    RecordSizeMismatch { expected: usize, actual: usize },

    /// Value does not fit in the field's fixed-width cell.
    #[error("value of {len} bytes does not fit field \"{field}\" ({max} bytes)")]
    ValueTooLong {
        field: String,
        len: usize,
        max: usize,
    },

    /// Division by zero in arithmetic.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed.
    #[error("integer overflow")]
    IntegerOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::TableNotExist {
            name: "t".to_string(),
        };
        assert_eq!(err.to_string(), "table \"t\" does not exist");

        let err = DbError::FieldTypeMismatch {
            expected: AttrType::Dates,
            input: "2025-09-17".to_string(),
        };
        assert_eq!(err.to_string(), "cannot interpret \"2025-09-17\" as dates");

        let err = DbError::Unsupported {
            attr_type: AttrType::Dates,
            op: "addition",
        };
        assert_eq!(err.to_string(), "addition is not supported for dates");
    }
}
