//! Schema-aware row views.
//!
//! A [`RowTuple`] pairs a physical [`Record`] with the [`TableMeta`] that
//! describes it. Cells are addressed by field id or name and decoded into
//! [`Value`]s; [`RowTuple::set_cell_at`] encodes a value back into a row
//! buffer in place.

use std::sync::Arc;

use crate::catalog::{FieldMeta, TableMeta};
use crate::datum::Value;
use crate::error::{DbError, Result};
use crate::heap::{Record, Rid};

/// A row produced by a table scan, together with its schema.
///
/// Every `RowTuple` is backed by a stored row, so it always has a [`Rid`]
/// that [`Table::visit_record`](crate::heap::Table::visit_record) can use.
#[derive(Debug, Clone)]
pub struct RowTuple {
    record: Record,
    schema: Arc<TableMeta>,
}

impl RowTuple {
    pub fn new(record: Record, schema: Arc<TableMeta>) -> Self {
        Self { record, schema }
    }

    pub fn rid(&self) -> Rid {
        self.record.rid()
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn schema(&self) -> &Arc<TableMeta> {
        &self.schema
    }

    fn field_at(&self, field_id: usize) -> Result<&FieldMeta> {
        self.schema.field_at(field_id).ok_or_else(|| {
            DbError::InvalidArgument(format!(
                "field id {} out of range for table \"{}\"",
                field_id,
                self.schema.name()
            ))
        })
    }

    /// Decodes the cell of field `field_id`.
    pub fn cell_at(&self, field_id: usize) -> Result<Value> {
        let field = self.field_at(field_id)?;
        let cell = self
            .record
            .data()
            .get(field.cell_range())
            .ok_or(DbError::RecordSizeMismatch {
                expected: self.schema.record_size(),
                actual: self.record.len(),
            })?;
        Value::from_cell(field.attr_type(), cell)
    }

    /// Decodes the cell of the field named `name`.
    pub fn find_cell(&self, name: &str) -> Result<Value> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| DbError::FieldNotExist {
                table: self.schema.name().to_string(),
                field: name.to_string(),
            })?;
        self.cell_at(field.field_id())
    }

    /// Overwrites the cell of field `field_id` inside `data`.
    ///
    /// `data` is a row buffer of this tuple's schema, typically the stored
    /// record being mutated. `value` must already be of the field's type;
    /// on error `data` is left unchanged.
    pub fn set_cell_at(&self, field_id: usize, value: &Value, data: &mut [u8]) -> Result<()> {
        let field = self.field_at(field_id)?;
        if value.attr_type() != field.attr_type() {
            return Err(DbError::FieldTypeMismatch {
                expected: field.attr_type(),
                input: value.to_string(),
            });
        }
        if value.length() > field.size() {
            return Err(DbError::ValueTooLong {
                field: field.name().to_string(),
                len: value.length(),
                max: field.size(),
            });
        }
        let len = data.len();
        let cell = data
            .get_mut(field.cell_range())
            .ok_or(DbError::RecordSizeMismatch {
                expected: self.schema.record_size(),
                actual: len,
            })?;
        value.write_cell(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttrInfo, TableId};
    use crate::datum::AttrType;

    fn tuple() -> RowTuple {
        let schema = TableMeta::new(
            TableId::new(1),
            "t",
            &[
                AttrInfo::new("id", AttrType::Ints),
                AttrInfo::chars("name", 4),
                AttrInfo::new("d", AttrType::Dates),
            ],
        )
        .unwrap();
        let mut data = vec![0u8; schema.record_size()];
        Value::Int(7).write_cell(&mut data[0..4]).unwrap();
        Value::from("ab").write_cell(&mut data[4..8]).unwrap();
        Value::Date(20240101).write_cell(&mut data[8..12]).unwrap();
        RowTuple::new(Record::new(Rid::new(0, 3), data), Arc::new(schema))
    }

    #[test]
    fn test_read_cells() {
        let tuple = tuple();
        assert_eq!(tuple.rid(), Rid::new(0, 3));
        assert_eq!(tuple.cell_at(0).unwrap(), Value::Int(7));
        assert_eq!(tuple.find_cell("name").unwrap(), Value::from("ab"));
        assert_eq!(tuple.find_cell("d").unwrap(), Value::Date(20240101));
        assert!(matches!(
            tuple.find_cell("x"),
            Err(DbError::FieldNotExist { .. })
        ));
        assert!(tuple.cell_at(3).is_err());
    }

    #[test]
    fn test_set_cell_at_touches_only_target_cell() {
        let tuple = tuple();
        let mut data = tuple.record().data().to_vec();
        tuple
            .set_cell_at(2, &Value::Date(20250304), &mut data)
            .unwrap();
        assert_eq!(&data[..8], &tuple.record().data()[..8]);
        assert_eq!(
            Value::from_cell(AttrType::Dates, &data[8..12]).unwrap(),
            Value::Date(20250304)
        );
    }

    #[test]
    fn test_set_cell_at_rejects_mismatch() {
        let tuple = tuple();
        let mut data = tuple.record().data().to_vec();
        assert!(matches!(
            tuple.set_cell_at(2, &Value::from("2025-03-04"), &mut data),
            Err(DbError::FieldTypeMismatch { .. })
        ));
        assert!(matches!(
            tuple.set_cell_at(1, &Value::from("abcde"), &mut data),
            Err(DbError::ValueTooLong { .. })
        ));
        assert_eq!(data, tuple.record().data());
    }
}
