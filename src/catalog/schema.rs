//! Table schema descriptors.

use std::collections::HashMap;
use std::fmt;

use crate::datum::AttrType;
use crate::error::{DbError, Result};

/// Identifier of a registered table.
///
/// Plans and bound statements refer to tables by id; the id is resolved to a
/// live table through [`Db::table_by_id`](crate::db::Db::table_by_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(u32);

impl TableId {
    /// First id handed out to user tables.
    pub const FIRST_USER_TABLE: Self = Self(100);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    pub(crate) const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column declaration supplied when creating a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrInfo {
    pub name: String,
    pub attr_type: AttrType,
    /// Cell width in bytes. Ignored for fixed-size types.
    pub length: usize,
}

impl AttrInfo {
    /// Declares a fixed-size column (Ints, Floats, Dates).
    pub fn new(name: impl Into<String>, attr_type: AttrType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            length: attr_type.fixed_size().unwrap_or(0),
        }
    }

    /// Declares a Chars column of `length` bytes.
    pub fn chars(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            attr_type: AttrType::Chars,
            length,
        }
    }
}

/// Schema descriptor of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    name: String,
    attr_type: AttrType,
    /// Byte offset of the cell within a record.
    offset: usize,
    len: usize,
    /// Position of the field in the schema (0-based).
    field_id: usize,
}

impl FieldMeta {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Cell width in bytes.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn field_id(&self) -> usize {
        self.field_id
    }

    /// Byte range of the cell within a record.
    pub fn cell_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Ordered, name-indexed collection of the fields of one table.
///
/// Records are laid out as the fields' cells back to back, in schema order.
#[derive(Debug, Clone)]
pub struct TableMeta {
    table_id: TableId,
    name: String,
    fields: Vec<FieldMeta>,
    by_name: HashMap<String, usize>,
    record_size: usize,
}

impl TableMeta {
    /// Builds the schema, deriving offsets and field ids from `attrs`.
    pub fn new(table_id: TableId, name: impl Into<String>, attrs: &[AttrInfo]) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DbError::InvalidArgument("table name is empty".to_string()));
        }
        if attrs.is_empty() {
            return Err(DbError::InvalidArgument(format!(
                "table \"{}\" has no fields",
                name
            )));
        }

        let mut fields = Vec::with_capacity(attrs.len());
        let mut by_name = HashMap::with_capacity(attrs.len());
        let mut offset = 0;
        for (field_id, attr) in attrs.iter().enumerate() {
            let len = attr.attr_type.fixed_size().unwrap_or(attr.length);
            if attr.name.is_empty() || len == 0 {
                return Err(DbError::InvalidArgument(format!(
                    "invalid field {:?} of {} bytes",
                    attr.name, len
                )));
            }
            if by_name.insert(attr.name.clone(), field_id).is_some() {
                return Err(DbError::DuplicateField {
                    name: attr.name.clone(),
                });
            }
            fields.push(FieldMeta {
                name: attr.name.clone(),
                attr_type: attr.attr_type,
                offset,
                len,
                field_id,
            });
            offset += len;
        }

        Ok(Self {
            table_id,
            name,
            fields,
            by_name,
            record_size: offset,
        })
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Looks a field up by id.
    pub fn field_at(&self, field_id: usize) -> Option<&FieldMeta> {
        self.fields.get(field_id)
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    /// Total width of a record in bytes.
    pub fn record_size(&self) -> usize {
        self.record_size
    }
}

/// Descriptor of a secondary index over one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMeta {
    pub name: String,
    pub field: FieldMeta,
    pub unique: bool,
}
