//! Row identifiers and row buffers.

use std::fmt;

/// Physical location of a row.
///
/// Rids are assigned once at insert time and never reused, so they stay
/// valid for the lifetime of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rid {
    /// Page containing the row.
    pub page_num: u32,
    /// Slot within the page.
    pub slot_num: u16,
}

impl Rid {
    pub fn new(page_num: u32, slot_num: u16) -> Self {
        Self { page_num, slot_num }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page_num, self.slot_num)
    }
}

/// A row buffer addressed by its [`Rid`].
///
/// The bytes are the row's cells back to back, as described by the owning
/// table's schema. A record handed out by a table is a copy; the stored row
/// is only changed through [`Table::visit_record`](super::Table::visit_record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    rid: Rid,
    data: Vec<u8>,
}

impl Record {
    pub fn new(rid: Rid, data: Vec<u8>) -> Self {
        Self { rid, data }
    }

    pub fn rid(&self) -> Rid {
        self.rid
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Row width in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rid_display_and_order() {
        let a = Rid::new(0, 5);
        let b = Rid::new(1, 0);
        assert_eq!(a.to_string(), "(0, 5)");
        assert!(a < b);
    }

    #[test]
    fn test_data_mut_changes_bytes_in_place() {
        let mut record = Record::new(Rid::new(0, 0), vec![0; 4]);
        record.data_mut()[1] = 7;
        assert_eq!(record.data(), &[0, 7, 0, 0]);
        assert_eq!(record.len(), 4);
    }
}
