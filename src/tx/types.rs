//! Transaction identifiers and handles.

use std::fmt;

/// Transaction ID (64-bit).
///
/// Ids are allocated sequentially starting from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrxId(u64);

impl TrxId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a running transaction.
#[derive(Debug)]
pub struct Trx {
    id: TrxId,
}

impl Trx {
    pub(crate) fn new(id: TrxId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> TrxId {
        self.id
    }
}
