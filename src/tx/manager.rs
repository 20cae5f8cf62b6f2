//! Transaction manager.

use parking_lot::Mutex;
use tracing::trace;

use super::types::{Trx, TrxId};

/// Allocates transaction ids.
pub struct TransactionManager {
    /// Next transaction ID to allocate.
    next_trx_id: Mutex<u64>,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            next_trx_id: Mutex::new(1),
        }
    }

    /// Begins a new transaction.
    pub fn begin(&self) -> Trx {
        let id = {
            let mut next = self.next_trx_id.lock();
            let id = TrxId::new(*next);
            *next += 1;
            id
        };
        trace!(trx = %id, "began transaction");
        Trx::new(id)
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}
