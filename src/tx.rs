//! Transaction handles.
//!
//! Statements run inside a [`Trx`] obtained from the [`TransactionManager`].
//! The handle is threaded through every physical operator's `open` so that
//! storage work can be attributed to a transaction; isolation is provided by
//! the table locks taken during row mutation.

mod manager;
mod types;

pub use manager::TransactionManager;
pub use types::{Trx, TrxId};
