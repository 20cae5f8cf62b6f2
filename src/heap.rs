//! In-memory row storage.
//!
//! This module provides the table implementation the executor mutates:
//!
//! - [`Rid`]: stable row identifier (page number, slot number)
//! - [`Record`]: a fixed-width row buffer laid out per [`TableMeta`](crate::catalog::TableMeta)
//! - [`Index`]: an ordered secondary index over one field
//! - [`Table`]: rows plus indexes, with the row-mutation protocol
//!   ([`Table::visit_record`]) and index resynchronization
//!   ([`Table::update_index`])

mod index;
mod record;
mod table;

pub use index::Index;
pub use record::{Record, Rid};
pub use table::Table;
