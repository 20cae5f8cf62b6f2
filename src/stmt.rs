//! Bound statements.
//!
//! Binding checks a parse node against the catalog and resolves every name
//! it mentions, producing a statement the planner can consume without
//! further lookups:
//!
//! - [`FilterStmt`]: a WHERE clause with its attributes bound to fields
//! - [`UpdateStmt`]: `UPDATE ... SET ... WHERE ...` bound to one table

mod filter;
mod update;

pub use filter::{FilterObj, FilterStmt, FilterUnit};
pub use update::UpdateStmt;
