//! Statement executor implementing the Volcano iterator model.
//!
//! # Architecture
//!
//! ```text
//! UpdateSqlNode
//!       |
//! [UpdateStmt::create] -- binds table, field and conditions
//!       |
//! [plan_update] -- UpdateLogicalOperator
//!                    └── Predicate (if conditions)
//!                          └── TableScan
//!       |
//! [build_update] -- resolves table ids into live tables
//!       |
//! UpdatePhysicalOperator::open drains the child and mutates each row
//! ```
//!
//! # Components
//!
//! - [`QueryPlan`], [`UpdateLogicalOperator`]: logical plans
//! - [`PhysicalOperator`]: enum-dispatched row producers (TableScan, Predicate)
//! - [`UpdatePhysicalOperator`]: the row-mutating root, driving a `PhysicalOperator` child
//! - [`execute_update`]: bind, plan and run an UPDATE in one call

mod node;
mod plan;
mod planner;
mod runner;
mod update;

pub use node::{PhysicalOperator, Predicate, TableScan};
pub use plan::{QueryPlan, UpdateLogicalOperator};
pub use planner::{build_update, plan_update};
pub use runner::{execute_update, UpdateOutcome};
pub use update::UpdatePhysicalOperator;
