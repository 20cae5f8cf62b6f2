//! Database handle tying the catalog and the transaction manager together.
//!
//! ```text
//! +--------------------------------------------------+
//! |                        Db                        |
//! |                                                  |
//! |  +---------------------+  +-------------------+  |
//! |  | RwLock<Catalog>     |  | TransactionManager|  |
//! |  | (name/id -> Table)  |  | (TrxId allocation)|  |
//! |  +----------+----------+  +-------------------+  |
//! +-------------|------------------------------------+
//!               v
//!       +---------------+
//!       | Arc<Table>    |  rows + indexes
//!       +---------------+
//! ```

mod config;
mod database;

pub use config::DbConfig;
pub use database::Db;
