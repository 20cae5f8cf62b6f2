pub mod catalog;
pub mod datum;
pub mod db;
pub mod error;
pub mod executor;
pub mod heap;
pub mod sql;
pub mod stmt;
pub mod tuple;
pub mod tx;

pub use error::{DbError, Result};
