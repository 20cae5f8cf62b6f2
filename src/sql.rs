//! Parse-node types.
//!
//! These are the structures a SQL parser produces for the statements this
//! crate binds and executes. Binding against the catalog happens in
//! [`stmt`](crate::stmt).

mod ast;

pub use ast::*;
