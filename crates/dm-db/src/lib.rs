//! dm-db - Database abstraction layer for dirmig
//!
//! This crate provides the `Database` trait, the transaction helper the
//! migration engine wraps its work in, and a DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{settle_transaction, Database};
