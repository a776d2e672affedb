//! Database trait definition

use crate::error::{DbError, DbResult};
use async_trait::async_trait;

/// Database abstraction trait for dirmig
///
/// One implementation wraps one connection, so `begin`/`commit`/`rollback`
/// bracket every statement issued between them.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one or more SQL statements as an opaque blob
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a single statement with positional text parameters,
    /// returning affected rows
    async fn execute_with(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Return the first column of every row as text
    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Return the first column of the first row as an integer,
    /// `None` when the value is NULL
    async fn query_optional_i64(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Open a transaction on this connection
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Finish a transaction opened with [`Database::begin`].
///
/// Commits when `result` is `Ok`, otherwise rolls back and returns the
/// original error. A failed commit is rolled back and reported.
pub async fn settle_transaction<T, E>(db: &dyn Database, result: Result<T, E>) -> Result<T, E>
where
    E: From<DbError>,
{
    match result {
        Ok(value) => {
            if let Err(commit_err) = db.commit().await {
                let _ = db.rollback().await;
                return Err(commit_err.into());
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = db.rollback().await {
                log::warn!("rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
