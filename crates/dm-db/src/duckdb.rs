//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// URL scheme accepted in front of a DuckDB file path
const DSN_SCHEME: &str = "duckdb://";

/// DuckDB database backend
///
/// Driver calls are blocking, so each one runs on tokio's blocking pool and
/// the caller's future stays cancellable by a timeout.
pub struct DuckDbBackend {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from a connection string (`:memory:`, a path, or `duckdb://<path>`)
    ///
    /// URLs for any other scheme and `key=value` keyword strings are refused
    /// rather than opened as local files. Error messages never repeat the
    /// connection string, which may carry credentials.
    pub fn new(dsn: &str) -> DbResult<Self> {
        let path = match dsn.strip_prefix(DSN_SCHEME) {
            Some(rest) => rest,
            None => {
                if let Some((scheme, _)) = dsn.split_once("://") {
                    return Err(DbError::ConnectionError(format!(
                        "unsupported connection scheme '{}://'; only {} is supported",
                        scheme, DSN_SCHEME
                    )));
                }
                if is_keyword_dsn(dsn) {
                    return Err(DbError::ConnectionError(
                        "keyword connection strings (key=value ...) are not supported; \
                         pass a DuckDB file path or duckdb://<path>"
                            .to_string(),
                    ));
                }
                dsn
            }
        };
        if path.is_empty() {
            return Err(DbError::ConnectionError(
                "empty database connection string".to_string(),
            ));
        }
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `op` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, op: F) -> DbResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> DbResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|e| DbError::Internal(e.to_string()))?
    }
}

/// True for libpq-style strings such as `host=db dbname=app`
fn is_keyword_dsn(dsn: &str) -> bool {
    dsn.split_whitespace().next().is_some_and(|token| {
        token.split_once('=').is_some_and(|(key, _)| {
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
    })
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let sql = sql.to_string();
        self.with_conn(move |conn| Ok(conn.execute_batch(&sql)?))
            .await
    }

    async fn execute_with(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        let sql = sql.to_string();
        let params: Vec<String> = params.iter().map(|p| p.to_string()).collect();
        self.with_conn(move |conn| Ok(conn.execute(&sql, duckdb::params_from_iter(params))?))
            .await
    }

    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        let sql = sql.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let values = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(values)
        })
        .await
    }

    async fn query_optional_i64(&self, sql: &str) -> DbResult<Option<i64>> {
        let sql = sql.to_string();
        self.with_conn(move |conn| {
            Ok(conn.query_row(&sql, [], |row| row.get::<_, Option<i64>>(0))?)
        })
        .await
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = match name.rsplit_once('.') {
            Some((schema, table)) => (schema.to_string(), table.to_string()),
            None => ("main".to_string(), name.to_string()),
        };

        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
                duckdb::params![schema, table],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
    }

    async fn begin(&self) -> DbResult<()> {
        self.with_conn(|conn| Ok(conn.execute_batch("BEGIN TRANSACTION")?))
            .await
    }

    async fn commit(&self) -> DbResult<()> {
        self.with_conn(|conn| Ok(conn.execute_batch("COMMIT")?))
            .await
    }

    async fn rollback(&self) -> DbResult<()> {
        self.with_conn(|conn| Ok(conn.execute_batch("ROLLBACK")?))
            .await
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
