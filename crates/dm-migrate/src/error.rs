//! Error types for the migration engine.

use dm_core::CoreError;
use dm_db::DbError;
use thiserror::Error;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Creating or initializing the tracking tables failed (M001).
    #[error("[M001] Migration metadata bootstrap failed for set '{set}': {source}")]
    Bootstrap {
        set: String,
        #[source]
        source: DbError,
    },

    /// The migration directory could not be listed (M002).
    #[error("[M002] Failed to list migrations: {0}")]
    Discovery(#[from] CoreError),

    /// A migration script could not be read (M003).
    #[error("[M003] Failed to read migration '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A migration script failed to execute; the batch was rolled back (M004).
    #[error("[M004] Migration '{file}' failed, batch rolled back: {source}")]
    Execution {
        file: String,
        #[source]
        source: DbError,
    },

    /// Another run recorded the same migration first (M005).
    #[error("[M005] Migration '{file}' was recorded concurrently, batch rolled back: {source}")]
    AlreadyRecorded {
        file: String,
        #[source]
        source: DbError,
    },

    /// Recording a migration as applied failed (M006).
    #[error("[M006] Failed to record migration '{file}': {source}")]
    Record {
        file: String,
        #[source]
        source: DbError,
    },

    /// Any other database failure (M007).
    #[error("[M007] Database error: {0}")]
    Db(#[from] DbError),

    /// A script would end or restart the batch transaction itself (M008).
    #[error("[M008] Migration '{file}' contains a {keyword} statement; scripts run inside dirmig's transaction and must not manage their own")]
    TransactionControl { file: String, keyword: String },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
