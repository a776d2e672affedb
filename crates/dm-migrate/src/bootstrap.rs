//! Metadata bootstrap for a migration set.
//!
//! Creates `dirmigv_<name>` if needed and, the first time it is empty,
//! performs the null migration: create `dirmig_<name>` and record version 1.
//! Everything happens in one transaction that commits before any script runs.
//!
//! Two processes bootstrapping the same set for the first time race between
//! the version read and the version insert; the loser fails on the primary
//! key and is not retried.

use crate::error::{MigrateError, MigrateResult};
use crate::tables::MetaTables;
use dm_core::MigrationSetName;
use dm_db::{settle_transaction, Database, DbResult};

/// What [`bootstrap`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The version table had no rows; both tables were initialized.
    NullMigration,
    /// The tracking tables were already initialized at this version.
    Existing { version: i64 },
}

/// Ensure both tracking tables for `set` exist and are initialized.
pub async fn bootstrap(db: &dyn Database, set: &MigrationSetName) -> MigrateResult<BootstrapOutcome> {
    let tables = MetaTables::new(set);
    let to_err = |source| MigrateError::Bootstrap {
        set: set.to_string(),
        source,
    };

    db.begin().await.map_err(to_err)?;
    let result = bootstrap_in_transaction(db, &tables).await.map_err(to_err);
    settle_transaction(db, result).await
}

async fn bootstrap_in_transaction(
    db: &dyn Database,
    tables: &MetaTables,
) -> DbResult<BootstrapOutcome> {
    db.execute_batch(&tables.create_version_table()).await?;

    if let Some(version) = db.query_optional_i64(&tables.select_max_version()).await? {
        log::debug!(
            "[dirmig-meta] {} at version {}",
            tables.version_table(),
            version
        );
        return Ok(BootstrapOutcome::Existing { version });
    }

    log::info!("[dirmig-meta] performing null migration");
    db.execute_batch(&tables.create_applied_table()).await?;
    db.execute_batch(&tables.insert_meta_version()).await?;
    Ok(BootstrapOutcome::NullMigration)
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
