//! The apply loop.
//!
//! Reads the applied set once, then for every candidate file in name order
//! either skips it or executes its content and records its name. All of it
//! runs inside one transaction: a failure anywhere rolls back every script
//! the run had already executed, along with its bookkeeping rows.
//!
//! A script that issues its own `BEGIN`/`COMMIT`/`ROLLBACK` (or `START`,
//! `END`, `ABORT`) would split that transaction, so such scripts are refused
//! before they execute. Dollar-quoted bodies are not understood by the scan
//! and may be refused when they contain one of those keywords after a `;`.

use crate::error::{MigrateError, MigrateResult};
use crate::script::transaction_control_keyword;
use crate::tables::MetaTables;
use dm_core::{discover_migrations, MigrationFile, MigrationSetName};
use dm_db::{settle_transaction, Database, DbError};
use std::collections::HashSet;
use std::path::Path;

/// Outcome of a successful apply run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// File names executed and recorded by this run, in execution order
    pub applied: Vec<String>,
    /// File names skipped because they were already recorded
    pub skipped: Vec<String>,
}

impl ApplyReport {
    /// True when the run executed nothing.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Apply every unrecorded migration in `dir` with the given extension.
///
/// The tracking tables must already exist (see [`crate::bootstrap`]).
pub async fn apply(
    db: &dyn Database,
    set: &MigrationSetName,
    dir: &Path,
    extension: &str,
) -> MigrateResult<ApplyReport> {
    let files = discover_migrations(dir, extension)?;
    log::debug!(
        "[dirmig] {} candidate migration(s) with extension {} in {}",
        files.len(),
        extension,
        dir.display()
    );

    let tables = MetaTables::new(set);
    db.begin().await?;
    let result = apply_in_transaction(db, &tables, &files).await;
    settle_transaction(db, result).await
}

async fn apply_in_transaction(
    db: &dyn Database,
    tables: &MetaTables,
    files: &[MigrationFile],
) -> MigrateResult<ApplyReport> {
    let applied: HashSet<String> = db
        .query_strings(&tables.select_applied_paths())
        .await?
        .into_iter()
        .collect();

    let insert_sql = tables.insert_applied_path();
    let mut report = ApplyReport::default();

    for file in files {
        if applied.contains(&file.name) {
            log::debug!("[dirmig] skipping already-applied {}", file.name);
            report.skipped.push(file.name.clone());
            continue;
        }

        let stmt = tokio::fs::read_to_string(&file.path)
            .await
            .map_err(|source| MigrateError::ReadFile {
                path: file.path.display().to_string(),
                source,
            })?;

        if let Some(keyword) = transaction_control_keyword(&stmt) {
            return Err(MigrateError::TransactionControl {
                file: file.name.clone(),
                keyword: keyword.to_string(),
            });
        }

        log::info!("[dirmig] running {}", file.name);
        // Presence in the applied set is what counts, so an empty script
        // is still recorded.
        if !stmt.trim().is_empty() {
            db.execute_batch(&stmt)
                .await
                .map_err(|source| MigrateError::Execution {
                    file: file.name.clone(),
                    source,
                })?;
        }

        db.execute_with(&insert_sql, &[file.name.as_str()])
            .await
            .map_err(|source| record_error(&file.name, source))?;
        report.applied.push(file.name.clone());
    }

    Ok(report)
}

fn record_error(file: &str, source: DbError) -> MigrateError {
    if source.is_constraint_violation() {
        MigrateError::AlreadyRecorded {
            file: file.to_string(),
            source,
        }
    } else {
        MigrateError::Record {
            file: file.to_string(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
