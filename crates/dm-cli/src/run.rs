//! Migration run: connect, bootstrap, apply, report

use anyhow::{Context, Result};
use dm_db::DuckDbBackend;
use dm_migrate::ApplyReport;

use crate::cli::Cli;
use crate::context::RunOptions;

/// Execute a migration run for the parsed command line
pub async fn execute(cli: &Cli) -> Result<()> {
    let options = RunOptions::from_cli(cli)?;
    let run = migrate(&options);

    let report = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, run).await.with_context(|| {
            format!(
                "Migration run timed out after {}s; the open transaction was not committed",
                limit.as_secs()
            )
        })??,
        None => run.await?,
    };

    if report.is_noop() {
        log::info!(
            "[dirmig] up to date: nothing to apply, {} already-applied",
            report.skipped.len()
        );
    } else {
        log::info!(
            "[dirmig] applied {} migration(s), skipped {} already-applied",
            report.applied.len(),
            report.skipped.len()
        );
    }
    Ok(())
}

async fn migrate(options: &RunOptions) -> Result<ApplyReport> {
    let db = DuckDbBackend::new(&options.dsn).context("Failed to connect to database")?;
    let migrator = &options.migrator;

    migrator.run(&db).await.with_context(|| {
        format!(
            "Failed to apply migrations for set '{}' from {}",
            migrator.set(),
            migrator.directory().display()
        )
    })
}
