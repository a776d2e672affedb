//! One-shot migration run: bootstrap, then apply.

use crate::apply::{apply, ApplyReport};
use crate::bootstrap::bootstrap;
use crate::error::MigrateResult;
use dm_core::{normalize_extension, CoreResult, MigrationSetName, DEFAULT_EXTENSION};
use dm_db::Database;
use std::path::{Path, PathBuf};

/// A migration set bound to its resolved directory and extension filter.
#[derive(Debug, Clone)]
pub struct Migrator {
    set: MigrationSetName,
    directory: PathBuf,
    extension: String,
}

impl Migrator {
    /// Create a migrator for `set` over `directory`, using the default extension.
    pub fn new(set: MigrationSetName, directory: impl Into<PathBuf>) -> Self {
        Self {
            set,
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Only run files with this extension (`sql` and `.sql` are equivalent).
    ///
    /// Fails with a config error when the extension is empty or only dots.
    pub fn with_extension(mut self, extension: &str) -> CoreResult<Self> {
        self.extension = normalize_extension(extension)?;
        Ok(self)
    }

    pub fn set(&self) -> &MigrationSetName {
        &self.set
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Bootstrap the tracking tables, then apply every pending migration.
    ///
    /// The bootstrap commits on its own; the apply batch is a separate
    /// all-or-nothing transaction.
    pub async fn run(&self, db: &dyn Database) -> MigrateResult<ApplyReport> {
        log::debug!(
            "[dirmig] migrating set '{}' from {} on {}",
            self.set,
            self.directory.display(),
            db.db_type()
        );
        bootstrap(db, &self.set).await?;
        apply(db, &self.set, &self.directory, &self.extension).await
    }
}
