//! Migration file discovery

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// A migration script found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Bare file name; this is the key recorded in the applied-paths table
    pub name: String,
    /// Full path used to read the script
    pub path: PathBuf,
}

/// List the migration files in `dir` whose extension equals `extension`.
///
/// The result is sorted by file name (byte order), which is the execution
/// order. Subdirectories are not descended into.
pub fn discover_migrations(dir: &Path, extension: &str) -> CoreResult<Vec<MigrationFile>> {
    let io_err = |source: std::io::Error| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("[dirmig] ignoring non UTF-8 entry {}", path.display());
            continue;
        };
        if !has_extension(&name, extension) {
            continue;
        }
        if !path.is_file() {
            log::debug!("[dirmig] ignoring {} (not a regular file)", name);
            continue;
        }

        files.push(MigrationFile { name, path });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Case-sensitive match of the final `.ext` of `name` against `extension`.
///
/// Leading-dot names such as `.sql` have no extension.
fn has_extension(name: &str, extension: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extension.strip_prefix('.') == Some(e))
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
