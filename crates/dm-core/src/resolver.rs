//! Migration directory resolution.
//!
//! The CLI hands the raw `path` argument to a [`PathResolver`]; the engine
//! only ever sees the final directory it returns.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Turns the operator-supplied path argument into a migration directory.
pub trait PathResolver {
    /// Resolve `raw` to an on-disk directory path.
    fn resolve(&self, raw: &str) -> CoreResult<PathBuf>;
}

/// Uses the argument as a filesystem path, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPath;

impl PathResolver for DirectPath {
    fn resolve(&self, raw: &str) -> CoreResult<PathBuf> {
        Ok(PathBuf::from(raw))
    }
}

/// Resolves `<module>.<subpath>` against the directories of installed modules.
///
/// A module is a directory named `<module>` directly under one of the search
/// roots; roots are tried in order and the first match wins.
#[derive(Debug, Clone)]
pub struct ModuleLocator {
    search_paths: Vec<PathBuf>,
}

impl ModuleLocator {
    /// Create a locator over `search_paths`, tried in order.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Search roots, in lookup order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the directory of `module`.
    fn locate(&self, module: &str) -> CoreResult<PathBuf> {
        for root in self.search_paths() {
            let candidate = root.join(module);
            if candidate.is_dir() {
                log::debug!("[resolve] module '{}' found at {}", module, candidate.display());
                return Ok(candidate);
            }

            // A single-file module has nothing to join a subpath onto.
            let single_file = root.join(format!("{module}.rs"));
            if candidate.is_file() || single_file.is_file() {
                let path = if candidate.is_file() {
                    candidate
                } else {
                    single_file
                };
                return Err(CoreError::NoSearchLocation {
                    module: module.to_string(),
                    path: path.display().to_string(),
                });
            }
        }

        Err(CoreError::ModuleNotFound {
            module: module.to_string(),
            searched: display_paths(self.search_paths()),
        })
    }
}

impl PathResolver for ModuleLocator {
    fn resolve(&self, raw: &str) -> CoreResult<PathBuf> {
        let (module, subpath) = match raw.split_once('.') {
            Some((module, subpath)) => (module, subpath),
            None => (raw, ""),
        };

        if module.is_empty() {
            return Err(CoreError::InvalidModulePath {
                raw: raw.to_string(),
                reason: "module name is empty".to_string(),
            });
        }
        if Path::new(subpath).is_absolute() {
            return Err(CoreError::InvalidModulePath {
                raw: raw.to_string(),
                reason: "subpath must be relative to the module".to_string(),
            });
        }

        let location = self.locate(module)?;
        if subpath.is_empty() {
            Ok(location)
        } else {
            Ok(location.join(subpath))
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(none)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
