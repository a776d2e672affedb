//! Configuration types and parsing for dirmig.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension used when neither the command line nor the config file sets one.
pub const DEFAULT_EXTENSION: &str = ".sql";

/// Optional run configuration loaded from a YAML file.
///
/// Every field has a default, so an empty file is valid. Command-line flags
/// and environment variables take precedence over these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File extension of migration scripts
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Upper bound on the whole run, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Search roots for module-relative migration paths
    #[serde(default)]
    pub module_paths: Vec<String>,
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string (DuckDB file path, `duckdb://` URL or `:memory:`)
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            database: DatabaseConfig::default(),
            timeout_secs: None,
            module_paths: Vec::new(),
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let mut config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str::<Config>(content)?
        };
        config.validate()?;
        config.extension = normalize_extension(&config.extension)?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.timeout_secs == Some(0) {
            return Err(CoreError::ConfigInvalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Module search roots as paths
    pub fn module_paths(&self) -> Vec<PathBuf> {
        self.module_paths.iter().map(PathBuf::from).collect()
    }
}

/// Ensure an extension carries exactly one leading dot (`sql` -> `.sql`).
///
/// An extension with nothing after its dots is rejected, since `.` would
/// match names ending in a bare dot.
pub fn normalize_extension(ext: &str) -> CoreResult<String> {
    let bare = ext.trim_start_matches('.');
    if bare.is_empty() {
        return Err(CoreError::ConfigInvalid {
            message: "extension cannot be empty".to_string(),
        });
    }
    Ok(format!(".{}", bare))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
