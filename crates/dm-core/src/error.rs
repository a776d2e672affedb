//! Error types for dm-core

use thiserror::Error;

/// Core error type for dirmig
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Migration set name does not match `^\w{3,8}$`
    #[error("[C001] Invalid migration set name '{name}': must be 3-8 word characters")]
    InvalidSetName { name: String },

    /// C002: Configuration file not found
    #[error("[C002] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C003: Failed to parse configuration file
    #[error("[C003] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// C004: Invalid configuration value
    #[error("[C004] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C005: Module could not be located on any search path
    #[error("[C005] Module '{module}' not found in search paths: {searched}")]
    ModuleNotFound { module: String, searched: String },

    /// C006: Module exists but has no directory to resolve a subpath against
    #[error("[C006] Module '{module}' has no filesystem search location ({path})")]
    NoSearchLocation { module: String, path: String },

    /// C007: Module-relative path is malformed
    #[error("[C007] Invalid module path '{raw}': {reason}")]
    InvalidModulePath { raw: String, reason: String },

    /// C008: IO error with file path context
    #[error("[C008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
