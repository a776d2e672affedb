//! dm-core - Core library for dirmig
//!
//! This crate provides the validated migration set name, configuration
//! parsing, migration directory resolution and discovery shared by the
//! migration engine and the CLI.

pub mod config;
pub mod discovery;
pub mod error;
pub mod resolver;
pub mod set_name;

pub use config::{normalize_extension, Config, DatabaseConfig, DEFAULT_EXTENSION};
pub use discovery::{discover_migrations, MigrationFile};
pub use error::{CoreError, CoreResult};
pub use resolver::{DirectPath, ModuleLocator, PathResolver};
pub use set_name::MigrationSetName;
