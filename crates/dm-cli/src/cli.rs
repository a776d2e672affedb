//! CLI argument definitions using clap derive API

use clap::{Parser, ValueEnum};
use dm_core::MigrationSetName;
use std::path::PathBuf;

/// dirmig - apply migrations from a directory, exactly once each
#[derive(Parser, Debug)]
#[command(name = "dirmig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Migration set name, suffixed to the tracking table names (3-8 word characters)
    pub name: MigrationSetName,

    /// Path to the migrations directory (`<module>.<subpath>` with --module)
    pub path: String,

    /// File extension of migrations to run [default: .sql]
    #[arg(long)]
    pub ext: Option<String>,

    /// Database connection string (DuckDB path, duckdb:// URL or :memory:)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub dsn: Option<String>,

    /// Log verbosity
    #[arg(short, long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Resolve PATH relative to an installed module
    #[arg(short, long)]
    pub module: bool,

    /// Search root for --module lookups (repeatable)
    #[arg(long = "module-path", env = "DIRMIG_MODULE_PATH", value_delimiter = ':')]
    pub module_paths: Vec<PathBuf>,

    /// Abort the run after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Path to a dirmig.yml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Log verbosity levels
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
