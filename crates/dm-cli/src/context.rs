//! Runtime options for a migration run
//!
//! Merges command-line flags, environment and the optional config file, and
//! resolves the migrations directory before any database work starts.

use anyhow::{bail, Context, Result};
use dm_core::{normalize_extension, Config, DirectPath, ModuleLocator, PathResolver};
use dm_migrate::Migrator;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

/// Everything a run needs, fully resolved
#[derive(Debug)]
pub struct RunOptions {
    /// Migration set bound to its resolved directory and extension
    pub migrator: Migrator,

    /// Database connection string
    pub dsn: String,

    /// Upper bound on the whole run
    pub timeout: Option<Duration>,
}

impl RunOptions {
    /// Build run options from parsed arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load(path).context("Failed to load configuration file")?,
            None => Config::default(),
        };

        let extension = match &cli.ext {
            Some(ext) => normalize_extension(ext).context("Invalid --ext value")?,
            None => config.extension.clone(),
        };

        let Some(dsn) = cli.dsn.clone().or_else(|| config.database.path.clone()) else {
            bail!("No database connection string: pass --dsn, set DATABASE_URL, or set database.path in the config file");
        };

        let timeout = cli.timeout.or(config.timeout_secs).map(Duration::from_secs);

        let directory = resolve_directory(cli, &config)?;
        log::debug!("[dirmig] migrations directory: {}", directory.display());

        Ok(Self {
            migrator: Migrator::new(cli.name.clone(), directory).with_extension(&extension)?,
            dsn,
            timeout,
        })
    }
}

/// Resolve the PATH argument with the resolver selected by `--module`
fn resolve_directory(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let resolver: Box<dyn PathResolver> = if cli.module {
        let locator = ModuleLocator::new(module_search_paths(cli, config));
        for root in locator.search_paths() {
            log::debug!("[dirmig] module search root: {}", root.display());
        }
        Box::new(locator)
    } else {
        Box::new(DirectPath)
    };

    resolver
        .resolve(&cli.path)
        .with_context(|| format!("Failed to resolve migrations path '{}'", cli.path))
}

/// Module search roots: flag/env first, then config, then the current directory
fn module_search_paths(cli: &Cli, config: &Config) -> Vec<PathBuf> {
    if !cli.module_paths.is_empty() {
        return cli.module_paths.clone();
    }
    let from_config = config.module_paths();
    if !from_config.is_empty() {
        return from_config;
    }
    vec![Path::new(".").to_path_buf()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["dirmig"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dirmig.yml");
        std::fs::write(
            &config_path,
            "extension: .ddl\ndatabase:\n  path: from_config.duckdb\ntimeout_secs: 5\n",
        )
        .unwrap();
        let config_arg = config_path.display().to_string();

        let cli = parse(&[
            "mig1",
            "migrations",
            "--config",
            &config_arg,
            "--ext",
            "sql",
            "--dsn",
            "from_flag.duckdb",
            "--timeout",
            "9",
        ]);
        let options = RunOptions::from_cli(&cli).unwrap();

        assert_eq!(options.migrator.extension(), ".sql");
        assert_eq!(options.dsn, "from_flag.duckdb");
        assert_eq!(options.timeout, Some(Duration::from_secs(9)));
        assert_eq!(options.migrator.directory(), Path::new("migrations"));
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dirmig.yml");
        std::fs::write(
            &config_path,
            "extension: ddl\ndatabase:\n  path: from_config.duckdb\ntimeout_secs: 5\n",
        )
        .unwrap();
        let config_arg = config_path.display().to_string();

        let mut cli = parse(&["mig1", "migrations", "--config", &config_arg]);
        // DATABASE_URL may be set in the environment running the tests.
        cli.dsn = None;
        let options = RunOptions::from_cli(&cli).unwrap();

        assert_eq!(options.migrator.extension(), ".ddl");
        assert_eq!(options.dsn, "from_config.duckdb");
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_dsn_is_an_error() {
        let mut cli = parse(&["mig1", "migrations"]);
        cli.dsn = None;
        assert!(RunOptions::from_cli(&cli).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = parse(&["mig1", "migrations", "--config", "/nonexistent/dirmig.yml"]);
        assert!(RunOptions::from_cli(&cli).is_err());
    }

    #[test]
    fn test_module_resolution() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("billing/migrations")).unwrap();
        let root = temp.path().display().to_string();

        let cli = parse(&[
            "mig1",
            "billing.migrations",
            "--module",
            "--module-path",
            &root,
            "--dsn",
            ":memory:",
        ]);
        let options = RunOptions::from_cli(&cli).unwrap();

        assert_eq!(
            options.migrator.directory(),
            temp.path().join("billing").join("migrations")
        );
    }

    #[test]
    fn test_unresolvable_module_is_an_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().display().to_string();

        let cli = parse(&[
            "mig1",
            "missing.migrations",
            "--module",
            "--module-path",
            &root,
            "--dsn",
            ":memory:",
        ]);
        let err = RunOptions::from_cli(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("[C005]"));
    }
}
