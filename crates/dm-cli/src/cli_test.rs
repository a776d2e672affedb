use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_positionals_and_defaults() {
    let cli = Cli::try_parse_from(["dirmig", "mig1", "db/migrations"]).unwrap();
    assert_eq!(cli.name, "mig1");
    assert_eq!(cli.path, "db/migrations");
    assert!(cli.ext.is_none());
    assert_eq!(cli.log_level, LogLevel::Info);
    assert!(!cli.module);
    assert!(cli.timeout.is_none());
}

#[test]
fn test_parse_options() {
    let cli = Cli::try_parse_from([
        "dirmig",
        "app",
        "billing.migrations",
        "--ext",
        ".ddl",
        "--dsn",
        "app.duckdb",
        "--log-level",
        "debug",
        "--module",
        "--module-path",
        "vendor",
        "--timeout",
        "30",
    ])
    .unwrap();
    assert_eq!(cli.ext.as_deref(), Some(".ddl"));
    assert_eq!(cli.dsn.as_deref(), Some("app.duckdb"));
    assert_eq!(cli.log_level, LogLevel::Debug);
    assert!(cli.module);
    assert_eq!(cli.module_paths, vec![PathBuf::from("vendor")]);
    assert_eq!(cli.timeout, Some(30));
}

#[test]
fn test_invalid_names_rejected_at_parse() {
    for name in ["ab", "toolongname", "bad-name"] {
        assert!(
            Cli::try_parse_from(["dirmig", name, "migrations"]).is_err(),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(Cli::try_parse_from(["dirmig", "mig1", "m", "--timeout", "0"]).is_err());
}

#[test]
fn test_log_level_conversion() {
    assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
