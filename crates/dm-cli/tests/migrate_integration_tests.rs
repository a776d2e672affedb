//! Integration tests for the migration engine against a file-backed database
//!
//! Each step reconnects, the way separate `dirmig` invocations would.

use dm_core::MigrationSetName;
use dm_db::{Database, DuckDbBackend};
use dm_migrate::{bootstrap, BootstrapOutcome, MigrateError, Migrator};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let migrations = temp.path().join("migrations");
    std::fs::create_dir(&migrations).unwrap();
    let db_path = temp.path().join("app.duckdb");
    (temp, migrations, db_path)
}

fn write(dir: &Path, name: &str, sql: &str) {
    std::fs::write(dir.join(name), sql).unwrap();
}

fn migrator(dir: &Path) -> Migrator {
    Migrator::new(MigrationSetName::parse("mig1").unwrap(), dir)
}

async fn count(db: &DuckDbBackend, table: &str) -> i64 {
    db.query_optional_i64(&format!("SELECT COUNT(*) FROM {table}"))
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_bootstrap_once_across_connections() {
    let (_temp, _migrations, db_path) = setup();
    let set = MigrationSetName::parse("mig1").unwrap();

    {
        let db = DuckDbBackend::from_path(&db_path).unwrap();
        assert_eq!(
            bootstrap(&db, &set).await.unwrap(),
            BootstrapOutcome::NullMigration
        );
    }

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    assert_eq!(
        bootstrap(&db, &set).await.unwrap(),
        BootstrapOutcome::Existing { version: 1 }
    );
    assert_eq!(count(&db, "dirmigv_mig1").await, 1);
}

#[tokio::test]
async fn test_skip_already_applied_across_connections() {
    let (_temp, migrations, db_path) = setup();
    write(&migrations, "001_a.sql", "CREATE TABLE a (id INT);");
    write(&migrations, "002_b.sql", "CREATE TABLE b (id INT);");
    write(&migrations, "003_x.sql", "CREATE TABLE x (id INT);");

    {
        let db = DuckDbBackend::from_path(&db_path).unwrap();
        bootstrap(&db, migrator(&migrations).set()).await.unwrap();
        db.execute_with("INSERT INTO dirmig_mig1 (path) VALUES (?)", &["001_a.sql"])
            .await
            .unwrap();
    }

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    let report = migrator(&migrations).run(&db).await.unwrap();

    assert_eq!(report.skipped, vec!["001_a.sql"]);
    assert_eq!(report.applied, vec!["002_b.sql", "003_x.sql"]);
    assert!(!db.relation_exists("a").await.unwrap());
}

#[tokio::test]
async fn test_idempotent_across_connections() {
    let (_temp, migrations, db_path) = setup();
    write(&migrations, "001_a.sql", "CREATE TABLE a (id INT);");
    write(&migrations, "002_b.sql", "INSERT INTO a VALUES (1);");

    {
        let db = DuckDbBackend::from_path(&db_path).unwrap();
        migrator(&migrations).run(&db).await.unwrap();
    }

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    let second = migrator(&migrations).run(&db).await.unwrap();

    assert!(second.is_noop());
    assert_eq!(count(&db, "dirmig_mig1").await, 2);
    assert_eq!(count(&db, "a").await, 1);
}

#[tokio::test]
async fn test_rolled_back_batch_is_not_persisted() {
    let (_temp, migrations, db_path) = setup();
    write(&migrations, "001_a.sql", "CREATE TABLE a (id INT);");
    write(&migrations, "002_b.sql", "SELECT * FROM missing_table;");
    write(&migrations, "003_x.sql", "CREATE TABLE x (id INT);");

    {
        let db = DuckDbBackend::from_path(&db_path).unwrap();
        let err = migrator(&migrations).run(&db).await.unwrap_err();
        assert!(matches!(err, MigrateError::Execution { ref file, .. } if file == "002_b.sql"));
    }

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    assert_eq!(count(&db, "dirmig_mig1").await, 0);
    assert!(!db.relation_exists("a").await.unwrap());
    assert!(!db.relation_exists("x").await.unwrap());
}

#[tokio::test]
async fn test_sets_track_independently() {
    let (_temp, migrations, db_path) = setup();
    write(&migrations, "001_a.sql", "CREATE TABLE IF NOT EXISTS a (id INT);");
    let db = DuckDbBackend::from_path(&db_path).unwrap();

    migrator(&migrations).run(&db).await.unwrap();
    let other = Migrator::new(MigrationSetName::parse("other").unwrap(), &migrations)
        .run(&db)
        .await
        .unwrap();

    assert_eq!(other.applied, vec!["001_a.sql"]);
    assert_eq!(count(&db, "dirmig_other").await, 1);
}
