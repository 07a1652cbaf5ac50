use std::path::Path;

use adapters::AdapterError;
use common::FakeFactory;
use config::{DatabaseConfig, SqliteConnection};
use pipeline::database;
use types::DatabaseKind;

mod common;

fn sqlite() -> DatabaseConfig {
    DatabaseConfig::Sqlite(SqliteConnection { filename: "db.sqlite".into() })
}

#[tokio::test]
async fn test_database_applies_schema_once() {
    let factory = FakeFactory::new();

    database::run("type Note { id: ID! }", &sqlite(), Path::new("m"), &factory)
        .await
        .expect("migration applies");

    assert_eq!(
        factory.observed.migrations(),
        vec![("type Note { id: ID! }".to_string(), Path::new("m").to_path_buf())]
    );
}

#[tokio::test]
async fn test_engine_construction_failure_is_a_migration_error() {
    let factory = FakeFactory { migrator_unavailable: true, ..FakeFactory::new() };

    let err = database::run("type Note", &sqlite(), Path::new("m"), &factory)
        .await
        .expect_err("no migration engine");

    assert_eq!(err.kind, DatabaseKind::Sqlite);
    assert!(matches!(err.source, AdapterError::NotConfigured("migration")));
    assert_eq!(err.to_string(), "Migration on sqlite3 failed: No migration generator is configured");
    assert!(factory.observed.migrations().is_empty());
}
