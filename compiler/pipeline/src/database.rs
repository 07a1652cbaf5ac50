//! Database pipeline.
//!
//! A single linear step: build a migration engine for the configured dialect
//! and let it diff the merged schema against the migrations directory and
//! apply the delta. Applying twice may double-apply, so the orchestrator runs
//! this at most once per invocation.

use std::path::Path;

use adapters::GeneratorFactory;
use config::DatabaseConfig;

use crate::MigrationError;

/// Migrate the live database to match `schema`.
pub async fn run(
    schema: &str,
    database: &DatabaseConfig,
    migrations_dir: &Path,
    factory: &dyn GeneratorFactory,
) -> Result<(), MigrationError> {
    let kind = database.kind();
    let engine =
        factory.migration_engine(database).map_err(|source| MigrationError { kind, source })?;

    tracing::info!(%kind, dir = %migrations_dir.display(), "applying migrations");
    engine
        .diff_and_apply(schema, migrations_dir)
        .await
        .map_err(|source| MigrationError { kind, source })?;
    tracing::info!(%kind, "database migrated");
    Ok(())
}
