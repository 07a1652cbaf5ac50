//! Collaborator traits
//!
//! This module defines the capabilities the pipeline consumes: loading the
//! merged schema, producing backend and client artifacts, and applying database
//! migrations. A [`GeneratorFactory`] builds the per-invocation handles.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{BackendOptions, ClientOptions, DatabaseConfig};
use types::{BackendBundle, ClientBundle, DatabaseKind};

use crate::{AdapterResult, LoadError};

/// Assembles the single merged schema text from the configured sources
#[async_trait::async_trait]
pub trait SchemaLoader: Send + Sync {
    /// Load every source and return their directive-preserving union
    async fn load_merged_schema(&self, sources: &[PathBuf]) -> Result<String, LoadError>;
}

/// Produces the schema and resolver artifacts for one merged schema
#[async_trait::async_trait]
pub trait BackendGenerator: Send + Sync {
    /// Generate the backend bundle tailored to `database`
    async fn create_backend(&self, database: DatabaseKind) -> AdapterResult<BackendBundle>;
}

/// Produces client documents for one merged schema
#[async_trait::async_trait]
pub trait ClientGenerator: Send + Sync {
    /// Generate fragments, queries, mutations and subscriptions
    async fn create_client(&self) -> AdapterResult<ClientBundle>;
}

/// Brings a live database in line with a schema
///
/// Applying is not idempotent: running twice against a partially applied
/// migration may apply it twice.
#[async_trait::async_trait]
pub trait MigrationEngine: Send + Sync {
    /// Diff `schema` against the migrations recorded in `migrations_dir` and apply the delta
    async fn diff_and_apply(&self, schema: &str, migrations_dir: &Path) -> AdapterResult<()>;
}

/// Builds generator handles for one invocation
///
/// Construction is cheap; the expensive work happens when a handle is called.
pub trait GeneratorFactory: Send + Sync {
    /// Backend generator bound to the merged schema
    fn backend_generator(
        &self,
        schema: Arc<str>,
        options: &BackendOptions,
    ) -> AdapterResult<Arc<dyn BackendGenerator>>;

    /// Client generator bound to the merged schema
    fn client_generator(
        &self,
        schema: Arc<str>,
        options: &ClientOptions,
    ) -> AdapterResult<Arc<dyn ClientGenerator>>;

    /// Migration engine connected with `database`
    fn migration_engine(
        &self,
        database: &DatabaseConfig,
    ) -> AdapterResult<Arc<dyn MigrationEngine>>;
}
