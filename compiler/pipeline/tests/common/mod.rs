//! In-process collaborators for pipeline tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use adapters::{
    AdapterError, AdapterResult, BackendGenerator, ClientGenerator, GeneratorFactory, LoadError,
    MigrationEngine, SchemaLoader,
};
use config::{
    BackendOptions, ClientOptions, DatabaseConfig, Folders, GenerationConfig, SqliteConnection,
};
use types::{BackendBundle, ClientBundle, DatabaseKind, NamedArtifact, ResolverBundle};

/// Config rooted at `root` with the short folder names used across the tests.
pub fn config_in(root: &Path) -> GenerationConfig {
    GenerationConfig {
        folders: Folders {
            model: "mo".to_string(),
            schema: "s".to_string(),
            resolvers: "r".to_string(),
            client: "c".to_string(),
            migrations: "m".to_string(),
        },
        project_root: root.to_path_buf(),
        ..GenerationConfig::default()
    }
}

/// Same as [`config_in`] with a SQLite database configured.
pub fn config_with_database(root: &Path) -> GenerationConfig {
    GenerationConfig {
        database: Some(DatabaseConfig::Sqlite(SqliteConnection {
            filename: PathBuf::from("db.sqlite"),
        })),
        ..config_in(root)
    }
}

pub fn backend_bundle() -> BackendBundle {
    BackendBundle {
        schema: "type Query".to_string(),
        resolvers: ResolverBundle {
            custom: vec![NamedArtifact::new("foo", "X")],
            types: vec![],
            index: "IDX".to_string(),
        },
    }
}

pub fn client_bundle() -> ClientBundle {
    ClientBundle {
        fragments: vec![NamedArtifact::new("NoteFields", "fragment NoteFields on Note { id }")],
        queries: vec![NamedArtifact::new("findNotes", "query findNotes { findNotes { id } }")],
        mutations: vec![NamedArtifact::new("createNote", "mutation createNote { id }")],
        subscriptions: vec![NamedArtifact::new("newNote", "subscription newNote { id }")],
    }
}

pub fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.as_ref().display(), e))
}

/// Schema loader returning fixed text and counting calls.
pub struct StaticLoader {
    schema: Option<String>,
    pub calls: AtomicUsize,
    pub sources: Mutex<Vec<PathBuf>>,
}

impl StaticLoader {
    pub fn new(schema: &str) -> Arc<Self> {
        Arc::new(Self {
            schema: Some(schema.to_string()),
            calls: AtomicUsize::new(0),
            sources: Mutex::new(vec![]),
        })
    }

    /// A loader that always fails with `SourceNotFound`.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self { schema: None, calls: AtomicUsize::new(0), sources: Mutex::new(vec![]) })
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

#[async_trait::async_trait]
impl SchemaLoader for StaticLoader {
    async fn load_merged_schema(&self, sources: &[PathBuf]) -> Result<String, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sources.lock().expect("sources mutex poisoned").extend_from_slice(sources);
        match &self.schema {
            Some(schema) => Ok(schema.clone()),
            None => Err(LoadError::SourceNotFound(sources.first().cloned().unwrap_or_default())),
        }
    }
}

/// Shared record of what the fake generators observed.
#[derive(Default)]
pub struct Observed {
    pub backend_calls: AtomicUsize,
    pub client_calls: AtomicUsize,
    pub handles_built: AtomicUsize,
    pub backend_schema: Mutex<Option<String>>,
    pub backend_database: Mutex<Option<DatabaseKind>>,
    pub migrations: Mutex<Vec<(String, PathBuf)>>,
}

impl Observed {
    pub fn backend_calls(&self) -> usize { self.backend_calls.load(Ordering::SeqCst) }
    pub fn client_calls(&self) -> usize { self.client_calls.load(Ordering::SeqCst) }
    pub fn handles_built(&self) -> usize { self.handles_built.load(Ordering::SeqCst) }
    pub fn migrations(&self) -> Vec<(String, PathBuf)> {
        self.migrations.lock().expect("migrations mutex poisoned").clone()
    }
}

/// Generator factory whose handles return canned bundles, or fail when the bundle is `None`.
pub struct FakeFactory {
    pub backend: Option<BackendBundle>,
    pub client: Option<ClientBundle>,
    pub migration_fails: bool,
    /// No migration engine can be built.
    pub migrator_unavailable: bool,
    pub observed: Arc<Observed>,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self {
            backend: Some(backend_bundle()),
            client: Some(client_bundle()),
            migration_fails: false,
            migrator_unavailable: false,
            observed: Arc::new(Observed::default()),
        }
    }
}

impl GeneratorFactory for FakeFactory {
    fn backend_generator(
        &self,
        schema: Arc<str>,
        _options: &BackendOptions,
    ) -> AdapterResult<Arc<dyn BackendGenerator>> {
        self.observed.handles_built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeBackend {
            schema,
            bundle: self.backend.clone(),
            observed: Arc::clone(&self.observed),
        }))
    }

    fn client_generator(
        &self,
        _schema: Arc<str>,
        _options: &ClientOptions,
    ) -> AdapterResult<Arc<dyn ClientGenerator>> {
        self.observed.handles_built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeClient {
            bundle: self.client.clone(),
            observed: Arc::clone(&self.observed),
        }))
    }

    fn migration_engine(
        &self,
        _database: &DatabaseConfig,
    ) -> AdapterResult<Arc<dyn MigrationEngine>> {
        if self.migrator_unavailable {
            return Err(AdapterError::NotConfigured("migration"));
        }
        self.observed.handles_built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeMigrator {
            fails: self.migration_fails,
            observed: Arc::clone(&self.observed),
        }))
    }
}

pub struct FakeBackend {
    pub schema: Arc<str>,
    pub bundle: Option<BackendBundle>,
    pub observed: Arc<Observed>,
}

#[async_trait::async_trait]
impl BackendGenerator for FakeBackend {
    async fn create_backend(&self, database: DatabaseKind) -> AdapterResult<BackendBundle> {
        self.observed.backend_calls.fetch_add(1, Ordering::SeqCst);
        *self.observed.backend_schema.lock().expect("schema mutex poisoned") =
            Some(self.schema.to_string());
        *self.observed.backend_database.lock().expect("database mutex poisoned") = Some(database);
        self.bundle
            .clone()
            .ok_or_else(|| AdapterError::Message("backend generator exploded".to_string()))
    }
}

pub struct FakeClient {
    pub bundle: Option<ClientBundle>,
    pub observed: Arc<Observed>,
}

#[async_trait::async_trait]
impl ClientGenerator for FakeClient {
    async fn create_client(&self) -> AdapterResult<ClientBundle> {
        self.observed.client_calls.fetch_add(1, Ordering::SeqCst);
        self.bundle
            .clone()
            .ok_or_else(|| AdapterError::Message("client generator exploded".to_string()))
    }
}

pub struct FakeMigrator {
    pub fails: bool,
    pub observed: Arc<Observed>,
}

#[async_trait::async_trait]
impl MigrationEngine for FakeMigrator {
    async fn diff_and_apply(&self, schema: &str, migrations_dir: &Path) -> AdapterResult<()> {
        if self.fails {
            return Err(AdapterError::Message("relation \"note\" already exists".to_string()));
        }
        self.observed
            .migrations
            .lock()
            .expect("migrations mutex poisoned")
            .push((schema.to_string(), migrations_dir.to_path_buf()));
        Ok(())
    }
}
