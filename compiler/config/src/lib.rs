#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! graphgen Configuration
//!
//! This crate provides configuration management for graphgen.
//! It handles loading, validating and saving the per-project `graphgen.toml`, which specifies:
//! - Output folders for the generated schema, resolvers, client documents and migrations
//! - Backend and client generation options
//! - The database dialect and its connection settings
//! - External generator commands, write behaviour and logging
//!
//! Every table rejects unknown keys, so a typo fails at load time rather than
//! being passed through to a generator untyped.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::{ArtifactFormat, DatabaseKind};

/// Errors that can occur when loading, validating or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the project root
    #[error(transparent)]
    ProjectRoot(#[from] path::PathError),
    /// A required output folder is missing or empty
    #[error("Missing required folder `folders.{0}`")]
    MissingFolder(Folder),
    /// The database pipeline was requested without a `[database]` section
    #[error("Database generation requested but no [database] section is configured")]
    MissingDatabase,
    /// A section selected a format it cannot produce
    #[error("Unsupported format `{format}` for [{section}]")]
    InvalidFormat {
        /// Section that carries the format
        section: &'static str,
        /// The rejected format
        format: ArtifactFormat,
    },
    /// Any other out-of-range value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Convenient result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Schema sources (files or directories). Empty means `folders.model`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<String>,
    /// Named output directories
    #[serde(default)]
    pub folders: Folders,
    /// Options passed to the backend generator
    #[serde(default)]
    pub backend: BackendOptions,
    /// Options passed to the client generator
    #[serde(default)]
    pub client: ClientOptions,
    /// Database dialect and connection, required only for migrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
    /// External generator commands
    #[serde(default)]
    pub generators: GeneratorsConfig,
    /// File write behaviour
    #[serde(default)]
    pub pipeline: WriteConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory the configuration was loaded from; folders resolve against it
    #[serde(skip)]
    pub project_root: PathBuf,
}

/// The named output folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
    /// Input model (schema sources) folder
    Model,
    /// Generated schema folder
    Schema,
    /// Resolver folder
    Resolvers,
    /// Client document folder
    Client,
    /// Database migrations folder
    Migrations,
}

impl Folder {
    /// All folders, in validation order.
    pub const ALL: [Folder; 5] =
        [Folder::Model, Folder::Schema, Folder::Resolvers, Folder::Client, Folder::Migrations];

    /// Key of this folder in the `[folders]` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::Model => "model",
            Folder::Schema => "schema",
            Folder::Resolvers => "resolvers",
            Folder::Client => "client",
            Folder::Migrations => "migrations",
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// Output directories, relative to the project root unless absolute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Folders {
    /// Where the input model lives
    #[serde(default)]
    pub model: String,
    /// Where the generated schema is written
    #[serde(default)]
    pub schema: String,
    /// Where resolvers are written
    #[serde(default)]
    pub resolvers: String,
    /// Where client documents are written
    #[serde(default)]
    pub client: String,
    /// Where database migrations are kept
    #[serde(default)]
    pub migrations: String,
}

impl Folders {
    /// Get the configured value for `folder`.
    pub fn get(&self, folder: Folder) -> &str {
        match folder {
            Folder::Model => &self.model,
            Folder::Schema => &self.schema,
            Folder::Resolvers => &self.resolvers,
            Folder::Client => &self.client,
            Folder::Migrations => &self.migrations,
        }
    }
}

/// Backend generator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendOptions {
    /// Resolver source format (`ts` or `js`)
    #[serde(default)]
    pub format: ArtifactFormat,
    /// Skip type resolver generation, keeping only custom resolvers and the index
    #[serde(default)]
    pub disable_gen: bool,
    /// Which operations get resolvers
    #[serde(default)]
    pub crud: CrudOptions,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self { format: ArtifactFormat::Ts, disable_gen: false, crud: CrudOptions::default() }
    }
}

/// Per-operation generation toggles. Everything is enabled by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CrudOptions {
    /// Generate `create` mutations
    pub create: bool,
    /// Generate `update` mutations
    pub update: bool,
    /// Generate `delete` mutations
    pub delete: bool,
    /// Generate single-object `find` queries
    pub find: bool,
    /// Generate `findAll` queries
    pub find_all: bool,
    /// Generate create/update/delete subscriptions
    pub subscriptions: bool,
}

impl Default for CrudOptions {
    fn default() -> Self {
        Self {
            create: true,
            update: true,
            delete: true,
            find: true,
            find_all: true,
            subscriptions: true,
        }
    }
}

/// Client generator options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientOptions {
    /// Client document format (`ts`, `js` or `graphql`)
    #[serde(default)]
    pub format: ArtifactFormat,
}

/// Database dialect plus its typed connection block
///
/// ```toml
/// [database]
/// kind = "pg"
///
/// [database.connection]
/// host = "localhost"
/// database = "notes"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "connection", deny_unknown_fields)]
pub enum DatabaseConfig {
    /// PostgreSQL connection
    #[serde(rename = "pg")]
    Postgres(PostgresConnection),
    /// SQLite connection
    #[serde(rename = "sqlite3")]
    Sqlite(SqliteConnection),
}

impl DatabaseConfig {
    /// The dialect of this configuration.
    pub fn kind(&self) -> DatabaseKind {
        match self {
            DatabaseConfig::Postgres(_) => DatabaseKind::Postgres,
            DatabaseConfig::Sqlite(_) => DatabaseKind::Sqlite,
        }
    }

    /// A copy with unset connection values filled from the dialect defaults.
    pub fn with_defaults(&self) -> DatabaseConfig {
        match self {
            DatabaseConfig::Postgres(connection) => DatabaseConfig::Postgres(PostgresConnection {
                port: connection.port.or(self.kind().default_port()),
                ..connection.clone()
            }),
            DatabaseConfig::Sqlite(connection) => DatabaseConfig::Sqlite(connection.clone()),
        }
    }
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostgresConnection {
    /// Server host name
    pub host: String,
    /// Server port; [`DatabaseConfig::with_defaults`] fills in the dialect default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Login role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Login password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Database name
    pub database: String,
}

/// SQLite connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqliteConnection {
    /// Database file
    pub filename: PathBuf,
}

/// External generator commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorsConfig {
    /// Backend generator command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<CommandSpec>,
    /// Client generator command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<CommandSpec>,
    /// Migration engine command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrator: Option<CommandSpec>,
}

/// A program plus its leading arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,
    /// Arguments placed before the generated ones
    #[serde(default)]
    pub args: Vec<String>,
}

/// File write behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteConfig {
    /// Upper bound on concurrent writes per artifact group; unbounded when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_writes: Option<usize>,
    /// Write a temp file and rename it over the target instead of overwriting in place
    #[serde(default)]
    pub atomic_writes: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: default_log_level(), file: None } }
}

impl GenerationConfig {
    /// Load configuration from a TOML file at `path`
    ///
    /// The file's directory becomes the project root.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let project_root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::parse(&contents, project_root)
    }

    /// Parse configuration text, resolving folders against `project_root`
    pub fn parse(contents: &str, project_root: impl Into<PathBuf>) -> Result<Self> {
        let mut config: GenerationConfig = toml::from_str(contents)?;
        config.project_root = project_root.into();
        Ok(config)
    }

    /// Locate `graphgen.toml` from the current directory upwards and load it
    pub fn discover() -> Result<Self> {
        let root = path::find_project_root()?;
        Self::from_file(root.join(path::CONFIG_FILE_NAME))
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Pre-flight validation; performs no I/O
    ///
    /// Every folder must be non-empty, the backend must emit source code, and
    /// the write bound must be positive.
    pub fn validate(&self) -> Result<()> {
        for folder in Folder::ALL {
            if self.folders.get(folder).trim().is_empty() {
                return Err(ConfigError::MissingFolder(folder));
            }
        }
        if self.backend.format == ArtifactFormat::Graphql {
            return Err(ConfigError::InvalidFormat {
                section: "backend",
                format: self.backend.format,
            });
        }
        if self.pipeline.max_concurrent_writes == Some(0) {
            return Err(ConfigError::Invalid(
                "pipeline.max_concurrent_writes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The database section, or `MissingDatabase` when absent
    pub fn require_database(&self) -> Result<&DatabaseConfig> {
        self.database.as_ref().ok_or(ConfigError::MissingDatabase)
    }

    /// Absolute path of a configured folder
    pub fn folder_path(&self, folder: Folder) -> PathBuf {
        path::resolve_folder(&self.project_root, self.folders.get(folder))
    }

    /// Resolved schema sources; falls back to the model folder
    pub fn schema_sources(&self) -> Vec<PathBuf> {
        if self.schema.is_empty() {
            return vec![self.folder_path(Folder::Model)];
        }
        self.schema.iter().map(|source| path::resolve_folder(&self.project_root, source)).collect()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            schema: Vec::new(),
            folders: Folders {
                model: "model".to_string(),
                schema: "src/schema".to_string(),
                resolvers: "src/resolvers".to_string(),
                client: "client/src/graphql".to_string(),
                migrations: "migrations".to_string(),
            },
            backend: BackendOptions::default(),
            client: ClientOptions::default(),
            database: None,
            generators: GeneratorsConfig::default(),
            pipeline: WriteConfig::default(),
            logging: LoggingConfig::default(),
            project_root: PathBuf::from("."),
        }
    }
}
