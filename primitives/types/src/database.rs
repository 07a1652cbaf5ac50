//! Type-safe database dialect names.
//!
//! The backend generator tailors resolvers to a dialect and the migration
//! engine connects with a dialect-specific connection block. To add a dialect:
//! add a variant here, a metadata row, and a connection struct in the config crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Database dialects supported by the migration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DatabaseKind {
    /// PostgreSQL
    #[default]
    #[serde(rename = "pg")]
    Postgres,
    /// SQLite 3
    #[serde(rename = "sqlite3")]
    Sqlite,
}

/// Metadata for a dialect variant.
struct DatabaseMetadata {
    as_str: &'static str,
    default_port: Option<u16>,
}

const DATABASE_METADATA: [DatabaseMetadata; 2] = [
    DatabaseMetadata { as_str: "pg", default_port: Some(5432) },
    DatabaseMetadata { as_str: "sqlite3", default_port: None },
];

impl DatabaseKind {
    fn metadata(&self) -> &'static DatabaseMetadata {
        match self {
            DatabaseKind::Postgres => &DATABASE_METADATA[0],
            DatabaseKind::Sqlite => &DATABASE_METADATA[1],
        }
    }

    /// Get the string representation used in configuration files.
    pub fn as_str(&self) -> &'static str { self.metadata().as_str }

    /// Default TCP port, if the dialect is networked.
    pub fn default_port(&self) -> Option<u16> { self.metadata().default_port }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}
