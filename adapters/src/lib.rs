#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Collaborator adapters for the generation pipeline.
//!
//! The pipeline never parses schemas, synthesises resolvers or computes
//! migrations itself. It talks to those capabilities through the traits in
//! [`generator`]. This crate also ships the stock implementations used by the
//! command line: a filesystem schema loader and generators backed by external
//! commands that exchange JSON over stdio.

use std::path::PathBuf;

use thiserror::Error;

pub mod command;
pub mod generator;
pub mod schema_loader;

pub use command::{
    CommandBackendGenerator, CommandClientGenerator, CommandMigrationEngine, CommandToolchain,
};
pub use generator::*;
pub use schema_loader::FsSchemaLoader;

/// Errors raised by generators and the migration engine
#[derive(Debug, Error)]
pub enum AdapterError {
    /// I/O error while talking to an external process
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The external command exited unsuccessfully
    #[error("`{program}` exited with {status}: {stderr}")]
    Command {
        /// Program that was run
        program: String,
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },
    /// A generator was requested but nothing is configured to provide it
    #[error("No {0} generator is configured")]
    NotConfigured(&'static str),
    /// Generic message-based error
    #[error("{0}")]
    Message(String),
}

/// Result alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Errors raised while assembling the merged schema
#[derive(Debug, Error)]
pub enum LoadError {
    /// A configured source does not exist
    #[error("Schema source not found: {0}")]
    SourceNotFound(PathBuf),
    /// A schema file could not be read
    #[error("Failed to read schema file {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Walking a source directory failed
    #[error("Failed to scan schema directory: {0}")]
    Walk(#[from] walkdir::Error),
    /// The sources contained no schema documents
    #[error("No GraphQL schema files found in {0:?}")]
    Empty(Vec<PathBuf>),
    /// The loader task was cancelled or panicked
    #[error("Schema loading task failed: {0}")]
    Task(String),
}
