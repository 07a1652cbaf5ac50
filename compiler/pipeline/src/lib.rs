#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns a merged GraphQL schema into a project's
//! generated schema, resolvers, client documents and database migrations.
//!
//! ## Module Organization
//!
//! - `persister` - Single-file writes with lazy parent directory creation
//! - `fanout` - Concurrent, fail-slow writes of an artifact group
//! - `backend` - Schema and resolver generation
//! - `client` - Fragment, query, mutation and subscription documents
//! - `database` - Migration planning and application
//! - `flags` - Pipeline selection and the default-backend rule
//! - `orchestration` - Main entry point (`generate`)
//!
//! Failures are collected, never short-circuited: a fan-out reports every
//! failed artifact and a failed pipeline does not cancel its siblings.

use std::fmt;
use std::path::PathBuf;

use adapters::{AdapterError, LoadError};
use config::ConfigError;
use thiserror::Error;
use types::DatabaseKind;

pub mod backend;
pub mod client;
pub mod database;
pub mod fanout;
pub mod flags;
pub mod orchestration;
pub mod persister;

pub use fanout::FanOutWriter;
pub use flags::{GenerationFlags, PipelineKind, ResolvedFlags};
pub use orchestration::{generate, Orchestrator};
pub use persister::FilePersister;

/// A single file or directory write failure, tagged with the offending path.
#[derive(Debug, Error)]
#[error("Failed to write {}: {source}", .path.display())]
pub struct PersistError {
    /// File being written
    pub path: PathBuf,
    /// Underlying I/O error
    pub source: std::io::Error,
}

/// A failed artifact within a fan-out.
#[derive(Debug, Error)]
#[error("{category} `{artifact}`: {error}")]
pub struct ArtifactFailure {
    /// Category of the group the artifact belonged to
    pub category: String,
    /// Artifact name
    pub artifact: String,
    /// The write failure, carrying the path
    #[source]
    pub error: PersistError,
}

/// Every artifact failure from one or more fan-outs.
#[derive(Debug, Default, Error)]
pub struct AggregatedError {
    failures: Vec<ArtifactFailure>,
}

impl AggregatedError {
    /// An empty aggregate.
    pub fn new() -> Self { Self::default() }

    /// Record one failure.
    pub fn push(&mut self, failure: ArtifactFailure) { self.failures.push(failure); }

    /// Absorb every failure of `other`.
    pub fn merge(&mut self, other: AggregatedError) { self.failures.extend(other.failures); }

    /// Absorb the failures of a fan-out result, if any.
    pub fn absorb(&mut self, outcome: std::result::Result<(), AggregatedError>) {
        if let Err(other) = outcome {
            self.merge(other);
        }
    }

    /// The recorded failures in completion order.
    pub fn failures(&self) -> &[ArtifactFailure] { &self.failures }

    /// Number of failures.
    pub fn len(&self) -> usize { self.failures.len() }

    /// Whether nothing failed.
    pub fn is_empty(&self) -> bool { self.failures.is_empty() }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), AggregatedError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for AggregatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failures.len() {
            1 => write!(f, "1 artifact failed to write"),
            n => write!(f, "{} artifacts failed to write", n),
        }
    }
}

/// The database pipeline failed; the engine's error is kept verbatim.
#[derive(Debug, Error)]
#[error("Migration on {kind} failed: {source}")]
pub struct MigrationError {
    /// Database dialect
    pub kind: DatabaseKind,
    /// Error reported by the migration engine
    pub source: AdapterError,
}

/// Why a single pipeline failed.
#[derive(Debug, Error)]
pub enum PipelineFailure {
    /// The generator could not be built or produced no output
    #[error("Generator failed: {0}")]
    Generator(#[source] AdapterError),
    /// One or more artifacts failed to write
    #[error(transparent)]
    Write(#[from] AggregatedError),
    /// The migration engine failed
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The pipeline's configuration section is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A failed pipeline, labelled by name.
#[derive(Debug, Error)]
#[error("{kind} pipeline failed: {failure}")]
pub struct PipelineReport {
    /// Which pipeline failed
    pub kind: PipelineKind,
    /// The failure
    #[source]
    pub failure: PipelineFailure,
}

/// Top-level error returned by [`generate`].
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Configuration was incomplete; nothing was read or written
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The merged schema could not be assembled; no pipeline ran
    #[error("Failed to load schema: {0}")]
    Load(#[from] LoadError),
    /// One or more pipelines failed; the others ran to completion
    #[error("{} of the requested pipelines failed", .0.len())]
    Pipelines(Vec<PipelineReport>),
}

/// Convenient result type for the top-level entry point.
pub type Result<T> = std::result::Result<T, OrchestrationError>;
