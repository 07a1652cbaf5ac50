//! Pipeline selection.
//!
//! Callers pass the raw `{backend, client, db}` switches. [`GenerationFlags::normalize`]
//! applies the default rule once, producing [`ResolvedFlags`], which is the only
//! form the orchestrator acts on.

use std::fmt;

/// The three generation pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    /// Schema and resolvers
    Backend,
    /// Client documents
    Client,
    /// Database migration
    Database,
}

impl PipelineKind {
    /// Get the string representation of the pipeline.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Backend => "backend",
            PipelineKind::Client => "client",
            PipelineKind::Database => "database",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// Pipelines requested by the caller, before defaults are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationFlags {
    /// Generate schema and resolvers
    pub backend: bool,
    /// Generate client documents
    pub client: bool,
    /// Migrate the database
    pub db: bool,
}

impl GenerationFlags {
    /// Apply the default rule: with neither `client` nor `db` requested, the
    /// backend runs. The database is never turned on implicitly.
    pub fn normalize(self) -> ResolvedFlags {
        let backend = self.backend || (!self.client && !self.db);
        ResolvedFlags { backend, client: self.client, db: self.db }
    }
}

/// Fully resolved pipeline selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFlags {
    backend: bool,
    client: bool,
    db: bool,
}

impl ResolvedFlags {
    /// Whether `kind` will run.
    pub fn runs(&self, kind: PipelineKind) -> bool {
        match kind {
            PipelineKind::Backend => self.backend,
            PipelineKind::Client => self.client,
            PipelineKind::Database => self.db,
        }
    }

    /// The pipelines that will run, in a fixed order.
    pub fn pipelines(&self) -> Vec<PipelineKind> {
        [PipelineKind::Backend, PipelineKind::Client, PipelineKind::Database]
            .into_iter()
            .filter(|kind| self.runs(*kind))
            .collect()
    }
}
