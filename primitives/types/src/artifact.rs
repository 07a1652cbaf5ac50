//! Named artifacts and artifact groups.
//!
//! A [`NamedArtifact`] is the smallest unit the pipeline persists. Every
//! generator output is normalised to a sequence of these before it reaches the
//! file persister. An [`ArtifactGroup`] pairs such a sequence with the
//! directory and extension it is written under.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ArtifactFormat;

/// A single generated file: a logical name plus its full text content.
///
/// Generators emit either `{ name, output }` (resolvers) or
/// `{ name, implementation }` (client documents); both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArtifact {
    /// Logical artifact name, used as the file stem.
    pub name: String,
    /// Complete file content.
    #[serde(alias = "output", alias = "implementation")]
    pub content: String,
}

impl NamedArtifact {
    /// Creates a new artifact.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self { name: name.into(), content: content.into() }
    }
}

/// A category of artifacts written into one output directory.
///
/// This is the unit of work for a single fan-out. Artifacts keep their
/// generator order but are written without any ordering guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactGroup {
    /// Human-readable category, e.g. `"custom resolvers"` or `"queries"`.
    pub category: String,
    /// Directory the artifacts are written into.
    pub output_dir: PathBuf,
    /// Format that decides the file extension.
    pub format: ArtifactFormat,
    /// Artifacts in generator order.
    pub artifacts: Vec<NamedArtifact>,
}

impl ArtifactGroup {
    /// Creates a group from its parts.
    pub fn new(
        category: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        format: ArtifactFormat,
        artifacts: Vec<NamedArtifact>,
    ) -> Self {
        Self { category: category.into(), output_dir: output_dir.into(), format, artifacts }
    }

    /// Creates a group holding exactly one artifact.
    pub fn single(
        category: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        format: ArtifactFormat,
        artifact: NamedArtifact,
    ) -> Self {
        Self::new(category, output_dir, format, vec![artifact])
    }

    /// Number of artifacts in the group.
    pub fn len(&self) -> usize { self.artifacts.len() }

    /// Whether the group has nothing to write.
    pub fn is_empty(&self) -> bool { self.artifacts.is_empty() }
}
