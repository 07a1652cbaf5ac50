#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Core types shared by the generation pipeline.
//!
//! This crate defines the data that flows between the external generators and
//! the persistence layer: named artifacts, the groups they are written in, the
//! bundles produced by the backend and client generators, and the small enums
//! that select database dialects and output formats.

/// Named artifacts and the groups they are written in.
pub mod artifact;
/// Result bundles produced by the backend and client generators.
pub mod bundle;
/// Type-safe database dialect names.
pub mod database;
/// Output formats and their file extensions.
pub mod format;

pub use artifact::{ArtifactGroup, NamedArtifact};
pub use bundle::{BackendBundle, ClientBundle, ResolverBundle};
pub use database::DatabaseKind;
pub use format::ArtifactFormat;
