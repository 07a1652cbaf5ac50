// SPDX-License-Identifier: CC0-1.0

//! graphgen umbrella crate.
//!
//! Re-exports the generation entry point and the types needed to call it.
//! Functional code lives in the workspace member crates under `adapters`,
//! `compiler` and `primitives`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

pub use adapters::{
    BackendGenerator, ClientGenerator, CommandToolchain, FsSchemaLoader, GeneratorFactory,
    MigrationEngine, SchemaLoader,
};
pub use config::{ConfigError, GenerationConfig};
pub use pipeline::{generate, GenerationFlags, OrchestrationError, Orchestrator, PipelineKind};
pub use types::{ArtifactFormat, DatabaseKind};

/// Miscellaneous metadata about the graphgen workspace.
pub mod graphgen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
