#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Collection of utilities for the graphgen command line.

use std::path::{Path, PathBuf};

use config::{ConfigError, GenerationConfig};
use pipeline::{OrchestrationError, PipelineFailure};
use thiserror::Error;

/// Errors that end a graphgen invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The log subscriber could not be installed
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    /// Generation failed
    #[error(transparent)]
    Generation(#[from] OrchestrationError),
    /// `init` refused to overwrite an existing configuration
    #[error("{} already exists; pass --force to overwrite it", .0.display())]
    AlreadyInitialised(PathBuf),
}

/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Load the configuration from `path`, or discover `graphgen.toml` upwards
/// from the current directory.
pub fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    let config = match path {
        Some(path) => GenerationConfig::from_file(path)?,
        None => GenerationConfig::discover()?,
    };
    Ok(config)
}

/// Write the default configuration into `dir`.
///
/// # Returns
///
/// The path of the written file.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let target = dir.join(path::CONFIG_FILE_NAME);
    if target.exists() && !force {
        return Err(CliError::AlreadyInitialised(target));
    }
    GenerationConfig::default().save(&target)?;
    Ok(target)
}

/// Render an orchestration error as an indented tree, one failure per line.
pub fn render_report(error: &OrchestrationError) -> String {
    let mut out = format!("error: {}\n", error);
    if let OrchestrationError::Pipelines(reports) = error {
        for report in reports {
            out.push_str(&format!("  {}: {}\n", report.kind, report.failure));
            if let PipelineFailure::Write(aggregated) = &report.failure {
                for failure in aggregated.failures() {
                    out.push_str(&format!("    {}\n", failure));
                }
            }
        }
    }
    out
}
