#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for graphgen.
//!
//! Installs a `tracing-subscriber` formatter filtered by the configured level.
//! `RUST_LOG` takes precedence over the configured level when set.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level or `RUST_LOG` directive could not be parsed
    #[error("Invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// The rejected directive
        directive: String,
        /// Parser message
        reason: String,
    },
    /// The log file could not be opened
    #[error("Failed to open log file {path}: {source}")]
    File {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// A global subscriber is already installed
    #[error("Logging already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Install the global subscriber.
///
/// Output goes to stderr, or is appended without ANSI colours to `file` when given.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let directive = filter_directive(level, std::env::var("RUST_LOG").ok());
    let filter = build_filter(&directive)?;

    let installed = match file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::File { path: path.to_path_buf(), source })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialised(e.to_string()))?;

    tracing::debug!(%directive, "logging initialised");
    Ok(())
}

/// Pick the effective filter directive; a non-empty `RUST_LOG` wins.
fn filter_directive(level: &str, rust_log: Option<String>) -> String {
    match rust_log {
        Some(env) if !env.trim().is_empty() => env,
        _ => level.to_string(),
    }
}

fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}
