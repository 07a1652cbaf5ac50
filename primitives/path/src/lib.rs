// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Path utility functions for finding project roots and resolving output paths.
//!
//! This module provides utilities for locating the project configuration file,
//! resolving configured folders against the project root, and deriving the
//! on-disk path of a generated artifact.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
