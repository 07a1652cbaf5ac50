//! File persister
//!
//! Writes one artifact to one path, creating any missing ancestor directories
//! first. Directory creation is idempotent. The write itself is a complete
//! overwrite; with atomic writes enabled the content goes to a sibling temp
//! file that is renamed over the target.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;

use crate::PersistError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes single files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilePersister {
    atomic: bool,
}

impl FilePersister {
    /// A persister that overwrites targets in place.
    pub fn new() -> Self { Self { atomic: false } }

    /// A persister that writes a temp file and renames it over the target.
    pub fn atomic() -> Self { Self { atomic: true } }

    /// Whether writes go through a temp file.
    pub fn is_atomic(&self) -> bool { self.atomic }

    /// Write `content` to `path`, creating parent directories on demand.
    pub async fn persist(&self, path: &Path, content: &str) -> Result<(), PersistError> {
        let tag = |source| PersistError { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(tag)?;
        }

        if self.atomic {
            write_via_rename(path, content).await.map_err(tag)
        } else {
            fs::write(path, content).await.map_err(tag)
        }
    }
}

async fn write_via_rename(path: &Path, content: &str) -> std::io::Result<()> {
    let temp = temp_sibling(path);
    let written = match fs::write(&temp, content).await {
        Ok(()) => fs::rename(&temp, path).await,
        Err(e) => Err(e),
    };
    if written.is_err() {
        // Best effort; the original error is the one worth reporting.
        let _ = fs::remove_file(&temp).await;
    }
    written
}

/// A unique hidden file next to `path`, so the rename never crosses filesystems.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let unique = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), unique))
}
