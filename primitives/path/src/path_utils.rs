// SPDX-License-Identifier: CC0-1.0

//! Path utility functions for finding project roots and resolving output paths.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use types::ArtifactFormat;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "graphgen.toml";

/// Errors raised while locating the project root or placing artifacts.
#[derive(Debug, Error)]
pub enum PathError {
    /// No configuration file was found in `start` or any of its ancestors.
    #[error("Could not find {CONFIG_FILE_NAME} in {0} or any parent directory")]
    ProjectRootNotFound(PathBuf),
    /// The current working directory could not be determined.
    #[error("Failed to read current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
    /// An artifact name is absolute or climbs out of its output directory.
    #[error("Artifact name `{0}` must be a relative path inside its output directory")]
    UnsafeArtifactName(String),
}

/// Find the project root by looking for `graphgen.toml`
///
/// Walks up the directory tree from the current directory.
pub fn find_project_root() -> Result<PathBuf, PathError> {
    let current = std::env::current_dir()?;
    find_project_root_from(&current)
}

/// Find the project root by walking up from `start`
///
/// # Returns
///
/// Returns the first directory, starting at `start`, that contains a
/// `graphgen.toml` file.
pub fn find_project_root_from(start: &Path) -> Result<PathBuf, PathError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(PathError::ProjectRootNotFound(start.to_path_buf()));
        }
    }
}

/// Resolve a configured folder against the project root
///
/// Relative folders are joined onto `project_root`; absolute folders are kept as-is.
pub fn resolve_folder(project_root: &Path, folder: &str) -> PathBuf {
    let folder = Path::new(folder);
    if folder.is_absolute() {
        folder.to_path_buf()
    } else {
        project_root.join(folder)
    }
}

/// On-disk path of an artifact named `name` inside `dir`
///
/// The format's extension is appended unless the name already carries it.
/// Names may contain `/` to place the artifact in a nested directory, but
/// absolute names and `..` components are rejected so the result always
/// stays under `dir`.
pub fn artifact_path(
    dir: &Path,
    name: &str,
    format: ArtifactFormat,
) -> Result<PathBuf, PathError> {
    let contained = Path::new(name)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if !contained {
        return Err(PathError::UnsafeArtifactName(name.to_string()));
    }

    let suffix = format!(".{}", format.extension());
    if name.ends_with(&suffix) {
        Ok(dir.join(name))
    } else {
        Ok(dir.join(format!("{name}{suffix}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path_appends_extension() {
        let dir = Path::new("src/resolvers/custom");
        let path = |name| artifact_path(dir, name, ArtifactFormat::Ts).expect("contained name");
        assert_eq!(path("foo"), PathBuf::from("src/resolvers/custom/foo.ts"));
        assert_eq!(path("foo.ts"), PathBuf::from("src/resolvers/custom/foo.ts"));
        // A different extension in the name is not mistaken for the format's own.
        assert_eq!(path("foo.js"), PathBuf::from("src/resolvers/custom/foo.js.ts"));
        assert_eq!(path("notes/list"), PathBuf::from("src/resolvers/custom/notes/list.ts"));
    }

    #[test]
    fn test_artifact_path_rejects_escaping_names() {
        let dir = Path::new("src/resolvers/custom");
        for name in ["../../escaped", "notes/../../x", "/tmp/outside/abs"] {
            match artifact_path(dir, name, ArtifactFormat::Ts) {
                Err(PathError::UnsafeArtifactName(rejected)) => assert_eq!(rejected, name),
                other => panic!("Expected UnsafeArtifactName for {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_resolve_folder() {
        let root = Path::new("/project");
        assert_eq!(resolve_folder(root, "src/schema"), PathBuf::from("/project/src/schema"));
        assert_eq!(resolve_folder(root, "/abs/schema"), PathBuf::from("/abs/schema"));
    }

    #[test]
    fn test_find_project_root_from() {
        let temp = tempfile::tempdir().expect("Failed to create temporary directory");
        let root = temp.path().to_path_buf();
        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("Failed to write config file");
        let nested = root.join("client").join("src");
        std::fs::create_dir_all(&nested).expect("Failed to create nested directory");

        assert_eq!(find_project_root_from(&nested).expect("root should be found"), root);
        assert_eq!(find_project_root_from(&root).expect("root should be found"), root);
    }

    #[test]
    fn test_find_project_root_missing() {
        let temp = tempfile::tempdir().expect("Failed to create temporary directory");
        // A config *directory* does not count as a config file.
        std::fs::create_dir(temp.path().join(CONFIG_FILE_NAME)).expect("Failed to create dir");
        let result = find_project_root_from(temp.path());
        // An ancestor of the temp dir could in principle hold a config file, so
        // only assert the temp dir itself is not reported.
        if let Ok(found) = result {
            assert_ne!(found, temp.path());
        }
    }
}
