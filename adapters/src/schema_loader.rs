//! Filesystem schema loader
//!
//! Sources are files or directories. Directories are walked recursively for
//! `.graphql` and `.gql` documents. All documents are read in sorted path order
//! and joined with a blank line, so the merged text is stable across runs and
//! keeps every directive exactly as written.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{LoadError, SchemaLoader};

const SCHEMA_EXTENSIONS: [&str; 2] = ["graphql", "gql"];

/// Loads and concatenates schema documents from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsSchemaLoader;

impl FsSchemaLoader {
    /// Create a new loader
    pub fn new() -> Self { Self }

    /// Collect and merge synchronously; run on a blocking thread.
    fn load_blocking(sources: &[PathBuf]) -> Result<String, LoadError> {
        let mut files = Vec::new();
        for source in sources {
            files.extend(collect_schema_files(source)?);
        }
        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(LoadError::Empty(sources.to_vec()));
        }

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            let text = std::fs::read_to_string(file)
                .map_err(|source| LoadError::Read { path: file.clone(), source })?;
            let text = text.trim();
            if !text.is_empty() {
                documents.push(text.to_string());
            }
        }

        if documents.is_empty() {
            return Err(LoadError::Empty(sources.to_vec()));
        }

        tracing::debug!(files = files.len(), "merged schema sources");
        let mut merged = documents.join("\n\n");
        merged.push('\n');
        Ok(merged)
    }
}

#[async_trait::async_trait]
impl SchemaLoader for FsSchemaLoader {
    async fn load_merged_schema(&self, sources: &[PathBuf]) -> Result<String, LoadError> {
        let sources = sources.to_vec();
        tokio::task::spawn_blocking(move || Self::load_blocking(&sources))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SCHEMA_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn collect_schema_files(source: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if source.is_file() {
        // An explicitly named file is taken whatever its extension.
        return Ok(vec![source.to_path_buf()]);
    }
    if !source.is_dir() {
        return Err(LoadError::SourceNotFound(source.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && is_schema_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[tokio::test]
    async fn test_merges_directory_in_sorted_order() {
        let temp = tempfile::tempdir().expect("Failed to create temporary directory");
        let model = temp.path().join("model");
        fs::create_dir_all(model.join("nested")).expect("Failed to create model dir");
        fs::write(model.join("b.graphql"), "type B {\n  id: ID!\n}\n").expect("write b");
        fs::write(model.join("a.graphql"), "\"\"\"@model\"\"\"\ntype A { id: ID! }")
            .expect("write a");
        fs::write(model.join("nested/c.gql"), "type C { id: ID! }").expect("write c");
        fs::write(model.join("README.md"), "not a schema").expect("write readme");

        let merged = FsSchemaLoader::new()
            .load_merged_schema(&[model])
            .await
            .expect("schema should load");

        assert_eq!(
            merged,
            "\"\"\"@model\"\"\"\ntype A { id: ID! }\n\ntype B {\n  id: ID!\n}\n\ntype C { id: ID! }\n"
        );
    }

    #[tokio::test]
    async fn test_explicit_files_and_duplicates() {
        let temp = tempfile::tempdir().expect("Failed to create temporary directory");
        let schema = temp.path().join("schema.txt");
        fs::write(&schema, "type Note { id: ID! }").expect("write schema");

        let merged = FsSchemaLoader::new()
            .load_merged_schema(&[schema.clone(), schema])
            .await
            .expect("schema should load");
        assert_eq!(merged, "type Note { id: ID! }\n");
    }

    #[tokio::test]
    async fn test_missing_source() {
        let temp = tempfile::tempdir().expect("Failed to create temporary directory");
        let missing = temp.path().join("missing");
        match FsSchemaLoader::new().load_merged_schema(&[missing.clone()]).await {
            Err(LoadError::SourceNotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected SourceNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_sources() {
        let temp = tempfile::tempdir().expect("Failed to create temporary directory");
        fs::write(temp.path().join("blank.graphql"), "   \n").expect("write blank");
        let result = FsSchemaLoader::new().load_merged_schema(&[temp.path().to_path_buf()]).await;
        assert!(matches!(result, Err(LoadError::Empty(_))));
    }
}
