//! Artifact fan-out writer
//!
//! Persists every artifact of an [`ArtifactGroup`] concurrently. All writes
//! are awaited to completion: a failed artifact never cancels its siblings,
//! and every failure is reported. Artifacts with the same name race for the
//! same path and the last write wins.

use std::io;
use std::num::NonZeroUsize;

use config::WriteConfig;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use path::artifact_path;
use types::{ArtifactGroup, NamedArtifact};

use crate::{AggregatedError, ArtifactFailure, FilePersister, PersistError};

/// Concurrent writer for artifact groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutWriter {
    persister: FilePersister,
    max_concurrency: Option<NonZeroUsize>,
}

impl FanOutWriter {
    /// An unbounded writer using `persister`.
    pub fn new(persister: FilePersister) -> Self { Self { persister, max_concurrency: None } }

    /// Limit the number of in-flight writes per group; `None` is unbounded.
    pub fn with_max_concurrency(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    /// Build a writer from the `[pipeline]` section.
    pub fn from_config(config: &WriteConfig) -> Self {
        let persister =
            if config.atomic_writes { FilePersister::atomic() } else { FilePersister::new() };
        Self::new(persister)
            .with_max_concurrency(config.max_concurrent_writes.and_then(NonZeroUsize::new))
    }

    /// The write bound, if any.
    pub fn max_concurrency(&self) -> Option<NonZeroUsize> { self.max_concurrency }

    /// Write every artifact in `group` and report all failures.
    pub async fn write_all(&self, group: ArtifactGroup) -> Result<(), AggregatedError> {
        if group.is_empty() {
            return Ok(());
        }

        let writes = group.artifacts.iter().map(|artifact| self.write_one(&group, artifact));
        let outcomes: Vec<Result<(), ArtifactFailure>> = match self.max_concurrency {
            None => join_all(writes).await,
            Some(limit) => stream::iter(writes).buffer_unordered(limit.get()).collect().await,
        };

        let mut aggregated = AggregatedError::new();
        for outcome in outcomes {
            if let Err(failure) = outcome {
                aggregated.push(failure);
            }
        }

        tracing::debug!(
            category = %group.category,
            dir = %group.output_dir.display(),
            written = group.len() - aggregated.len(),
            failed = aggregated.len(),
            "wrote artifact group"
        );
        aggregated.into_result()
    }

    async fn write_one(
        &self,
        group: &ArtifactGroup,
        artifact: &NamedArtifact,
    ) -> Result<(), ArtifactFailure> {
        let written = match artifact_path(&group.output_dir, &artifact.name, group.format) {
            Ok(path) => self.persister.persist(&path, &artifact.content).await,
            Err(rejected) => Err(PersistError {
                path: group.output_dir.join(&artifact.name),
                source: io::Error::new(io::ErrorKind::InvalidInput, rejected),
            }),
        };
        written.map_err(|error| {
            tracing::warn!(
                category = %group.category,
                artifact = %artifact.name,
                %error,
                "write failed"
            );
            ArtifactFailure {
                category: group.category.clone(),
                artifact: artifact.name.clone(),
                error,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let writer = FanOutWriter::from_config(&WriteConfig::default());
        assert_eq!(writer, FanOutWriter::new(FilePersister::new()));
        assert_eq!(writer.max_concurrency(), None);

        let writer = FanOutWriter::from_config(&WriteConfig {
            max_concurrent_writes: Some(4),
            atomic_writes: true,
        });
        assert_eq!(writer.max_concurrency(), NonZeroUsize::new(4));
        assert!(writer.persister.is_atomic());
    }
}
