//! Pipeline orchestration for the main entry point.
//!
//! The orchestrator validates configuration, resolves which pipelines run,
//! loads the merged schema exactly once, builds the generator handles and then
//! drives every requested pipeline concurrently. It returns only after all of
//! them have settled.

use std::sync::Arc;

use adapters::{GeneratorFactory, SchemaLoader};
use config::{Folder, GenerationConfig};
use tracing::Instrument;

use crate::flags::{GenerationFlags, PipelineKind, ResolvedFlags};
use crate::{
    backend, client, database, FanOutWriter, OrchestrationError, PipelineFailure, PipelineReport,
};

/// Drives the backend, client and database pipelines for one invocation.
#[derive(Clone)]
pub struct Orchestrator {
    loader: Arc<dyn SchemaLoader>,
    factory: Arc<dyn GeneratorFactory>,
}

impl Orchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(loader: Arc<dyn SchemaLoader>, factory: Arc<dyn GeneratorFactory>) -> Self {
        Self { loader, factory }
    }

    /// Run every pipeline selected by `flags`.
    ///
    /// # Returns
    ///
    /// `Ok(())` when all requested pipelines succeeded. Configuration and
    /// schema loading errors are reported before anything is generated;
    /// pipeline errors are collected from every pipeline that failed.
    pub async fn run(
        &self,
        flags: GenerationFlags,
        config: &GenerationConfig,
    ) -> Result<(), OrchestrationError> {
        let flags = flags.normalize();
        preflight(flags, config)?;

        let sources = config.schema_sources();
        let schema: Arc<str> = Arc::from(self.loader.load_merged_schema(&sources).await?);
        tracing::info!(
            sources = sources.len(),
            bytes = schema.len(),
            pipelines = ?flags.pipelines(),
            "merged schema loaded"
        );

        let writer = FanOutWriter::from_config(&config.pipeline);
        let (backend, client, database) = futures::join!(
            self.optional(flags, PipelineKind::Backend, self.backend(&schema, config, &writer)),
            self.optional(flags, PipelineKind::Client, self.client(&schema, config, &writer)),
            self.optional(flags, PipelineKind::Database, self.database(&schema, config))
        );

        let mut reports = Vec::new();
        for (kind, outcome) in [
            (PipelineKind::Backend, backend),
            (PipelineKind::Client, client),
            (PipelineKind::Database, database),
        ] {
            match outcome {
                Some(Ok(())) => tracing::info!(pipeline = %kind, "pipeline finished"),
                Some(Err(failure)) => {
                    tracing::error!(pipeline = %kind, error = %failure, "pipeline failed");
                    reports.push(PipelineReport { kind, failure });
                }
                None => {}
            }
        }

        if reports.is_empty() {
            Ok(())
        } else {
            Err(OrchestrationError::Pipelines(reports))
        }
    }

    /// Await `pipeline` inside its span when `kind` was requested.
    async fn optional<F>(
        &self,
        flags: ResolvedFlags,
        kind: PipelineKind,
        pipeline: F,
    ) -> Option<Result<(), PipelineFailure>>
    where
        F: std::future::Future<Output = Result<(), PipelineFailure>>,
    {
        if !flags.runs(kind) {
            return None;
        }
        Some(pipeline.instrument(tracing::info_span!("pipeline", kind = %kind)).await)
    }

    async fn backend(
        &self,
        schema: &Arc<str>,
        config: &GenerationConfig,
        writer: &FanOutWriter,
    ) -> Result<(), PipelineFailure> {
        let generator = self
            .factory
            .backend_generator(Arc::clone(schema), &config.backend)
            .map_err(PipelineFailure::Generator)?;
        backend::run(generator.as_ref(), config, writer).await
    }

    async fn client(
        &self,
        schema: &Arc<str>,
        config: &GenerationConfig,
        writer: &FanOutWriter,
    ) -> Result<(), PipelineFailure> {
        let generator = self
            .factory
            .client_generator(Arc::clone(schema), &config.client)
            .map_err(PipelineFailure::Generator)?;
        client::run(generator.as_ref(), config, writer).await
    }

    async fn database(
        &self,
        schema: &Arc<str>,
        config: &GenerationConfig,
    ) -> Result<(), PipelineFailure> {
        let database = config.require_database()?;
        let migrations_dir = config.folder_path(Folder::Migrations);
        database::run(schema, database, &migrations_dir, self.factory.as_ref()).await?;
        Ok(())
    }
}

/// Configuration checks that must pass before any I/O.
fn preflight(flags: ResolvedFlags, config: &GenerationConfig) -> Result<(), OrchestrationError> {
    config.validate()?;
    if flags.runs(PipelineKind::Database) {
        config.require_database()?;
    }
    Ok(())
}

/// Run the requested pipelines with the given collaborators.
///
/// This is the single operation exposed to command-line shells.
pub async fn generate(
    flags: GenerationFlags,
    config: &GenerationConfig,
    loader: Arc<dyn SchemaLoader>,
    factory: Arc<dyn GeneratorFactory>,
) -> Result<(), OrchestrationError> {
    Orchestrator::new(loader, factory).run(flags, config).await
}
