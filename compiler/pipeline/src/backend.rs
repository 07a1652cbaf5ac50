//! Backend pipeline.
//!
//! Asks the backend generator for its bundle once, then writes four
//! independent branches concurrently:
//!
//! | branch              | location                          |
//! |---------------------|-----------------------------------|
//! | generated schema    | `<schema>/generated.graphql`      |
//! | custom resolvers    | `<resolvers>/custom/<name>.<ext>` |
//! | type resolvers      | `<resolvers>/generated/<name>.<ext>` |
//! | resolver index      | `<resolvers>/index.<ext>`         |
//!
//! Failures from all branches are merged into one [`AggregatedError`].

use adapters::BackendGenerator;
use config::{DatabaseConfig, Folder, GenerationConfig};
use types::{ArtifactFormat, ArtifactGroup, BackendBundle, NamedArtifact};

use crate::{AggregatedError, FanOutWriter, PipelineFailure};

/// File stem of the generated schema.
pub const SCHEMA_FILE_STEM: &str = "generated";
/// File stem of the resolver index.
pub const RESOLVER_INDEX_STEM: &str = "index";

/// Map a backend bundle onto its four output groups:
/// schema, custom resolvers, type resolvers and the index.
pub fn backend_groups(bundle: BackendBundle, config: &GenerationConfig) -> [ArtifactGroup; 4] {
    let schema_dir = config.folder_path(Folder::Schema);
    let resolvers_dir = config.folder_path(Folder::Resolvers);
    let format = config.backend.format;

    [
        ArtifactGroup::single(
            "schema",
            schema_dir,
            ArtifactFormat::Graphql,
            NamedArtifact::new(SCHEMA_FILE_STEM, bundle.schema),
        ),
        ArtifactGroup::new(
            "custom resolvers",
            resolvers_dir.join("custom"),
            format,
            bundle.resolvers.custom,
        ),
        ArtifactGroup::new(
            "generated resolvers",
            resolvers_dir.join("generated"),
            format,
            bundle.resolvers.types,
        ),
        ArtifactGroup::single(
            "resolver index",
            resolvers_dir,
            format,
            NamedArtifact::new(RESOLVER_INDEX_STEM, bundle.resolvers.index),
        ),
    ]
}

/// Generate the backend and write it out.
///
/// The generator is already bound to the merged schema; it is tailored to the
/// configured database dialect, or the default dialect when none is configured.
pub async fn run(
    generator: &dyn BackendGenerator,
    config: &GenerationConfig,
    writer: &FanOutWriter,
) -> Result<(), PipelineFailure> {
    let database = config.database.as_ref().map(DatabaseConfig::kind).unwrap_or_default();
    let bundle = generator.create_backend(database).await.map_err(PipelineFailure::Generator)?;
    tracing::info!(
        custom = bundle.resolvers.custom.len(),
        generated = bundle.resolvers.types.len(),
        "backend generated"
    );

    let [schema, custom, generated, index] = backend_groups(bundle, config);
    let (schema, custom, generated, index) = futures::join!(
        writer.write_all(schema),
        writer.write_all(custom),
        writer.write_all(generated),
        writer.write_all(index)
    );

    let mut aggregated = AggregatedError::new();
    for outcome in [schema, custom, generated, index] {
        aggregated.absorb(outcome);
    }
    aggregated.into_result().map_err(PipelineFailure::from)
}
