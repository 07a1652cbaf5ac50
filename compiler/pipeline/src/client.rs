//! Client pipeline.
//!
//! Writes each document category into its own directory under
//! `<client>/generated/`. The four categories run concurrently and a
//! category with no documents creates no directory.

use adapters::ClientGenerator;
use config::{Folder, GenerationConfig};
use types::{ArtifactGroup, ClientBundle};

use crate::{AggregatedError, FanOutWriter, PipelineFailure};

/// Directory under the client folder that holds every generated category.
pub const GENERATED_DIR: &str = "generated";

/// Map a client bundle onto fragment, query, mutation and subscription groups.
pub fn client_groups(bundle: ClientBundle, config: &GenerationConfig) -> [ArtifactGroup; 4] {
    let base = config.folder_path(Folder::Client).join(GENERATED_DIR);
    let format = config.client.format;
    let group = |category: &str, artifacts| {
        ArtifactGroup::new(category, base.join(category), format, artifacts)
    };

    [
        group("fragments", bundle.fragments),
        group("queries", bundle.queries),
        group("mutations", bundle.mutations),
        group("subscriptions", bundle.subscriptions),
    ]
}

/// Generate client documents and write them out.
pub async fn run(
    generator: &dyn ClientGenerator,
    config: &GenerationConfig,
    writer: &FanOutWriter,
) -> Result<(), PipelineFailure> {
    let bundle = generator.create_client().await.map_err(PipelineFailure::Generator)?;
    tracing::info!(documents = bundle.len(), "client documents generated");

    let [fragments, queries, mutations, subscriptions] = client_groups(bundle, config);
    let outcomes = futures::join!(
        writer.write_all(fragments),
        writer.write_all(queries),
        writer.write_all(mutations),
        writer.write_all(subscriptions)
    );

    let mut aggregated = AggregatedError::new();
    aggregated.absorb(outcomes.0);
    aggregated.absorb(outcomes.1);
    aggregated.absorb(outcomes.2);
    aggregated.absorb(outcomes.3);
    aggregated.into_result().map_err(PipelineFailure::from)
}
