//! Generator result bundles.

use serde::{Deserialize, Serialize};

use crate::NamedArtifact;

/// Everything the backend generator produces for one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendBundle {
    /// The generated GraphQL schema text.
    pub schema: String,
    /// Resolver sources.
    pub resolvers: ResolverBundle,
}

/// Resolver sources produced by the backend generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverBundle {
    /// User-extensible resolvers, written once per name.
    #[serde(default)]
    pub custom: Vec<NamedArtifact>,
    /// Resolvers generated per model type.
    #[serde(default)]
    pub types: Vec<NamedArtifact>,
    /// The resolver index that wires everything together.
    pub index: String,
}

/// Client documents produced by the client generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBundle {
    /// Fragment documents.
    #[serde(default)]
    pub fragments: Vec<NamedArtifact>,
    /// Query documents.
    #[serde(default)]
    pub queries: Vec<NamedArtifact>,
    /// Mutation documents.
    #[serde(default)]
    pub mutations: Vec<NamedArtifact>,
    /// Subscription documents.
    #[serde(default)]
    pub subscriptions: Vec<NamedArtifact>,
}

impl ClientBundle {
    /// Total number of documents across all categories.
    pub fn len(&self) -> usize {
        self.fragments.len() + self.queries.len() + self.mutations.len() + self.subscriptions.len()
    }

    /// Whether the generator produced no documents at all.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
