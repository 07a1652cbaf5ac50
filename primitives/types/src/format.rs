//! Output formats for generated files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File format of a generated artifact, which decides its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// TypeScript source (`.ts`)
    #[default]
    Ts,
    /// JavaScript source (`.js`)
    Js,
    /// GraphQL document (`.graphql`)
    Graphql,
}

impl ArtifactFormat {
    /// Get the string representation of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactFormat::Ts => "ts",
            ArtifactFormat::Js => "js",
            ArtifactFormat::Graphql => "graphql",
        }
    }

    /// File extension, without the leading dot.
    pub fn extension(&self) -> &'static str { self.as_str() }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}
