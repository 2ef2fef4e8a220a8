//! Error types for the choreography core.
//!
//! Only caller contract violations are errors. Risky or invalid choreography is
//! reported as data (verdict findings, planner notes), never through this enum.

use serde::{Deserialize, Serialize};

/// Errors raised synchronously by the choreography core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChoreographyError {
    /// A scene, primitive list or catalog failed basic shape checks.
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// The planner was handed a scene that has not been analyzed.
    #[error("Scene '{scene_id}' has no metadata; run the analyzer before planning")]
    MissingMetadata { scene_id: String },

    /// Registry catalog JSON could not be decoded.
    #[error("Registry parse error: {0}")]
    RegistryParse(String),

    /// Scene JSON could not be decoded.
    #[error("Scene parse error: {0}")]
    SceneParse(String),
}

impl ChoreographyError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ChoreographyError::MalformedInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ChoreographyError> = std::result::Result<T, E>;
