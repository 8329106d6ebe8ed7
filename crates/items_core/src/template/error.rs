//! Error types for template synthesis.

use thiserror::Error;

use crate::topology::TopologyError;

/// Result type alias for template module.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors that can occur while rendering a template.
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Refusing to synthesize an invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),

    #[error("Logical id '{0}' is produced by more than one resource")]
    DuplicateLogicalId(String),

    #[error("Template serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
