//! CLI error types.

use items_stack_core::{ConfigError, SynthError, TopologyError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Invalid stack configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid topology: {0}")]
    Topology(TopologyError),

    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<TopologyError> for StackError {
    fn from(error: TopologyError) -> Self {
        match error {
            TopologyError::Config(config) => StackError::Config(config),
            other => StackError::Topology(other),
        }
    }
}
