use thiserror::Error;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised when stack configuration literals are unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("Invalid table name '{0}': use 3-255 characters from [A-Za-z0-9_.-]")]
    InvalidTableName(String),

    #[error("Invalid path segment for '{field}': '{value}' (use [A-Za-z0-9._-] with at least one letter or digit)")]
    InvalidPathSegment { field: &'static str, value: String },

    #[error("Invalid stage name '{0}': use only [A-Za-z0-9_-]")]
    InvalidStageName(String),
}

/// Inconsistencies in a resource graph that a provisioning engine would
/// reject before creating anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("{method} {path} is bound to undeclared function '{function}'")]
    UnknownFunction {
        path: String,
        method: String,
        function: String,
    },

    #[error("Grant references undeclared function '{function}'")]
    UnknownGrantFunction { function: String },

    #[error("Grant for '{function}' references undeclared table '{table}'")]
    UnknownGrantTable { function: String, table: String },

    #[error("Function '{function}' has no table grant")]
    MissingGrant { function: String },

    #[error("Function '{function}' has more than one table grant")]
    DuplicateGrant { function: String },

    #[error("Function '{logical_id}' is declared more than once")]
    DuplicateFunction { logical_id: String },

    #[error("Route {path} has methods but no OPTIONS preflight entry")]
    MissingPreflight { path: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
