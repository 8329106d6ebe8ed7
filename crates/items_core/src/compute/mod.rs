mod defaults;
mod environment;
mod types;

pub use defaults::{BundlingOptions, FunctionDefaults, Runtime};
pub use environment::{function_environment, PRIMARY_KEY_ENV, TABLE_NAME_ENV};
pub use types::{CrudOperation, FunctionDescriptor};
