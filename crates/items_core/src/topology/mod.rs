mod builder;
mod error;
mod validate;

pub use builder::{build_topology, Topology, API_LOGICAL_ID, TABLE_LOGICAL_ID};
pub use error::{ConfigError, Result, TopologyError};
pub use validate::validate;
