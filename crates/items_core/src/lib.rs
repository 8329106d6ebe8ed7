//! items_stack_core - declarative resource graph for the items REST API.
//!
//! The graph is one table, five CRUD functions, a read/write grant per
//! function and a two-level route tree (`/items`, `/items/{id}`) with a
//! static preflight entry on every node. Nothing here performs I/O: the
//! [`topology`] is built once, checked, and rendered by [`template`] for an
//! external provisioning engine.

pub mod compute;
pub mod config;
pub mod describe;
pub mod permissions;
pub mod routing;
pub mod storage;
pub mod template;
pub mod topology;

pub use config::StackConfig;
pub use describe::{format_topology, route_table, summarize, RouteEntry, TopologySummary};
pub use template::{synthesize, SynthError, Template};
pub use topology::{build_topology, validate, ConfigError, Topology, TopologyError};
