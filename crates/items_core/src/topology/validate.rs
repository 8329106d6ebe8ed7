//! Structural checks on a finished topology.

use std::collections::HashSet;

use super::builder::Topology;
use super::error::{Result, TopologyError};
use crate::routing::HttpMethod;

/// Rejects graphs a provisioning engine would refuse to apply.
///
/// - function logical ids are unique
/// - every route integration names a declared function
/// - every node with real methods carries an `OPTIONS` entry
/// - every grant names a declared function and the declared table
/// - every function holds exactly one grant
pub fn validate(topology: &Topology) -> Result<()> {
    let mut function_ids = HashSet::new();
    for function in &topology.functions {
        if !function_ids.insert(function.logical_id.as_str()) {
            return Err(TopologyError::DuplicateFunction {
                logical_id: function.logical_id.clone(),
            });
        }
    }

    for (path, node) in topology.api.nodes() {
        for (method, integration) in &node.methods {
            if let Some(function) = integration.function_id() {
                if !function_ids.contains(function) {
                    return Err(TopologyError::UnknownFunction {
                        path,
                        method: method.to_string(),
                        function: function.to_string(),
                    });
                }
            }
        }
        if node.has_real_methods() && !node.methods.contains_key(&HttpMethod::Options) {
            return Err(TopologyError::MissingPreflight { path });
        }
    }

    for grant in &topology.grants {
        if !function_ids.contains(grant.function_id.as_str()) {
            return Err(TopologyError::UnknownGrantFunction {
                function: grant.function_id.clone(),
            });
        }
        if grant.table_id != topology.table.logical_id {
            return Err(TopologyError::UnknownGrantTable {
                function: grant.function_id.clone(),
                table: grant.table_id.clone(),
            });
        }
    }

    for function in &topology.functions {
        match topology.grants_for(&function.logical_id).len() {
            0 => {
                return Err(TopologyError::MissingGrant {
                    function: function.logical_id.clone(),
                })
            }
            1 => {}
            _ => {
                return Err(TopologyError::DuplicateGrant {
                    function: function.logical_id.clone(),
                })
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackConfig;
    use crate::routing::Integration;
    use crate::topology::build_topology;

    fn valid() -> Topology {
        build_topology(&StackConfig::default())
    }

    #[test]
    fn test_default_topology_is_valid() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_route_to_unknown_function_is_rejected() {
        let mut topology = valid();
        topology.api.resources[0].add_method(HttpMethod::Get, Integration::function("ghost"));

        assert_eq!(
            validate(&topology),
            Err(TopologyError::UnknownFunction {
                path: "/items".to_string(),
                method: "GET".to_string(),
                function: "ghost".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_preflight_is_rejected() {
        let mut topology = valid();
        topology.api.resources[0].children[0]
            .methods
            .remove(&HttpMethod::Options);

        assert_eq!(
            validate(&topology),
            Err(TopologyError::MissingPreflight {
                path: "/items/{id}".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_function_is_rejected() {
        let mut topology = valid();
        let copy = topology.functions[0].clone();
        topology.functions.push(copy);

        assert_eq!(
            validate(&topology),
            Err(TopologyError::DuplicateFunction {
                logical_id: "getOneItemFunction".to_string()
            })
        );
    }

    #[test]
    fn test_grant_against_other_table_is_rejected() {
        let mut topology = valid();
        topology.grants[2].table_id = "otherTable".to_string();

        assert_eq!(
            validate(&topology),
            Err(TopologyError::UnknownGrantTable {
                function: "createItemFunction".to_string(),
                table: "otherTable".to_string(),
            })
        );
    }

    #[test]
    fn test_grant_for_unknown_function_is_rejected() {
        let mut topology = valid();
        topology.grants[0].function_id = "ghost".to_string();

        assert_eq!(
            validate(&topology),
            Err(TopologyError::UnknownGrantFunction {
                function: "ghost".to_string()
            })
        );
    }

    #[test]
    fn test_function_without_grant_is_rejected() {
        let mut topology = valid();
        topology.grants.remove(4);

        assert_eq!(
            validate(&topology),
            Err(TopologyError::MissingGrant {
                function: "deleteItemFunction".to_string()
            })
        );
    }

    #[test]
    fn test_second_grant_is_rejected() {
        let mut topology = valid();
        let extra = topology.grants[1].clone();
        topology.grants.push(extra);

        assert_eq!(
            validate(&topology),
            Err(TopologyError::DuplicateGrant {
                function: "getAllItemsFunction".to_string()
            })
        );
    }
}
