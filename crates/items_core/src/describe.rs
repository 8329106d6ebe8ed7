//! Pure functions for presenting a topology as a plan listing.

use serde::Serialize;

use crate::compute::{PRIMARY_KEY_ENV, TABLE_NAME_ENV};
use crate::routing::Integration;
use crate::topology::Topology;

/// Resource counts of a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopologySummary {
    pub tables: usize,
    pub functions: usize,
    pub grants: usize,
    pub route_nodes: usize,
    pub methods: usize,
}

/// One declared route in the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    /// Bound function, or `None` for the static preflight response.
    pub function: Option<String>,
}

/// Counts every declared descriptor.
pub fn summarize(topology: &Topology) -> TopologySummary {
    TopologySummary {
        // A topology holds exactly one table descriptor.
        tables: 1,
        functions: topology.functions.len(),
        grants: topology.grants.len(),
        route_nodes: topology.api.nodes().len(),
        methods: topology.api.method_count(),
    }
}

/// Lists every method entry as `(method, path, function)`.
pub fn route_table(topology: &Topology) -> Vec<RouteEntry> {
    topology
        .api
        .nodes()
        .into_iter()
        .flat_map(|(path, node)| {
            node.methods
                .iter()
                .map(move |(method, integration)| RouteEntry {
                    method: method.to_string(),
                    path: path.clone(),
                    function: integration.function_id().map(str::to_string),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Pure function: Format a topology as plan lines.
pub fn format_topology(topology: &Topology) -> Vec<String> {
    let table = &topology.table;
    let mut lines = vec![
        format!("+ Table: {}", table.table_name),
        format!(
            "  Partition key: {} ({})",
            table.key_name(),
            table.partition_key.attribute_type.code()
        ),
        format!("  Billing: {}", table.billing_mode.as_str()),
        format!("  On teardown: {}", table.removal_policy.deletion_policy()),
    ];

    for function in &topology.functions {
        lines.push(format!(
            "+ Function: {} ({})",
            function.logical_id,
            function.operation.label()
        ));
        lines.push(format!(
            "  Entry: {} [{}]",
            function.entry,
            function.runtime.identifier()
        ));
        for key in [PRIMARY_KEY_ENV, TABLE_NAME_ENV] {
            if let Some(value) = function.environment.get(key) {
                lines.push(format!("  Env {}={}", key, value));
            }
        }
        for grant in topology.grants_for(&function.logical_id) {
            lines.push(format!(
                "  Grant: {} on {}",
                grant.access.as_str(),
                table.table_name
            ));
        }
    }

    lines.push(format!(
        "+ API: {} (stage: {})",
        topology.api.name, topology.api.stage_name
    ));
    for (path, node) in topology.api.nodes() {
        lines.push(format!("  + {}", path));
        for (method, integration) in &node.methods {
            let target = match integration {
                Integration::Function { function_id } => format!("-> {}", function_id),
                Integration::Mock(mock) => format!("-> static {} (preflight)", mock.status_code),
            };
            lines.push(format!("    {:<7} {}", method.as_str(), target));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackConfig;
    use crate::topology::build_topology;

    #[test]
    fn test_summary_counts() {
        let topology = build_topology(&StackConfig::default());

        assert_eq!(
            summarize(&topology),
            TopologySummary {
                tables: 1,
                functions: 5,
                grants: 5,
                route_nodes: 2,
                methods: 8,
            }
        );
    }

    #[test]
    fn test_route_table_matches_http_surface() {
        let topology = build_topology(&StackConfig::default());

        let routes: Vec<(String, String, Option<String>)> = route_table(&topology)
            .into_iter()
            .map(|r| (r.method, r.path, r.function))
            .collect();

        let expected = vec![
            ("GET", "/items", Some("getAllItemsFunction")),
            ("POST", "/items", Some("createItemFunction")),
            ("OPTIONS", "/items", None),
            ("GET", "/items/{id}", Some("getOneItemFunction")),
            ("PUT", "/items/{id}", Some("updateItemFunction")),
            ("DELETE", "/items/{id}", Some("deleteItemFunction")),
            ("OPTIONS", "/items/{id}", None),
        ];
        let expected: Vec<(String, String, Option<String>)> = expected
            .into_iter()
            .map(|(m, p, f)| (m.to_string(), p.to_string(), f.map(str::to_string)))
            .collect();

        assert_eq!(routes, expected);
    }

    #[test]
    fn test_format_topology_lists_everything() {
        let topology = build_topology(&StackConfig::default());
        let lines = format_topology(&topology);

        assert_eq!(lines[0], "+ Table: items");
        assert_eq!(lines.iter().filter(|l| l.starts_with("+ Function:")).count(), 5);
        assert_eq!(lines.iter().filter(|l| l.contains("Grant: read/write")).count(), 5);
        assert!(lines.contains(&"  + /items/{id}".to_string()));
        assert!(lines.contains(&"    OPTIONS -> static 200 (preflight)".to_string()));
        assert!(lines.contains(&"  Env PRIMARY_KEY=itemId".to_string()));
    }
}
