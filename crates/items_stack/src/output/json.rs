//! JSON output formatting.

use items_stack_core::{route_table, summarize, RouteEntry, Topology, TopologySummary};
use serde::Serialize;

use crate::error::Result;

/// Machine-readable view of a declared stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeReport {
    pub stack: String,
    pub table: String,
    pub summary: TopologySummary,
    pub routes: Vec<RouteEntry>,
}

/// Builds the report for `topology`.
pub fn describe_report(topology: &Topology) -> DescribeReport {
    DescribeReport {
        stack: topology.stack_name.clone(),
        table: topology.table.table_name.clone(),
        summary: summarize(topology),
        routes: route_table(topology),
    }
}

/// Format a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use items_stack_core::StackConfig;

    #[test]
    fn test_report_serializes_summary_and_routes() {
        let topology = Topology::declare(&StackConfig::default()).expect("valid");

        let json = format_json(&describe_report(&topology)).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parses");

        assert_eq!(value["stack"], "ItemsStack");
        assert_eq!(value["summary"]["methods"], 8);
        assert_eq!(value["routes"].as_array().map(Vec::len), Some(8));
        assert_eq!(value["routes"][0]["function"], "getAllItemsFunction");
        assert!(value["routes"][2]["function"].is_null());
    }
}
