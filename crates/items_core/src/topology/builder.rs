//! Assembles the resource graph in dependency order.

use serde::Serialize;

use super::error::Result;
use super::validate::validate;
use crate::compute::{CrudOperation, FunctionDescriptor};
use crate::config::StackConfig;
use crate::permissions::{grant_read_write, PermissionGrant};
use crate::routing::{add_cors_options, Integration, RestApiDescriptor, RouteNode};
use crate::storage::TableDescriptor;

/// Logical id of the table.
pub const TABLE_LOGICAL_ID: &str = "items";

/// Logical id of the REST API.
pub const API_LOGICAL_ID: &str = "itemsApi";

/// The complete, immutable resource graph handed to the provisioning engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub stack_name: String,
    pub table: TableDescriptor,
    pub functions: Vec<FunctionDescriptor>,
    pub grants: Vec<PermissionGrant>,
    pub api: RestApiDescriptor,
}

impl Topology {
    /// Checks the config, builds the graph and validates it.
    pub fn declare(config: &StackConfig) -> Result<Self> {
        config.validate()?;
        let topology = build_topology(config);
        validate(&topology)?;
        Ok(topology)
    }

    /// The function bound to `operation`.
    pub fn function(&self, operation: CrudOperation) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.operation == operation)
    }

    /// The function with logical id `logical_id`.
    pub fn function_by_id(&self, logical_id: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.logical_id == logical_id)
    }

    /// Grants held by the function with logical id `function_id`.
    pub fn grants_for(&self, function_id: &str) -> Vec<&PermissionGrant> {
        self.grants
            .iter()
            .filter(|g| g.function_id == function_id)
            .collect()
    }
}

/// Builds the topology from static configuration.
///
/// Storage first, then compute, grants, routes and finally the preflight
/// entries on every route node. Construction is a single linear pass with
/// no failure modes; see [`Topology::declare`] for the checked variant.
pub fn build_topology(config: &StackConfig) -> Topology {
    let table = TableDescriptor::new(
        TABLE_LOGICAL_ID,
        &config.table_name,
        &config.partition_key,
        config.removal_policy,
        config.billing_mode,
    );

    let functions: Vec<FunctionDescriptor> = CrudOperation::ALL
        .iter()
        .map(|op| FunctionDescriptor::new(*op, &table, &config.function_defaults))
        .collect();

    let grants: Vec<PermissionGrant> = functions
        .iter()
        .map(|function| grant_read_write(function, &table))
        .collect();

    let mut collection = RouteNode::new(&config.collection_path);
    let id_segment = format!("{{{}}}", config.id_parameter);
    for function in &functions {
        let integration = Integration::function(&function.logical_id);
        let method = function.operation.method();
        if function.operation.targets_single_item() {
            collection
                .add_resource(&id_segment)
                .add_method(method, integration);
        } else {
            collection.add_method(method, integration);
        }
    }

    add_cors_options(&mut collection, &config.cors);
    add_cors_options(collection.add_resource(&id_segment), &config.cors);

    let api = RestApiDescriptor {
        logical_id: API_LOGICAL_ID.to_string(),
        name: config.api_name.clone(),
        stage_name: config.stage_name.clone(),
        resources: vec![collection],
    };

    Topology {
        stack_name: config.stack_name.clone(),
        table,
        functions,
        grants,
        api,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HttpMethod;

    #[test]
    fn test_routes_bind_expected_functions() {
        let topology = build_topology(&StackConfig::default());

        let items = topology.api.node("/items").expect("collection node");
        let item = topology.api.node("/items/{id}").expect("item node");

        let bound = |node: &RouteNode, method: HttpMethod| {
            node.methods
                .get(&method)
                .and_then(Integration::function_id)
                .map(str::to_string)
        };

        assert_eq!(bound(items, HttpMethod::Get).as_deref(), Some("getAllItemsFunction"));
        assert_eq!(bound(items, HttpMethod::Post).as_deref(), Some("createItemFunction"));
        assert_eq!(bound(item, HttpMethod::Get).as_deref(), Some("getOneItemFunction"));
        assert_eq!(bound(item, HttpMethod::Put).as_deref(), Some("updateItemFunction"));
        assert_eq!(bound(item, HttpMethod::Delete).as_deref(), Some("deleteItemFunction"));
        assert!(items.methods.contains_key(&HttpMethod::Options));
        assert!(item.methods.contains_key(&HttpMethod::Options));
    }

    #[test]
    fn test_custom_collection_and_parameter() {
        let config = StackConfig {
            collection_path: "widgets".to_string(),
            id_parameter: "widgetId".to_string(),
            ..StackConfig::default()
        };

        let topology = build_topology(&config);

        assert!(topology.api.node("/widgets/{widgetId}").is_some());
        assert!(topology.api.node("/items").is_none());
    }

    #[test]
    fn test_declare_rejects_invalid_config() {
        let config = StackConfig::default().with_table_name("");
        assert!(Topology::declare(&config).is_err());
    }

    #[test]
    fn test_lookup_helpers() {
        let topology = Topology::declare(&StackConfig::default()).expect("valid topology");

        let update = topology
            .function(CrudOperation::UpdateOne)
            .expect("update function");
        assert_eq!(update.logical_id, "updateItemFunction");
        assert_eq!(
            topology.function_by_id("deleteItemFunction").map(|f| f.operation),
            Some(CrudOperation::DeleteOne)
        );
        assert_eq!(topology.grants_for("createItemFunction").len(), 1);
    }
}
