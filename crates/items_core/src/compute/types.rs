//! Function descriptor types (Functional Core - pure data).

use std::collections::BTreeMap;

use serde::Serialize;

use super::defaults::{BundlingOptions, FunctionDefaults, Runtime};
use super::environment::function_environment;
use crate::routing::HttpMethod;
use crate::storage::TableDescriptor;

/// One CRUD operation, each deployed as its own function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CrudOperation {
    GetOne,
    GetAll,
    Create,
    UpdateOne,
    DeleteOne,
}

impl CrudOperation {
    /// Every operation, in declaration order.
    pub const ALL: [CrudOperation; 5] = [
        CrudOperation::GetOne,
        CrudOperation::GetAll,
        CrudOperation::Create,
        CrudOperation::UpdateOne,
        CrudOperation::DeleteOne,
    ];

    /// Logical id of the function implementing this operation.
    pub fn function_id(self) -> &'static str {
        match self {
            CrudOperation::GetOne => "getOneItemFunction",
            CrudOperation::GetAll => "getAllItemsFunction",
            CrudOperation::Create => "createItemFunction",
            CrudOperation::UpdateOne => "updateItemFunction",
            CrudOperation::DeleteOne => "deleteItemFunction",
        }
    }

    /// Handler source file, relative to the project root.
    pub fn entry(self) -> &'static str {
        match self {
            CrudOperation::GetOne => "lambdas/get-one.ts",
            CrudOperation::GetAll => "lambdas/get-all.ts",
            CrudOperation::Create => "lambdas/create.ts",
            CrudOperation::UpdateOne => "lambdas/update-one.ts",
            CrudOperation::DeleteOne => "lambdas/delete-one.ts",
        }
    }

    /// HTTP verb the operation is routed under.
    pub fn method(self) -> HttpMethod {
        match self {
            CrudOperation::GetOne | CrudOperation::GetAll => HttpMethod::Get,
            CrudOperation::Create => HttpMethod::Post,
            CrudOperation::UpdateOne => HttpMethod::Put,
            CrudOperation::DeleteOne => HttpMethod::Delete,
        }
    }

    /// True when the operation addresses a single record (`/items/{id}`).
    pub fn targets_single_item(self) -> bool {
        matches!(
            self,
            CrudOperation::GetOne | CrudOperation::UpdateOne | CrudOperation::DeleteOne
        )
    }

    /// Human-readable label used in plan output.
    pub fn label(self) -> &'static str {
        match self {
            CrudOperation::GetOne => "read one record by key",
            CrudOperation::GetAll => "list all records",
            CrudOperation::Create => "create one record",
            CrudOperation::UpdateOne => "update one record by key",
            CrudOperation::DeleteOne => "delete one record by key",
        }
    }
}

/// A deployable function bound to one CRUD operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    pub logical_id: String,
    pub operation: CrudOperation,
    pub entry: String,
    pub runtime: Runtime,
    pub handler: String,
    pub memory_size_mb: u32,
    pub timeout_secs: u32,
    pub environment: BTreeMap<String, String>,
    pub bundling: BundlingOptions,
}

impl FunctionDescriptor {
    /// Declares the function for `operation` against `table`.
    ///
    /// The result depends only on its arguments, so the five functions can
    /// be built in any order.
    pub fn new(
        operation: CrudOperation,
        table: &TableDescriptor,
        defaults: &FunctionDefaults,
    ) -> Self {
        Self {
            logical_id: operation.function_id().to_string(),
            operation,
            entry: operation.entry().to_string(),
            runtime: defaults.runtime,
            handler: defaults.handler.clone(),
            memory_size_mb: defaults.memory_size_mb,
            timeout_secs: defaults.timeout_secs,
            environment: function_environment(table),
            bundling: defaults.bundling.clone(),
        }
    }
}
