//! Access grants between functions and the table.

use serde::Serialize;

use crate::compute::FunctionDescriptor;
use crate::storage::TableDescriptor;

const READ_ACTIONS: &[&str] = &[
    "dynamodb:BatchGetItem",
    "dynamodb:GetRecords",
    "dynamodb:GetShardIterator",
    "dynamodb:Query",
    "dynamodb:GetItem",
    "dynamodb:Scan",
    "dynamodb:ConditionCheckItem",
    "dynamodb:DescribeTable",
];

const WRITE_ACTIONS: &[&str] = &[
    "dynamodb:BatchWriteItem",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:DescribeTable",
];

/// Level of table access granted to a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessLevel {
    Read,
    Write,
    ReadWrite,
}

impl AccessLevel {
    /// Table actions allowed at this level, without duplicates.
    pub fn actions(self) -> Vec<&'static str> {
        let mut actions: Vec<&'static str> = match self {
            AccessLevel::Read => READ_ACTIONS.to_vec(),
            AccessLevel::Write => WRITE_ACTIONS.to_vec(),
            AccessLevel::ReadWrite => READ_ACTIONS.iter().chain(WRITE_ACTIONS).copied().collect(),
        };
        let mut seen = std::collections::HashSet::new();
        actions.retain(|action| seen.insert(*action));
        actions
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::ReadWrite => "read/write",
        }
    }
}

/// A declared access relation `{function, table, level}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGrant {
    pub function_id: String,
    pub table_id: String,
    pub access: AccessLevel,
}

/// Grants `function` read/write access to `table`.
pub fn grant_read_write(function: &FunctionDescriptor, table: &TableDescriptor) -> PermissionGrant {
    PermissionGrant {
        function_id: function.logical_id.clone(),
        table_id: table.logical_id.clone(),
        access: AccessLevel::ReadWrite,
    }
}
