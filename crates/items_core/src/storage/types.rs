//! Table descriptor types (Functional Core - pure data).

use serde::Serialize;

/// The single keyed table backing the items API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub logical_id: String,
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub removal_policy: RemovalPolicy,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB scalar attribute types allowed in a key schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    /// Returns the one-letter code used in key schemas (`S`, `N`, `B`).
    pub fn code(self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
        }
    }
}

/// What happens to the table when the stack is torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    /// Delete the table and its data.
    #[default]
    Destroy,
    /// Keep the table as an orphan.
    Retain,
    /// Take a final backup, then delete.
    Snapshot,
}

impl RemovalPolicy {
    /// Value for the template's `DeletionPolicy` and `UpdateReplacePolicy`.
    pub fn deletion_policy(self) -> &'static str {
        match self {
            RemovalPolicy::Destroy => "Delete",
            RemovalPolicy::Retain => "Retain",
            RemovalPolicy::Snapshot => "Snapshot",
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BillingMode {
    PayPerRequest,
    Provisioned {
        read_capacity: u32,
        write_capacity: u32,
    },
}

impl Default for BillingMode {
    fn default() -> Self {
        BillingMode::Provisioned {
            read_capacity: 5,
            write_capacity: 5,
        }
    }
}

impl BillingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BillingMode::PayPerRequest => "PAY_PER_REQUEST",
            BillingMode::Provisioned { .. } => "PROVISIONED",
        }
    }
}

impl TableDescriptor {
    /// Declares a table with a single string partition key.
    pub fn new(
        logical_id: &str,
        table_name: &str,
        partition_key: &str,
        removal_policy: RemovalPolicy,
        billing_mode: BillingMode,
    ) -> Self {
        Self {
            logical_id: logical_id.to_string(),
            table_name: table_name.to_string(),
            partition_key: KeyAttribute {
                name: partition_key.to_string(),
                attribute_type: AttributeType::String,
            },
            removal_policy,
            billing_mode,
        }
    }

    /// Name of the partition key attribute.
    pub fn key_name(&self) -> &str {
        &self.partition_key.name
    }
}
