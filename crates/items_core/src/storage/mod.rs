mod types;

pub use types::{AttributeType, BillingMode, KeyAttribute, RemovalPolicy, TableDescriptor};
