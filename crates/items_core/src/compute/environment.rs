use std::collections::BTreeMap;

use crate::storage::TableDescriptor;

/// Environment variable carrying the partition key attribute name.
pub const PRIMARY_KEY_ENV: &str = "PRIMARY_KEY";

/// Environment variable carrying the table name.
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// Returns the environment every function receives from the stack.
///
/// These two entries are the whole contract between the stack and a
/// function; the record logic inside the function reads nothing else.
pub fn function_environment(table: &TableDescriptor) -> BTreeMap<String, String> {
    BTreeMap::from([
        (PRIMARY_KEY_ENV.to_string(), table.key_name().to_string()),
        (TABLE_NAME_ENV.to_string(), table.table_name.clone()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BillingMode, RemovalPolicy};

    #[test]
    fn test_environment_has_exactly_key_and_table() {
        let table = TableDescriptor::new(
            "ItemsTable",
            "widgets",
            "widgetId",
            RemovalPolicy::Destroy,
            BillingMode::PayPerRequest,
        );

        let env = function_environment(&table);

        assert_eq!(env.len(), 2);
        assert_eq!(env.get(PRIMARY_KEY_ENV).map(String::as_str), Some("widgetId"));
        assert_eq!(env.get(TABLE_NAME_ENV).map(String::as_str), Some("widgets"));
    }
}
