//! Stack configuration (Functional Core - pure data).

use serde::Serialize;

use crate::compute::FunctionDefaults;
use crate::routing::CorsTemplate;
use crate::storage::{BillingMode, RemovalPolicy};
use crate::topology::ConfigError;

/// Static inputs the topology is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackConfig {
    pub stack_name: String,
    pub table_name: String,
    pub partition_key: String,
    pub removal_policy: RemovalPolicy,
    pub billing_mode: BillingMode,
    pub api_name: String,
    pub stage_name: String,
    /// Collection segment, `items` in `/items/{id}`.
    pub collection_path: String,
    /// Path parameter name, `id` in `/items/{id}`.
    pub id_parameter: String,
    pub function_defaults: FunctionDefaults,
    pub cors: CorsTemplate,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: "ItemsStack".to_string(),
            table_name: "items".to_string(),
            partition_key: "itemId".to_string(),
            removal_policy: RemovalPolicy::Destroy,
            billing_mode: BillingMode::default(),
            api_name: "Items Service".to_string(),
            stage_name: "prod".to_string(),
            collection_path: "items".to_string(),
            id_parameter: "id".to_string(),
            function_defaults: FunctionDefaults::default(),
            cors: CorsTemplate::default(),
        }
    }
}

impl StackConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Sets the partition key attribute name.
    pub fn with_partition_key(mut self, key: &str) -> Self {
        self.partition_key = key.to_string();
        self
    }

    /// Sets the stack name.
    pub fn with_stack_name(mut self, name: &str) -> Self {
        self.stack_name = name.to_string();
        self
    }

    /// Sets the API display name.
    pub fn with_api_name(mut self, name: &str) -> Self {
        self.api_name = name.to_string();
        self
    }

    /// Sets the deployment stage name.
    pub fn with_stage_name(mut self, stage: &str) -> Self {
        self.stage_name = stage.to_string();
        self
    }

    /// Rejects literals the provider would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("stack_name", &self.stack_name),
            ("table_name", &self.table_name),
            ("partition_key", &self.partition_key),
            ("api_name", &self.api_name),
            ("stage_name", &self.stage_name),
            ("collection_path", &self.collection_path),
            ("id_parameter", &self.id_parameter),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }

        if self.table_name.len() < 3 || self.table_name.len() > 255 {
            return Err(ConfigError::InvalidTableName(self.table_name.clone()));
        }
        if !self
            .table_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ConfigError::InvalidTableName(self.table_name.clone()));
        }

        for (field, value) in [
            ("collection_path", &self.collection_path),
            ("id_parameter", &self.id_parameter),
        ] {
            let allowed = value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
            if !allowed || !value.chars().any(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidPathSegment {
                    field,
                    value: value.clone(),
                });
            }
        }

        if !self
            .stage_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        {
            return Err(ConfigError::InvalidStageName(self.stage_name.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(StackConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_partition_key_is_rejected() {
        let config = StackConfig::default().with_partition_key("  ");
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty {
                field: "partition_key"
            })
        );
    }

    #[test]
    fn test_short_table_name_is_rejected() {
        let config = StackConfig::default().with_table_name("ab");
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTableName("ab".to_string()))
        );
    }

    #[test]
    fn test_table_name_with_spaces_is_rejected() {
        let config = StackConfig::default().with_table_name("my items");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTableName(_))
        ));
    }

    #[test]
    fn test_slash_in_collection_path_is_rejected() {
        let config = StackConfig {
            collection_path: "items/v2".to_string(),
            ..StackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPathSegment {
                field: "collection_path",
                ..
            })
        ));
    }

    #[test]
    fn test_stage_with_dash_is_accepted() {
        let config = StackConfig::default().with_stage_name("pre-prod");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_stage_with_space_is_rejected() {
        let config = StackConfig::default().with_stage_name("pre prod");
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStageName("pre prod".to_string()))
        );
    }

    #[test]
    fn test_path_segment_needs_an_alphanumeric() {
        let config = StackConfig {
            collection_path: "-".to_string(),
            ..StackConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPathSegment {
                field: "collection_path",
                value: "-".to_string(),
            })
        );
    }

    #[test]
    fn test_path_segment_rejects_punctuation() {
        let config = StackConfig {
            id_parameter: "item id".to_string(),
            ..StackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPathSegment {
                field: "id_parameter",
                ..
            })
        ));
    }
}
