use crate::{env_optional, env_or_default, ConfigError, FromEnv};

pub const DEFAULT_TABLE_NAME: &str = "serverless-users";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where the users table lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamoDbConfig {
    pub table_name: String,
    pub region: String,
    /// Override for DynamoDB Local or another compatible endpoint
    pub endpoint_url: Option<String>,
}

impl FromEnv for DynamoDbConfig {
    /// Reads from environment variables:
    /// - USERS_TABLE: defaults to "serverless-users"
    /// - AWS_REGION: defaults to "us-east-1"
    /// - DYNAMODB_ENDPOINT_URL: optional
    fn from_env() -> Result<Self, ConfigError> {
        let table_name = env_or_default("USERS_TABLE", DEFAULT_TABLE_NAME);
        if table_name.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "USERS_TABLE".to_string(),
                details: "table name must not be empty".to_string(),
            });
        }

        Ok(Self {
            table_name,
            region: env_or_default("AWS_REGION", DEFAULT_REGION),
            endpoint_url: env_optional("DYNAMODB_ENDPOINT_URL"),
        })
    }
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}
