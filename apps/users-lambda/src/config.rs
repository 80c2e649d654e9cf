use core_config::{
    ConfigError, FromEnv, dynamodb::DynamoDbConfig, env_or_default, server::ServerConfig,
};
use strum::{Display, EnumString};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Which repository backs the users API
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    #[default]
    DynamoDb,
    /// Process-local map, for running without AWS
    Memory,
}

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub dynamodb: DynamoDbConfig,
    pub server: ServerConfig,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let dynamodb = DynamoDbConfig::from_env()?; // USERS_TABLE, AWS_REGION, DYNAMODB_ENDPOINT_URL
        let server = ServerConfig::from_env()?; // Only used outside Lambda
        let store = store_from_env()?;

        Ok(Self {
            environment,
            dynamodb,
            server,
            store,
        })
    }
}

fn store_from_env() -> Result<StoreBackend, ConfigError> {
    let value = env_or_default("USERS_STORE", &StoreBackend::default().to_string());
    value.parse().map_err(|_| ConfigError::ParseError {
        key: "USERS_STORE".to_string(),
        details: format!("expected 'dynamodb' or 'memory', got '{}'", value),
    })
}

/// Whether the process was started by the Lambda runtime
pub fn running_in_lambda() -> bool {
    std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some()
}
