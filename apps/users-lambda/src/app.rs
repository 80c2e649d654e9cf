use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{Client, config::retry::RetryConfig};
use axum::Router;
use axum_helpers::trace_layer;
use core_config::dynamodb::DynamoDbConfig;
use domain_users::{DynamoUserRepository, InMemoryUserRepository, UserService, handlers};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};

/// Build the DynamoDB client once per process.
///
/// Region and endpoint come from config; credentials follow the default
/// provider chain (Lambda execution role, profile, env). SDK retries are
/// off: a failed store call is reported to the caller as is.
pub async fn dynamodb_client(config: &DynamoDbConfig) -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let mut builder =
        aws_sdk_dynamodb::config::Builder::from(&shared).retry_config(RetryConfig::disabled());
    if let Some(endpoint) = &config.endpoint_url {
        info!(endpoint = %endpoint, "Using custom DynamoDB endpoint");
        builder = builder.endpoint_url(endpoint);
    }

    Client::from_conf(builder.build())
}

/// Users router for the configured store, wrapped in the trace layer
pub async fn build_router(config: &Config) -> Router {
    let router = match config.store {
        StoreBackend::DynamoDb => {
            let client = dynamodb_client(&config.dynamodb).await;
            info!(
                table = %config.dynamodb.table_name,
                region = %config.dynamodb.region,
                "Users store: DynamoDB"
            );
            let repository = DynamoUserRepository::new(client, &config.dynamodb.table_name);
            handlers::router(UserService::new(repository))
        }
        StoreBackend::Memory => {
            warn!("Users store: in-memory, records are lost when the process exits");
            handlers::router(UserService::new(InMemoryUserRepository::new()))
        }
    };

    router.layer(trace_layer())
}
