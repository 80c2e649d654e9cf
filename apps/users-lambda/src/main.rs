use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::{Result, WrapErr, eyre};
use tracing::info;
use users_lambda::{Config, build_router, running_in_lambda};

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    init_tracing(&config.environment);

    let router = build_router(&config).await;

    if running_in_lambda() {
        info!(store = %config.store, "Starting Lambda runtime");
        lambda_http::run(router)
            .await
            .map_err(|e| eyre!("Lambda runtime failed: {}", e))?;
    } else {
        info!(
            store = %config.store,
            address = %config.server.address(),
            "Starting local HTTP server"
        );
        create_app(router, &config.server)
            .await
            .wrap_err("HTTP server failed")?;
    }

    Ok(())
}
