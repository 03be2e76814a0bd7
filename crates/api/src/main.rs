use std::sync::Arc;

use anyhow::Context;

use cowing_accounts::InMemoryUserService;
use cowing_api::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cowing_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "starting cowing-api");

    let users = Arc::new(InMemoryUserService::new(config.initial_krw_asset()));
    let app = cowing_api::app::build_app(&config, users);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
