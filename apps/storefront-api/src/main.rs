//! Storefront API - Beast Hustle catalog, orders and drop signups

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::{close_store, AppState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::build(config).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), api::root(&state));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let mongo_client = state.mongo_client;
    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        close_store(mongo_client),
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Storefront API shutdown complete");
    Ok(())
}
