use axum::Router;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        "Proxying employee requests to {}",
        config.upstream.base_url
    );

    let state = AppState::new(config)?;
    let app = build_app(&state)?;

    info!("Starting employee API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async {
            info!("Shutting down: no connections to close");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Employee API shutdown complete");
    Ok(())
}

/// Compose API routes, docs, health and readiness into the served router
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        state.config.cors_allowed_origin.as_deref(),
    )?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check pinging the upstream
    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}
