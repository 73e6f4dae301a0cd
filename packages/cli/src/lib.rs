use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod api;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

use api::GatewayState;
use config::Config;

/// Build the full gateway app: routes, CORS and request tracing.
pub fn build_app(config: Config) -> anyhow::Result<axum::Router> {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let state = GatewayState::new(config)?;

    Ok(api::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_gateway(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!(
        addr = %addr,
        upstream = %config.upstream_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Starting gateway"
    );

    let app = build_app(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(folio_content::shutdown_signal())
        .await?;

    Ok(())
}
