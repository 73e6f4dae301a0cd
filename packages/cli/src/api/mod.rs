use axum::{routing::get, Router};
use std::sync::Arc;

use crate::config::Config;

pub mod files;
pub mod health;

/// Shared state for gateway endpoints
#[derive(Clone)]
pub struct GatewayState {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
}

impl GatewayState {
    /// Build the pooled upstream client from the configured timeouts.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .connect_timeout(config.upstream_connect_timeout)
            .user_agent(concat!("folio-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/file.json", get(files::get_file))
        .route("/{site}/{section}/file.json", get(files::get_section_file))
        .with_state(state)
}
