// ABOUTME: Content API for Folio sites
// ABOUTME: Serves site lists, section listings and files from a sites directory on disk

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod site;

pub use config::{ConfigError, ContentConfig};
pub use error::{ContentError, ContentResult};
pub use handlers::ContentState;
pub use listing::ListEntry;
pub use site::{Section, SiteConfig};

/// Build the content API router over `state`.
pub fn create_router(state: ContentState) -> Router {
    Router::new()
        .route("/", get(handlers::list_sites))
        .route("/{site}", get(handlers::get_site))
        .route("/{site}/{section}", get(handlers::get_section))
        .route("/{site}/{section}/{*path}", get(handlers::get_file))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the content API until Ctrl-C or SIGTERM.
pub async fn serve(config: ContentConfig) -> std::io::Result<()> {
    let app = create_router(ContentState::new(config.sites_root.clone()));
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        sites_root = %config.sites_root.display(),
        "Content server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Content server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server");
}
