//! Vitrine HTTP boundary: serves static assets and rendered pages
pub mod assets;
pub mod handlers;

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use vitrine_site::Site;

/// Shared, read-only request state
#[derive(Debug, Clone)]
pub struct AppState {
    pub site: Site,
    /// Directory static assets are served from
    pub static_root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(site: Site, static_root: impl Into<PathBuf>) -> Self {
        Self {
            site,
            static_root: Arc::new(static_root.into()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::serve)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: &str, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Vitrine listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
