//! Browser preview of curated and source files.
//!
//! - `GET /` renders the page: a file dropdown, shape, first rows and a collapsible column
//!   summary. `?file=<key>` picks a file; the first listed file is shown otherwise.
//! - `GET /api/files` and `GET /api/preview?file=<key>` return the same data as JSON.
//! - `GET /health` reports liveness.
//!
//! Files are loaded on the blocking pool, one at a time per request, and nothing is cached.

mod error;
mod handlers;
mod state;
mod templates;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::PreviewError;
pub use handlers::FileQuery;
pub use state::AppState;
pub use templates::PAGE_TITLE;

/// Address used when none is configured.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/files", get(handlers::files))
        .route("/api/preview", get(handlers::preview))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the dashboard until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        data_dir = %state.layout.data_dir.display(),
        "preview dashboard listening"
    );
    axum::serve(listener, router(state)).await
}
