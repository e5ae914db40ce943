//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                          - Landing page (`index.html` from the static dir)
//! - `GET  /public/*`                  - Static assets
//! - `GET  /health`                    - Health check
//! - `POST /api/shorturl`              - Create or fetch a short URL
//! - `GET  /api/shorturl/{short_url}`  - Redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin may call the API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory holding `index.html` and other public assets
pub fn app_router(state: AppState, static_dir: &Path) -> NormalizePath<Router> {
    let router = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/public", ServeDir::new(static_dir))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
