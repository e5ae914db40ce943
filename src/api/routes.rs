//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public short URL routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorturl`              - Find or create the short id for a URL
/// - `GET  /shorturl/{short_url}`  - Redirect to the original URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorturl", post(shorten_handler))
        .route("/shorturl/{short_url}", get(redirect_handler))
}
