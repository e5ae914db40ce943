//! Cross-origin resource sharing middleware.

use tower_http::cors::{Any, CorsLayer};

/// Allows browser clients on any origin to call the API.
///
/// The API is public and unauthenticated, so no credentials are involved.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
