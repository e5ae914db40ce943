//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::dto::shorturl::parse_short_id;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{short_url}`
///
/// # Response Codes
///
/// - **302 Found**: `Location` is the stored original URL
/// - **400 Bad Request**: `short_url` is not a well-formed number
/// - **404 Not Found**: no mapping uses this id
/// - **500 Internal Server Error**: store failure
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let short_id = parse_short_id(&short_url)?;

    let mapping = state.mapping_service.lookup(short_id).await?;

    debug!(short_id, target = %mapping.original_url, "Redirecting");

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, mapping.original_url)],
    )
        .into_response())
}
