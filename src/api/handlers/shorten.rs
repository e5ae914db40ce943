//! Handler for the shortening endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorturl::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short id for a URL, creating the mapping if needed.
///
/// # Endpoint
///
/// `POST /api/shorturl`
///
/// # Request Body
///
/// Form (`url=https://www.freecodecamp.org`) or JSON:
///
/// ```json
/// { "url": "https://www.freecodecamp.org" }
/// ```
///
/// # Response
///
/// ```json
/// { "original_url": "https://freecodecamp.org", "short_url": 48213 }
/// ```
///
/// Repeated calls with an equivalent URL return the same `short_url`.
///
/// # Errors
///
/// - 400 `{"error": "invalid url"}` for missing, malformed or unresolvable URLs
/// - 500 `{"error": "Server error"}` on store failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: ShortenRequest,
) -> Result<Json<ShortenResponse>, AppError> {
    let url = payload.into_url()?;

    let mapping = state.mapping_service.find_or_create(&url).await?;

    Ok(Json(mapping.into()))
}
