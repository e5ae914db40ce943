//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. The HTTP layer
//! converts it into the small JSON error contract of the public API:
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `InvalidUrl`, `InvalidShortId` | 400 | `{"error": "invalid url"}` |
//! | `NotFound` | 404 | `{"error": "No short URL found"}` |
//! | everything else | 500 | `{"error": "Server error"}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::utils::url_normalizer::UrlNormalizationError;

/// Unique field of a [`crate::domain::entities::UrlMapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingField {
    OriginalUrl,
    ShortId,
}

impl fmt::Display for MappingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingField::OriginalUrl => f.write_str("original_url"),
            MappingField::ShortId => f.write_str("short_id"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed, unsupported, or unresolvable input URL.
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    /// Path segment that is not a well-formed short id.
    #[error("Invalid short id: {value}")]
    InvalidShortId { value: String },

    /// Uniqueness violation while creating a mapping.
    #[error("Duplicate key on {field}")]
    DuplicateKey { field: MappingField },

    #[error("No mapping for short id {short_id}")]
    NotFound { short_id: i64 },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Identifier space exhausted after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Returns true for the create-time uniqueness race that callers retry.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, AppError::DuplicateKey { .. })
    }

    /// HTTP status and public message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidUrl { .. } | AppError::InvalidShortId { .. } => {
                (StatusCode::BAD_REQUEST, "invalid url")
            }
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "No short URL found"),
            AppError::DuplicateKey { .. }
            | AppError::StoreUnavailable { .. }
            | AppError::IdSpaceExhausted { .. }
            | AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<UrlNormalizationError> for AppError {
    fn from(e: UrlNormalizationError) -> Self {
        AppError::invalid_url(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_url(e.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(field) = crate::utils::db_error::unique_violation_field(&e) {
            return AppError::DuplicateKey { field };
        }

        AppError::store_unavailable(e.to_string())
    }
}
