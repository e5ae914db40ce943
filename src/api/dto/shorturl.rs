//! DTOs for the short URL endpoints.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;
use crate::error::AppError;

/// Request to shorten a URL.
///
/// Accepted both as `application/x-www-form-urlencoded` (`url=...`) and as JSON
/// (`{"url": "..."}`).
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. Missing or blank values are rejected as invalid.
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
}

impl ShortenRequest {
    /// Returns the non-blank URL or an invalid-url error.
    pub fn into_url(self) -> Result<String, AppError> {
        self.validate()?;

        self.url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::invalid_url("url is missing"))
    }
}

impl<S> FromRequest<S> for ShortenRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_url(e.body_text()))?;
            Ok(payload)
        } else {
            let Form(payload) = Form::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_url(e.body_text()))?;
            Ok(payload)
        }
    }
}

/// Successful shortening result.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: i64,
}

impl From<UrlMapping> for ShortenResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.original_url,
            short_url: mapping.short_id,
        }
    }
}

/// Parses the `short_url` path segment.
///
/// Only plain non-negative decimal integers are well-formed.
pub fn parse_short_id(raw: &str) -> Result<i64, AppError> {
    let invalid = || AppError::InvalidShortId {
        value: raw.to_string(),
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    raw.parse::<i64>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_short_id() {
        assert_eq!(parse_short_id("12345").unwrap(), 12345);
        assert_eq!(parse_short_id("007").unwrap(), 7);
    }

    #[test]
    fn test_parse_short_id_rejects_malformed() {
        for raw in ["", "abc", "12a", "-5", "+5", "1.5", "1e4", " 12", "99999999999999999999"] {
            assert!(
                matches!(parse_short_id(raw), Err(AppError::InvalidShortId { .. })),
                "'{raw}' should be rejected"
            );
        }
    }

    #[test]
    fn test_into_url_missing() {
        let request = ShortenRequest { url: None };
        assert!(matches!(
            request.into_url().unwrap_err(),
            AppError::InvalidUrl { .. }
        ));
    }

    #[test]
    fn test_into_url_blank() {
        let request = ShortenRequest {
            url: Some("   ".to_string()),
        };
        assert!(request.into_url().is_err());
    }

    #[test]
    fn test_into_url_too_long() {
        let request = ShortenRequest {
            url: Some(format!("https://example.com/{}", "a".repeat(2100))),
        };
        assert!(request.into_url().is_err());
    }

    #[test]
    fn test_response_from_mapping() {
        let mapping = UrlMapping::new(1, "https://example.com".to_string(), 12345, Utc::now());
        let response = ShortenResponse::from(mapping);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "original_url": "https://example.com", "short_url": 12345 })
        );
    }
}
