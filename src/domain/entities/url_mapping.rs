//! Mapping entity pairing an original URL with its numeric short id.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored mapping between a canonical URL and its short id.
///
/// Both `original_url` and `short_id` are unique across all mappings. A mapping
/// is never updated or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_id: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    pub fn new(id: i64, original_url: String, short_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original_url,
            short_id,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_id: i64,
}
