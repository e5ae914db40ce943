//! Helpers for classifying database errors.

use crate::error::MappingField;

/// Unique constraint on `url_mappings.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_mappings_original_url_key";

/// Unique constraint on `url_mappings.short_id`.
pub const SHORT_ID_CONSTRAINT: &str = "url_mappings_short_id_key";

/// Returns the mapping field whose unique constraint `e` violated, if any.
pub fn unique_violation_field(e: &sqlx::Error) -> Option<MappingField> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    constraint_field(db_err.constraint())
}

fn constraint_field(constraint: Option<&str>) -> Option<MappingField> {
    match constraint {
        Some(ORIGINAL_URL_CONSTRAINT) => Some(MappingField::OriginalUrl),
        Some(SHORT_ID_CONSTRAINT) => Some(MappingField::ShortId),
        other => {
            tracing::warn!(
                constraint = other.unwrap_or("<none>"),
                "Unique violation on unexpected constraint"
            );
            None
        }
    }
}
