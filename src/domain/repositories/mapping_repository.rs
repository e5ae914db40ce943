//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Store of [`UrlMapping`] records.
///
/// Lookups are split into one typed method per unique field. Uniqueness of both
/// fields must be enforced by the backing store itself, so that two concurrent
/// `create` calls for the same URL or id cannot both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Returns true if a mapping already uses `short_id`.
    async fn exists_by_short_id(&self, short_id: i64) -> Result<bool, AppError>;

    /// Returns true if a mapping already stores `original_url`.
    async fn exists_by_original_url(&self, original_url: &str) -> Result<bool, AppError>;

    /// Finds a mapping by its canonical original URL (exact match).
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short id (exact match).
    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, AppError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if either field is already taken.
    /// Returns [`AppError::StoreUnavailable`] on storage failures.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Number of stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Cheap round trip used by health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
