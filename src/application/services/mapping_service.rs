//! Find-or-create and lookup of URL mappings.

use std::sync::Arc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::id_generator::IdGenerator;
use crate::utils::url_normalizer::{NormalizedUrl, UrlNormalizer};

/// Default number of re-runs after a create-time uniqueness violation.
pub const DEFAULT_DUPLICATE_KEY_RETRIES: usize = 3;

/// Service composing the normalizer, the id generator and the mapping store.
///
/// Holds no per-request state; concurrent calls only meet in the store.
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
    normalizer: UrlNormalizer,
    generator: IdGenerator,
    duplicate_key_retries: usize,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        normalizer: UrlNormalizer,
        generator: IdGenerator,
    ) -> Self {
        Self {
            repository,
            normalizer,
            generator,
            duplicate_key_retries: DEFAULT_DUPLICATE_KEY_RETRIES,
        }
    }

    /// Sets how many times a lost creation race is retried.
    pub fn with_duplicate_key_retries(mut self, retries: usize) -> Self {
        self.duplicate_key_retries = retries;
        self
    }

    /// Whether input hosts are resolved before a mapping is created.
    pub fn dns_validation(&self) -> bool {
        self.normalizer.dns_validation()
    }

    /// Validates and canonicalizes `raw_url` without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is malformed or, with DNS
    /// validation enabled, its host does not resolve.
    pub async fn normalize(&self, raw_url: &str) -> Result<NormalizedUrl, AppError> {
        Ok(self.normalizer.normalize(raw_url).await?)
    }

    /// Returns the mapping for `raw_url`, creating it if none exists.
    ///
    /// # Race Handling
    ///
    /// Two concurrent calls for the same new URL, or two calls drawing the same
    /// id, can both pass the existence checks. The store rejects the loser with
    /// [`AppError::DuplicateKey`]; the whole find-or-create step is then re-run,
    /// which finds the winner's record or draws a fresh id.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] for invalid input
    /// - [`AppError::Internal`] if the race is lost more often than the retry budget
    /// - Store and generator errors are propagated
    pub async fn find_or_create(&self, raw_url: &str) -> Result<UrlMapping, AppError> {
        let normalized = self.normalize(raw_url).await?;

        let strategy = ExponentialBackoff::from_millis(5)
            .max_delay(std::time::Duration::from_millis(100))
            .map(jitter)
            .take(self.duplicate_key_retries);

        let this = self;
        let url = &normalized;

        RetryIf::spawn(
            strategy,
            move || this.find_or_insert(url),
            |e: &AppError| {
                if e.is_duplicate_key() {
                    tracing::debug!(url = %url, error = %e, "Lost creation race, retrying");
                    true
                } else {
                    false
                }
            },
        )
        .await
        .map_err(|e| match e {
            AppError::DuplicateKey { field } => AppError::internal(format!(
                "Duplicate {field} persisted after {} retries",
                self.duplicate_key_retries
            )),
            other => other,
        })
    }

    /// Returns the mapping with exactly `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping uses `short_id`.
    pub async fn lookup(&self, short_id: i64) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_short_id(short_id)
            .await?
            .ok_or(AppError::NotFound { short_id })
    }

    /// One find-or-create attempt against the store.
    async fn find_or_insert(&self, url: &NormalizedUrl) -> Result<UrlMapping, AppError> {
        if let Some(existing) = self.repository.find_by_original_url(url.as_str()).await? {
            return Ok(existing);
        }

        let repository = Arc::clone(&self.repository);
        let short_id = self
            .generator
            .generate(move |candidate| {
                let repository = Arc::clone(&repository);
                async move { repository.exists_by_short_id(candidate).await }
            })
            .await?;

        let mapping = self
            .repository
            .create(NewUrlMapping {
                original_url: url.as_str().to_string(),
                short_id,
            })
            .await?;

        tracing::info!(
            short_id = mapping.short_id,
            original_url = %mapping.original_url,
            "Created short URL"
        );

        Ok(mapping)
    }
}
