#![allow(dead_code)]

use async_trait::async_trait;
use shorturl::application::services::MappingService;
use shorturl::domain::entities::{NewUrlMapping, UrlMapping};
use shorturl::domain::repositories::MappingRepository;
use shorturl::error::AppError;
use shorturl::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository};
use shorturl::state::AppState;
use shorturl::utils::id_generator::IdGenerator;
use shorturl::utils::url_normalizer::{QueryPolicy, UrlNormalizer};
use sqlx::PgPool;
use std::sync::Arc;

/// State over the given store with DNS validation off.
pub fn create_state_with(repository: Arc<dyn MappingRepository>) -> AppState {
    let service = MappingService::new(
        repository.clone(),
        UrlNormalizer::new(QueryPolicy::Keep),
        IdGenerator::default(),
    );

    AppState::new(Arc::new(service), repository)
}

pub fn create_memory_state() -> AppState {
    create_state_with(Arc::new(InMemoryMappingRepository::new()))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_state_with(Arc::new(PgMappingRepository::new(Arc::new(pool))))
}

pub async fn create_test_mapping(pool: &PgPool, original_url: &str, short_id: i64) {
    sqlx::query("INSERT INTO url_mappings (original_url, short_id) VALUES ($1, $2)")
        .bind(original_url)
        .bind(short_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Store whose every call fails, for 5xx paths.
pub struct UnavailableRepository;

fn unavailable() -> AppError {
    AppError::store_unavailable("connection refused")
}

#[async_trait]
impl MappingRepository for UnavailableRepository {
    async fn exists_by_short_id(&self, _short_id: i64) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn exists_by_original_url(&self, _original_url: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn find_by_original_url(
        &self,
        _original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        Err(unavailable())
    }

    async fn find_by_short_id(&self, _short_id: i64) -> Result<Option<UrlMapping>, AppError> {
        Err(unavailable())
    }

    async fn create(&self, _new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

/// Store that answers `ping` but fails every other call.
pub struct PingOnlyRepository;

#[async_trait]
impl MappingRepository for PingOnlyRepository {
    async fn exists_by_short_id(&self, _short_id: i64) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn exists_by_original_url(&self, _original_url: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn find_by_original_url(
        &self,
        _original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        Err(unavailable())
    }

    async fn find_by_short_id(&self, _short_id: i64) -> Result<Option<UrlMapping>, AppError> {
        Err(unavailable())
    }

    async fn create(&self, _new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
