//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, MappingField};

#[derive(Debug, Default)]
struct Inner {
    by_short_id: HashMap<i64, UrlMapping>,
    short_id_by_url: HashMap<String, i64>,
    next_id: i64,
}

/// Process-local mapping store.
///
/// Both indexes sit behind a single lock, so the uniqueness check and the insert
/// in [`MappingRepository::create`] are atomic. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryMappingRepository {
    inner: RwLock<Inner>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn exists_by_short_id(&self, short_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.read().await.by_short_id.contains_key(&short_id))
    }

    async fn exists_by_original_url(&self, original_url: &str) -> Result<bool, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .short_id_by_url
            .contains_key(original_url))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner
            .short_id_by_url
            .get(original_url)
            .and_then(|short_id| inner.by_short_id.get(short_id))
            .cloned())
    }

    async fn find_by_short_id(&self, short_id: i64) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.inner.read().await.by_short_id.get(&short_id).cloned())
    }

    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut inner = self.inner.write().await;

        if inner.short_id_by_url.contains_key(&new_mapping.original_url) {
            return Err(AppError::DuplicateKey {
                field: MappingField::OriginalUrl,
            });
        }
        if inner.by_short_id.contains_key(&new_mapping.short_id) {
            return Err(AppError::DuplicateKey {
                field: MappingField::ShortId,
            });
        }

        inner.next_id += 1;
        let mapping = UrlMapping::new(
            inner.next_id,
            new_mapping.original_url,
            new_mapping.short_id,
            Utc::now(),
        );

        inner
            .short_id_by_url
            .insert(mapping.original_url.clone(), mapping.short_id);
        inner.by_short_id.insert(mapping.short_id, mapping.clone());

        Ok(mapping)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.by_short_id.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
