mod common;

use shorturl::domain::entities::NewUrlMapping;
use shorturl::domain::repositories::MappingRepository;
use shorturl::error::{AppError, MappingField};
use shorturl::infrastructure::persistence::PgMappingRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_mapping(original_url: &str, short_id: i64) -> NewUrlMapping {
    NewUrlMapping {
        original_url: original_url.to_string(),
        short_id,
    }
}

#[sqlx::test]
async fn test_create_mapping(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let result = repo.create(new_mapping("https://example.com", 12345)).await;

    assert!(result.is_ok());
    let mapping = result.unwrap();
    assert_eq!(mapping.original_url, "https://example.com");
    assert_eq!(mapping.short_id, 12345);
    assert!(mapping.id > 0);
}

#[sqlx::test]
async fn test_find_by_short_id(pool: PgPool) {
    common::create_test_mapping(&pool, "https://example.com/a", 11111).await;
    let repo = PgMappingRepository::new(Arc::new(pool));

    let mapping = repo.find_by_short_id(11111).await.unwrap();

    assert!(mapping.is_some());
    assert_eq!(mapping.unwrap().original_url, "https://example.com/a");
}

#[sqlx::test]
async fn test_find_by_short_id_not_found(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let result = repo.find_by_short_id(99999).await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_original_url_exact_match(pool: PgPool) {
    common::create_test_mapping(&pool, "https://example.com/path", 22222).await;
    let repo = PgMappingRepository::new(Arc::new(pool));

    let found = repo
        .find_by_original_url("https://example.com/path")
        .await
        .unwrap();
    assert_eq!(found.map(|m| m.short_id), Some(22222));

    let other = repo
        .find_by_original_url("https://example.com/PATH")
        .await
        .unwrap();
    assert!(other.is_none());
}

#[sqlx::test]
async fn test_exists_checks(pool: PgPool) {
    common::create_test_mapping(&pool, "https://example.com", 33333).await;
    let repo = PgMappingRepository::new(Arc::new(pool));

    assert!(repo.exists_by_short_id(33333).await.unwrap());
    assert!(!repo.exists_by_short_id(33334).await.unwrap());
    assert!(repo.exists_by_original_url("https://example.com").await.unwrap());
    assert!(!repo.exists_by_original_url("https://example.org").await.unwrap());
}

#[sqlx::test]
async fn test_create_duplicate_short_id(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    repo.create(new_mapping("https://example.com/one", 44444))
        .await
        .unwrap();

    let result = repo.create(new_mapping("https://example.com/two", 44444)).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::DuplicateKey {
            field: MappingField::ShortId
        }
    ));
}

#[sqlx::test]
async fn test_create_duplicate_original_url(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    repo.create(new_mapping("https://example.com/same", 55555))
        .await
        .unwrap();

    let result = repo.create(new_mapping("https://example.com/same", 55556)).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::DuplicateKey {
            field: MappingField::OriginalUrl
        }
    ));
}

#[sqlx::test]
async fn test_count_and_ping(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool.clone()));
    assert!(repo.ping().await.is_ok());
    assert_eq!(repo.count().await.unwrap(), 0);

    common::create_test_mapping(&pool, "https://example.com/1", 10001).await;
    common::create_test_mapping(&pool, "https://example.com/2", 10002).await;

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_concurrent_find_or_create_converges(pool: PgPool) {
    let state = common::create_test_state(pool.clone());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = state.mapping_service.clone();
        handles.push(tokio::spawn(async move {
            service.find_or_create("https://example.com/race").await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().short_id);
    }

    ids.dedup();
    assert_eq!(ids.len(), 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
