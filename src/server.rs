//! HTTP server initialization and runtime setup.
//!
//! Handles the store connection, URL normalizer and id generator wiring, and the
//! Axum server lifecycle.

use crate::application::services::MappingService;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository};
use crate::infrastructure::resolver::SystemResolver;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::id_generator::IdGenerator;
use crate::utils::url_normalizer::UrlNormalizer;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool with the configured limits and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    Ok(pool)
}

/// Builds the configured mapping store.
///
/// # Errors
///
/// Returns an error if the PostgreSQL store cannot be reached.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn MappingRepository>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = connect_pool(config).await?;
            Ok(Arc::new(PgMappingRepository::new(Arc::new(pool))))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; mappings are lost on restart");
            Ok(Arc::new(InMemoryMappingRepository::new()))
        }
    }
}

/// Builds the URL normalizer, attaching a system resolver when DNS validation is on.
pub fn build_normalizer(config: &Config) -> UrlNormalizer {
    let normalizer = UrlNormalizer::new(config.query_policy);

    if config.dns_validation {
        let resolver = SystemResolver::new(Duration::from_millis(config.dns_timeout_ms));
        normalizer.with_resolver(Arc::new(resolver))
    } else {
        normalizer
    }
}

/// Wires the mapping service over an existing store.
pub fn build_state(config: &Config, repository: Arc<dyn MappingRepository>) -> AppState {
    let service = MappingService::new(
        repository.clone(),
        build_normalizer(config),
        IdGenerator::new(config.id_space),
    )
    .with_duplicate_key_retries(config.duplicate_key_retries);

    AppState::new(Arc::new(service), repository)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store (PostgreSQL with migrations, or in-memory)
/// - URL normalizer and short id generator
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let state = build_state(&config, repository);

    let app = app_router(state, Path::new(&config.static_dir));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
