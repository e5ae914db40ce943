//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::domain::repositories::MappingRepository;

/// State shared by all request handlers.
///
/// Constructed once at startup in [`crate::server::run`]; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
    /// Direct store handle for health checks.
    pub repository: Arc<dyn MappingRepository>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>, repository: Arc<dyn MappingRepository>) -> Self {
        Self {
            mapping_service,
            repository,
        }
    }
}
