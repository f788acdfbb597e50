//! Shared application state for all routes.

use crate::config::{ResolvedResource, ResourceRegistry};
use crate::error::AppError;
use crate::repository::EntryRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn EntryRepository>,
    pub registry: Arc<ResourceRegistry>,
}

impl AppState {
    pub fn new(repository: Arc<dyn EntryRepository>, registry: ResourceRegistry) -> Self {
        AppState {
            repository,
            registry: Arc::new(registry),
        }
    }

    pub fn resource(&self, path_segment: &str) -> Result<&ResolvedResource, AppError> {
        self.registry
            .resource_by_path(path_segment)
            .ok_or_else(|| AppError::NotFound(format!("resource '{}'", path_segment)))
    }
}
