//! Generic lookup-table repository, one implementation per storage backend.

mod memory;
mod postgres;

pub use memory::InMemoryEntryRepository;
pub use postgres::PgEntryRepository;

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::model::{Entry, EntryPatch, NewEntry};
use async_trait::async_trait;

/// CRUD over the table a resource names. Every mutating call is atomic:
/// it either commits completely or leaves the table untouched.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// All rows ordered by id.
    async fn list_all(&self, resource: &ResolvedResource) -> Result<Vec<Entry>, AppError>;

    async fn get(&self, resource: &ResolvedResource, id: &str) -> Result<Entry, AppError>;

    /// Allocate the next id and insert. Concurrent creates never share an id.
    async fn create(&self, resource: &ResolvedResource, fields: NewEntry) -> Result<Entry, AppError>;

    async fn update(&self, resource: &ResolvedResource, id: &str, patch: EntryPatch) -> Result<Entry, AppError>;

    async fn delete(&self, resource: &ResolvedResource, id: &str) -> Result<(), AppError>;

    /// Cheap round-trip to storage, used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn not_found(resource: &ResolvedResource, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}'", resource.label, id))
}
