//! In-memory repository with the same semantics as the PostgreSQL one.
//!
//! One mutex guards every table, so allocate-then-insert is atomic and a
//! failed operation never leaves a partial write.

use crate::allocator::allocate_next;
use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::model::{Entry, EntryPatch, NewEntry};
use crate::repository::{not_found, EntryRepository};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

/// Rows keyed by `(id length, id)`, which is numeric suffix order for one prefix.
type Table = BTreeMap<(usize, String), Entry>;

fn row_key(id: &str) -> (usize, String) {
    (id.len(), id.to_string())
}

#[derive(Default)]
pub struct InMemoryEntryRepository {
    tables: Mutex<HashMap<String, Table>>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entry` as-is, bypassing allocation. For seeding tables, including with ids the allocator would reject.
    pub async fn insert_raw(&self, resource: &ResolvedResource, entry: Entry) {
        let mut tables = self.tables.lock().await;
        tables
            .entry(resource.qualified_name())
            .or_default()
            .insert(row_key(&entry.id), entry);
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn list_all(&self, resource: &ResolvedResource) -> Result<Vec<Entry>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .get(&resource.qualified_name())
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, resource: &ResolvedResource, id: &str) -> Result<Entry, AppError> {
        let tables = self.tables.lock().await;
        tables
            .get(&resource.qualified_name())
            .and_then(|t| t.get(&row_key(id)))
            .cloned()
            .ok_or_else(|| not_found(resource, id))
    }

    async fn create(&self, resource: &ResolvedResource, fields: NewEntry) -> Result<Entry, AppError> {
        let mut tables = self.tables.lock().await;
        let table = tables.entry(resource.qualified_name()).or_default();
        let current_max = table.keys().next_back().map(|(_, id)| id.as_str());
        let id = allocate_next(&resource.id_prefix, current_max)?;
        let key = row_key(&id);
        if table.contains_key(&key) {
            return Err(AppError::Conflict(format!("identifier '{}' already exists", id)));
        }
        let entry = fields.into_entry(id);
        table.insert(key, entry.clone());
        tracing::info!(resource = %resource.path_segment, id = %entry.id, "entry created");
        Ok(entry)
    }

    async fn update(&self, resource: &ResolvedResource, id: &str, patch: EntryPatch) -> Result<Entry, AppError> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .get_mut(&resource.qualified_name())
            .and_then(|t| t.get_mut(&row_key(id)))
            .ok_or_else(|| not_found(resource, id))?;
        *row = patch.apply(row.clone());
        tracing::info!(resource = %resource.path_segment, id, "entry updated");
        Ok(row.clone())
    }

    async fn delete(&self, resource: &ResolvedResource, id: &str) -> Result<(), AppError> {
        let mut tables = self.tables.lock().await;
        tables
            .get_mut(&resource.qualified_name())
            .and_then(|t| t.remove(&row_key(id)))
            .ok_or_else(|| not_found(resource, id))?;
        tracing::info!(resource = %resource.path_segment, id, "entry deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
