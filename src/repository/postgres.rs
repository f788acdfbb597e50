//! PostgreSQL repository.
//!
//! Creates take a per-table advisory lock inside the insert transaction, so
//! reading the current max id, allocating the next one and inserting it are
//! serialised across every writer using this code. The lock is released by
//! commit or rollback; an aborted create leaves no reservation behind.

use crate::allocator::allocate_next;
use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::model::{Entry, EntryPatch, NewEntry};
use crate::repository::{not_found, EntryRepository};
use crate::sql;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgEntryRepository {
    pool: PgPool,
}

impl PgEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        PgEntryRepository { pool }
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn list_all(&self, resource: &ResolvedResource) -> Result<Vec<Entry>, AppError> {
        let q = sql::select_list(resource);
        tracing::debug!(sql = %q, "query");
        let rows = sqlx::query_as::<_, Entry>(&q).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, resource: &ResolvedResource, id: &str) -> Result<Entry, AppError> {
        let q = sql::select_by_id(resource);
        tracing::debug!(sql = %q, id, "query");
        sqlx::query_as::<_, Entry>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(resource, id))
    }

    async fn create(&self, resource: &ResolvedResource, fields: NewEntry) -> Result<Entry, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(sql::advisory_lock())
            .bind(resource.qualified_name())
            .execute(&mut *tx)
            .await?;

        let q = sql::select_max_id(resource);
        tracing::debug!(sql = %q, "query (tx)");
        let current_max: Option<String> = sqlx::query_scalar(&q).fetch_optional(&mut *tx).await?;
        let id = allocate_next(&resource.id_prefix, current_max.as_deref())?;

        let q = sql::insert(resource);
        tracing::debug!(sql = %q, id = %id, "query (tx)");
        let row = sqlx::query_as::<_, Entry>(&q)
            .bind(&id)
            .bind(&fields.name)
            .bind(&fields.abbreviation)
            .bind(&fields.description)
            .bind(fields.is_active)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_insert(e, &id))?;

        tx.commit().await?;
        tracing::info!(resource = %resource.path_segment, id = %row.id, "entry created");
        Ok(row)
    }

    async fn update(&self, resource: &ResolvedResource, id: &str, patch: EntryPatch) -> Result<Entry, AppError> {
        if patch.is_empty() {
            // nothing to write; still 404 for a missing row
            return self.get(resource, id).await;
        }
        let mut tx = self.pool.begin().await?;

        let q = sql::select_by_id_for_update(resource);
        tracing::debug!(sql = %q, id, "query (tx)");
        let current = sqlx::query_as::<_, Entry>(&q)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found(resource, id))?;

        let merged = patch.apply(current);
        let q = sql::update(resource);
        tracing::debug!(sql = %q, id, "query (tx)");
        let row = sqlx::query_as::<_, Entry>(&q)
            .bind(&merged.id)
            .bind(&merged.name)
            .bind(&merged.abbreviation)
            .bind(&merged.description)
            .bind(merged.is_active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(resource = %resource.path_segment, id, "entry updated");
        Ok(row)
    }

    async fn delete(&self, resource: &ResolvedResource, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let q = sql::delete(resource);
        tracing::debug!(sql = %q, id, "query (tx)");
        let deleted: Option<String> = sqlx::query_scalar(&q)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if deleted.is_none() {
            return Err(not_found(resource, id));
        }

        tx.commit().await?;
        tracing::info!(resource = %resource.path_segment, id, "entry deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
