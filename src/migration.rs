//! Startup DDL: the target database, each resource's schema, table and id-order index.
//! All statements are idempotent; existing tables are left as they are.

use crate::config::{ResolvedResource, ResourceRegistry};
use crate::error::{AppError, ConfigError};
use crate::sql::{qualified_table, quoted};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// CREATE TABLE for one resource. The CHECK keeps malformed ids out of tables created here.
pub fn create_table_sql(resource: &ResolvedResource) -> String {
    let id = quoted(&resource.id_column);
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {} TEXT PRIMARY KEY,\n  {} TEXT NOT NULL,\n  {} TEXT NOT NULL DEFAULT '',\n  {} TEXT NOT NULL DEFAULT '',\n  {} BOOLEAN NOT NULL DEFAULT TRUE,\n  CONSTRAINT {} CHECK ({} ~ '^{}_[0-9]{{4,}}$')\n)",
        qualified_table(resource),
        id,
        quoted(&resource.name_column),
        quoted(&resource.abbreviation_column),
        quoted(&resource.description_column),
        quoted(&resource.active_column),
        quoted(&format!("{}_id_format", resource.table_name)),
        id,
        resource.id_prefix,
    )
}

/// Expression index backing the numeric max-id lookup.
pub fn create_id_order_index_sql(resource: &ResolvedResource) -> String {
    let id = quoted(&resource.id_column);
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ((length({})), {})",
        quoted(&format!("{}_id_order_idx", resource.table_name)),
        qualified_table(resource),
        id,
        id
    )
}

pub async fn ensure_tables(pool: &PgPool, registry: &ResourceRegistry) -> Result<(), AppError> {
    for r in registry.iter() {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&r.schema_name)))
            .execute(pool)
            .await?;
        sqlx::query(&create_table_sql(r)).execute(pool).await?;
        if let Err(e) = sqlx::query(&create_id_order_index_sql(r)).execute(pool).await {
            // pre-existing tables may be owned by another role
            tracing::warn!(table = %r.qualified_name(), error = %e, "id order index not created");
        }
        tracing::info!(resource = %r.path_segment, table = %r.qualified_name(), "table ready");
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, target) = admin_target(database_url)?;
    let Some(db_name) = target else {
        return Ok(());
    };
    let mut conn: PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, and the
/// database to create. No target when the URL names none or names `postgres`.
fn admin_target(database_url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Setting {
        name: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let target = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_string);
    Ok((opts.database("postgres"), target))
}
