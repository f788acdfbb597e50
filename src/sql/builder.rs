//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for one resource table.
//!
//! Every statement that returns rows selects the same aliased column list, so
//! rows decode straight into `model::Entry` whatever the table calls its columns.

use crate::config::ResolvedResource;

/// Quote identifier for PostgreSQL (safe: only from validated config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(resource: &ResolvedResource) -> String {
    format!("{}.{}", quoted(&resource.schema_name), quoted(&resource.table_name))
}

/// Columns aliased to `Entry` fields. NULL text reads back as '', NULL flag as false.
fn select_column_list(resource: &ResolvedResource) -> String {
    format!(
        "{} AS id, COALESCE({}, '') AS name, COALESCE({}, '') AS abbreviation, COALESCE({}, '') AS description, COALESCE({}, FALSE) AS is_active",
        quoted(&resource.id_column),
        quoted(&resource.name_column),
        quoted(&resource.abbreviation_column),
        quoted(&resource.description_column),
        quoted(&resource.active_column),
    )
}

/// Numeric order of the id suffix: shorter ids first, then lexicographic.
fn id_order(resource: &ResolvedResource, descending: bool) -> String {
    let id = quoted(&resource.id_column);
    let dir = if descending { " DESC" } else { "" };
    format!("length({id}){dir}, {id}{dir}")
}

/// SELECT every row ordered by id.
pub fn select_list(resource: &ResolvedResource) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(resource),
        qualified_table(resource),
        id_order(resource, false)
    )
}

/// SELECT by id. Caller binds id as $1.
pub fn select_by_id(resource: &ResolvedResource) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(resource),
        qualified_table(resource),
        quoted(&resource.id_column)
    )
}

/// SELECT by id, row-locked until the transaction ends.
pub fn select_by_id_for_update(resource: &ResolvedResource) -> String {
    format!("{} FOR UPDATE", select_by_id(resource))
}

/// Highest id in the table, by numeric suffix.
pub fn select_max_id(resource: &ResolvedResource) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT 1",
        quoted(&resource.id_column),
        qualified_table(resource),
        id_order(resource, true)
    )
}

/// Transaction-scoped lock serialising id allocation per table. Caller binds the qualified name as $1.
pub fn advisory_lock() -> &'static str {
    "SELECT pg_advisory_xact_lock(hashtext($1))"
}

/// INSERT: $1 id, $2 name, $3 abbreviation, $4 description, $5 active.
pub fn insert(resource: &ResolvedResource) -> String {
    format!(
        "INSERT INTO {} ({}, {}, {}, {}, {}) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        qualified_table(resource),
        quoted(&resource.id_column),
        quoted(&resource.name_column),
        quoted(&resource.abbreviation_column),
        quoted(&resource.description_column),
        quoted(&resource.active_column),
        select_column_list(resource)
    )
}

/// UPDATE by id: $1 id, $2 name, $3 abbreviation, $4 description, $5 active.
pub fn update(resource: &ResolvedResource) -> String {
    format!(
        "UPDATE {} SET {} = $2, {} = $3, {} = $4, {} = $5 WHERE {} = $1 RETURNING {}",
        qualified_table(resource),
        quoted(&resource.name_column),
        quoted(&resource.abbreviation_column),
        quoted(&resource.description_column),
        quoted(&resource.active_column),
        quoted(&resource.id_column),
        select_column_list(resource)
    )
}

/// DELETE by id, returning the removed id.
pub fn delete(resource: &ResolvedResource) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        qualified_table(resource),
        quoted(&resource.id_column),
        quoted(&resource.id_column)
    )
}
