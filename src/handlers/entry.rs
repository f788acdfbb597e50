//! Entry CRUD handlers: list, read, create, update, delete. The resource is
//! resolved from the first path segment, so one set of handlers serves every table.

use crate::error::AppError;
use crate::repository::not_found;
use crate::response;
use crate::state::AppState;
use crate::wire;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&path_segment)?;
    let entries = state.repository.list_all(resource).await?;
    let data = entries.iter().map(|e| wire::entry_to_json(resource, e)).collect();
    Ok(response::success_many(data))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&path_segment)?;
    if !resource.accepts_id(&id) {
        return Err(not_found(resource, &id));
    }
    let entry = state.repository.get(resource, &id).await?;
    Ok(response::success_many(vec![wire::entry_to_json(resource, &entry)]))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let resource = state.resource(&path_segment)?;
    let fields = wire::new_entry_from_json(resource, body)?;
    let entry = state.repository.create(resource, fields).await?;
    Ok(response::created(wire::entry_to_json(resource, &entry)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let resource = state.resource(&path_segment)?;
    let patch = wire::patch_from_json(resource, body)?;
    if !resource.accepts_id(&id) {
        return Err(not_found(resource, &id));
    }
    let entry = state.repository.update(resource, &id, patch).await?;
    Ok(response::ok(wire::entry_to_json(resource, &entry)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&path_segment)?;
    if !resource.accepts_id(&id) {
        return Err(not_found(resource, &id));
    }
    state.repository.delete(resource, &id).await?;
    Ok(response::message(format!("{} {} deleted successfully", resource.label, id)))
}
