//! JSON shape of entries. Each resource names its id and label keys after its
//! columns (`modifier_id`/`modifier`, `noun_id`/`noun`); the rest are shared.

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::model::{Entry, EntryPatch, NewEntry};
use serde_json::{Map, Value};

pub const ABBREVIATION_KEY: &str = "abbreviation";
pub const DESCRIPTION_KEY: &str = "description";
pub const ACTIVE_KEY: &str = "isActive";

pub fn entry_to_json(resource: &ResolvedResource, entry: &Entry) -> Value {
    let mut map = Map::with_capacity(5);
    map.insert(resource.id_column.clone(), Value::String(entry.id.clone()));
    map.insert(resource.name_column.clone(), Value::String(entry.name.clone()));
    map.insert(ABBREVIATION_KEY.into(), Value::String(entry.abbreviation.clone()));
    map.insert(DESCRIPTION_KEY.into(), Value::String(entry.description.clone()));
    map.insert(ACTIVE_KEY.into(), Value::Bool(entry.is_active));
    Value::Object(map)
}

/// Create body: every field required, non-null and correctly typed.
pub fn new_entry_from_json(resource: &ResolvedResource, body: Value) -> Result<NewEntry, AppError> {
    let map = into_object(body)?;
    Ok(NewEntry {
        name: required(string_field(&map, &resource.name_column)?, &resource.name_column)?,
        abbreviation: required(string_field(&map, ABBREVIATION_KEY)?, ABBREVIATION_KEY)?,
        description: required(string_field(&map, DESCRIPTION_KEY)?, DESCRIPTION_KEY)?,
        is_active: required(bool_field(&map, ACTIVE_KEY)?, ACTIVE_KEY)?,
    })
}

/// Update body: absent or `null` fields are left unset. Unknown keys and the id key are ignored.
pub fn patch_from_json(resource: &ResolvedResource, body: Value) -> Result<EntryPatch, AppError> {
    let map = into_object(body)?;
    Ok(EntryPatch {
        name: string_field(&map, &resource.name_column)?,
        abbreviation: string_field(&map, ABBREVIATION_KEY)?,
        description: string_field(&map, DESCRIPTION_KEY)?,
        is_active: bool_field(&map, ACTIVE_KEY)?,
    })
}

fn into_object(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn required<T>(v: Option<T>, key: &str) -> Result<T, AppError> {
    v.ok_or_else(|| AppError::Validation(format!("{} is required", key)))
}

fn string_field(map: &Map<String, Value>, key: &str) -> Result<Option<String>, AppError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::Validation(format!("{} must be a string", key))),
    }
}

fn bool_field(map: &Map<String, Value>, key: &str) -> Result<Option<bool>, AppError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(AppError::Validation(format!("{} must be a boolean", key))),
    }
}
