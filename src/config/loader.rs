//! Build the resource registry from built-in definitions or a JSON file.

use crate::allocator::identifier_pattern;
use crate::config::resolved::{ResolvedResource, ResourceRegistry};
use crate::config::types::{builtin_resources, ResourceConfig};
use crate::config::validate;
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Build resolved registry from resource definitions (validates first).
pub fn resolve(configs: &[ResourceConfig]) -> Result<ResourceRegistry, ConfigError> {
    validate(configs)?;

    let mut resources = Vec::with_capacity(configs.len());
    let mut resource_by_path = HashMap::new();
    for c in configs {
        let id_pattern = identifier_pattern(&c.id_prefix).map_err(|e| ConfigError::InvalidIdentifier {
            resource: c.path_segment.clone(),
            kind: "id prefix",
            value: format!("{} ({})", c.id_prefix, e),
        })?;
        let resolved = ResolvedResource {
            path_segment: c.path_segment.clone(),
            schema_name: c.schema.clone(),
            table_name: c.table.clone(),
            id_column: c.id_column.clone(),
            id_prefix: c.id_prefix.clone(),
            name_column: c.name_column.clone(),
            abbreviation_column: c.abbreviation_column.clone(),
            description_column: c.description_column.clone(),
            active_column: c.active_column.clone(),
            label: c.label.clone(),
            id_pattern,
        };
        resource_by_path.insert(resolved.path_segment.clone(), resolved.clone());
        resources.push(resolved);
    }

    Ok(ResourceRegistry {
        resources,
        resource_by_path,
    })
}

/// Read a JSON array of resource definitions.
pub async fn load_from_path(path: &Path) -> Result<Vec<ResourceConfig>, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

/// Resource definitions from `path` when given, otherwise the built-in four.
pub async fn load_resources(path: Option<&Path>) -> Result<ResourceRegistry, ConfigError> {
    let configs = match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading resource definitions");
            load_from_path(p).await?
        }
        None => builtin_resources(),
    };
    resolve(&configs)
}
