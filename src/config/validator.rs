//! Resource definition validation: identifier safety and routing consistency.

use crate::config::ResourceConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// Path segments taken by the operational routes.
pub const RESERVED_SEGMENTS: &[&str] = &["health", "ready", "version"];

/// JSON keys shared by every resource; id and name columns must not shadow them.
const FIXED_KEYS: &[&str] = &["abbreviation", "description", "isActive"];

const MAX_IDENT_LEN: usize = 63;

fn pattern(re: &str) -> Result<Regex, ConfigError> {
    Regex::new(re).map_err(|e| ConfigError::Load(format!("validator pattern: {}", e)))
}

fn check(resource: &ResourceConfig, kind: &'static str, value: &str, re: &Regex) -> Result<(), ConfigError> {
    if value.len() > MAX_IDENT_LEN || !re.is_match(value) {
        return Err(ConfigError::InvalidIdentifier {
            resource: resource.path_segment.clone(),
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub fn validate(resources: &[ResourceConfig]) -> Result<(), ConfigError> {
    if resources.is_empty() {
        return Err(ConfigError::Load("at least one resource required".into()));
    }
    let sql_ident = pattern(r"^[A-Za-z_][A-Za-z0-9_]*$")?;
    let path_segment = pattern(r"^[a-z0-9][a-z0-9_-]*$")?;
    let id_prefix = pattern(r"^[A-Za-z][A-Za-z0-9]*$")?;
    let mut segments = HashSet::new();
    let mut tables = HashSet::new();
    for r in resources {
        check(r, "path segment", &r.path_segment, &path_segment)?;
        if RESERVED_SEGMENTS.contains(&r.path_segment.as_str()) {
            return Err(ConfigError::ReservedPathSegment(r.path_segment.clone()));
        }
        if !segments.insert(r.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(r.path_segment.clone()));
        }

        check(r, "schema", &r.schema, &sql_ident)?;
        check(r, "table", &r.table, &sql_ident)?;
        if !tables.insert((r.schema.as_str(), r.table.as_str())) {
            return Err(ConfigError::DuplicateTable(format!("{}.{}", r.schema, r.table)));
        }

        check(r, "id prefix", &r.id_prefix, &id_prefix)?;

        let columns = [
            &r.id_column,
            &r.name_column,
            &r.abbreviation_column,
            &r.description_column,
            &r.active_column,
        ];
        let mut seen = HashSet::new();
        for c in columns {
            check(r, "column", c, &sql_ident)?;
            if !seen.insert(c.as_str()) {
                return Err(ConfigError::InvalidIdentifier {
                    resource: r.path_segment.clone(),
                    kind: "duplicate column",
                    value: c.clone(),
                });
            }
        }

        for key in [&r.id_column, &r.name_column] {
            if FIXED_KEYS.contains(&key.as_str()) {
                return Err(ConfigError::InvalidIdentifier {
                    resource: r.path_segment.clone(),
                    kind: "json key",
                    value: key.clone(),
                });
            }
        }

        if r.label.trim().is_empty() {
            return Err(ConfigError::InvalidIdentifier {
                resource: r.path_segment.clone(),
                kind: "label",
                value: r.label.clone(),
            });
        }
    }
    Ok(())
}
