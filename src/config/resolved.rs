//! Resolved resource model: definitions validated and flattened for runtime use.

use regex::Regex;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub path_segment: String,
    pub schema_name: String,
    pub table_name: String,
    pub id_column: String,
    pub id_prefix: String,
    pub name_column: String,
    pub abbreviation_column: String,
    pub description_column: String,
    pub active_column: String,
    pub label: String,
    /// `^<prefix>_\d{4,}$`
    pub id_pattern: Regex,
}

impl ResolvedResource {
    /// `schema.table`, unquoted. Used as the advisory lock key.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema_name, self.table_name)
    }

    /// Whether `id` could name a row of this resource at all.
    pub fn accepts_id(&self, id: &str) -> bool {
        self.id_pattern.is_match(id)
    }
}

#[derive(Clone, Debug)]
pub struct ResourceRegistry {
    pub resources: Vec<ResolvedResource>,
    pub resource_by_path: HashMap<String, ResolvedResource>,
}

impl ResourceRegistry {
    pub fn resource_by_path(&self, path: &str) -> Option<&ResolvedResource> {
        self.resource_by_path.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedResource> {
        self.resources.iter()
    }
}
