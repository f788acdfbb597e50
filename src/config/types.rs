//! Raw resource definitions as read from JSON or built in.

use serde::{Deserialize, Serialize};

fn default_schema() -> String {
    "public".into()
}

fn default_abbreviation_column() -> String {
    "abbreviation".into()
}

fn default_description_column() -> String {
    "description".into()
}

fn default_active_column() -> String {
    "isactive".into()
}

/// One lookup table exposed as a resource family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// URL path segment, e.g. `modifiers`.
    pub path_segment: String,
    #[serde(default = "default_schema")]
    pub schema: String,
    pub table: String,
    /// Primary-key column; also the JSON key for the id.
    pub id_column: String,
    pub id_prefix: String,
    /// Display-label column; also the JSON key for the label.
    pub name_column: String,
    #[serde(default = "default_abbreviation_column")]
    pub abbreviation_column: String,
    #[serde(default = "default_description_column")]
    pub description_column: String,
    #[serde(default = "default_active_column")]
    pub active_column: String,
    /// Human-readable noun for messages, e.g. `Modifier`.
    pub label: String,
}

impl ResourceConfig {
    fn builtin(
        path_segment: &str,
        table: &str,
        id_column: &str,
        id_prefix: &str,
        name_column: &str,
        label: &str,
    ) -> Self {
        ResourceConfig {
            path_segment: path_segment.into(),
            schema: default_schema(),
            table: table.into(),
            id_column: id_column.into(),
            id_prefix: id_prefix.into(),
            name_column: name_column.into(),
            abbreviation_column: default_abbreviation_column(),
            description_column: default_description_column(),
            active_column: default_active_column(),
            label: label.into(),
        }
    }
}

/// The four lookup tables served out of the box.
pub fn builtin_resources() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig::builtin("modifiers", "modifier_name_mstr", "modifier_id", "M", "modifier", "Modifier"),
        ResourceConfig::builtin("nounvalue", "noun_value_mstr", "noun_id", "N", "noun", "Noun"),
        ResourceConfig::builtin("attributename", "attri_name_mstr", "modifier_id", "M", "modifier", "Attribute name"),
        ResourceConfig::builtin("attributevalue", "attri_value_mstr", "noun_id", "N", "noun", "Attribute value"),
    ]
}
