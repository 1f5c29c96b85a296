use super::FieldSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index field types understood by search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Text,
    Bool,
    Date,
    Numeric,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Text => write!(f, "text"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Date => write!(f, "date"),
            FieldType::Numeric => write!(f, "numeric"),
        }
    }
}

/// One field of a search schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Field holds a list of values
    #[serde(default)]
    pub multiple: bool,
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default)]
    pub stored: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            multiple: false,
            indexed: true,
            stored: false,
        }
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn stored_only(mut self) -> Self {
        self.indexed = false;
        self.stored = true;
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_version() -> u32 {
    1
}

/// Field names, types and repeating state of a search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSchema {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl SearchSchema {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Default schema for dataset records.
    pub fn dataset() -> Self {
        Self::new(1)
            .with_field(FieldDefinition::new("id", FieldType::String))
            .with_field(FieldDefinition::new("entity_type", FieldType::String))
            .with_field(FieldDefinition::new("dataset_type", FieldType::String))
            .with_field(FieldDefinition::new("name", FieldType::Text))
            .with_field(FieldDefinition::new("title", FieldType::Text))
            .with_field(FieldDefinition::new("notes", FieldType::Text))
            .with_field(FieldDefinition::new("tags", FieldType::String).multiple())
            .with_field(FieldDefinition::new("groups", FieldType::String).multiple())
            .with_field(FieldDefinition::new("organization", FieldType::String))
            .with_field(FieldDefinition::new("private", FieldType::Bool))
            .with_field(FieldDefinition::new("metadata_created", FieldType::Date))
            .with_field(FieldDefinition::new("metadata_modified", FieldType::Date))
            .with_field(FieldDefinition::new("permission_labels", FieldType::String).multiple())
            .with_field(
                FieldDefinition::new("validated_data_dict", FieldType::String).stored_only(),
            )
    }

    /// Default schema for organization records.
    pub fn organization() -> Self {
        Self::new(1)
            .with_field(FieldDefinition::new("id", FieldType::String))
            .with_field(FieldDefinition::new("entity_type", FieldType::String))
            .with_field(FieldDefinition::new("organization_type", FieldType::String))
            .with_field(FieldDefinition::new("name", FieldType::Text))
            .with_field(FieldDefinition::new("title", FieldType::Text))
            .with_field(FieldDefinition::new("description", FieldType::Text))
            .with_field(
                FieldDefinition::new("validated_data_dict", FieldType::String).stored_only(),
            )
    }
}

impl Default for SearchSchema {
    fn default() -> Self {
        Self::new(default_version())
    }
}

impl FieldSchema for SearchSchema {
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    fn definition(&self, name: &str) -> Option<&FieldDefinition> {
        self.field(name)
    }
}
