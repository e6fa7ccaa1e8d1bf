use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collections::{Field, select_field};

/// One declared file of a file-based collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFile {
    /// Entry slug of the file
    #[serde(default)]
    pub name: String,
    /// Repository path of the file
    #[serde(default)]
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_folder: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CollectionFile {
    pub fn new(name: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            file: file.to_string(),
            ..Default::default()
        }
    }

    pub fn select_field(&self, key: &str) -> Option<&Field> {
        select_field(&self.fields, key)
    }
}
