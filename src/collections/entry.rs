use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The entry a path or media-folder query is made for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub slug: String,
    /// Repository path of the entry file; empty for an entry not saved yet
    #[serde(default)]
    pub path: String,
    /// Entry values keyed by field name
    #[serde(default)]
    pub data: Value,
}

impl Entry {
    pub fn new(slug: &str, path: &str) -> Self {
        Self {
            slug: slug.to_string(),
            path: path.to_string(),
            data: Value::Null,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}
