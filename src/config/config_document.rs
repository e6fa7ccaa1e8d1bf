use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::info;

use crate::{collections::Collection, config::{ConfigError, ConfigFormat, SlugConfig}};

/// Parsed collections configuration.
///
/// Only the keys the resolver reads are typed; the rest of the document
/// (backend, locale, ...) is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub collections: Vec<Collection>,
    /// Site-wide media folder, used when no collection, file or field sets one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_folder: Option<String>,
    #[serde(default)]
    pub slug: SlugConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let document: ConfigDocument = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };

        document.slug.validate()?;
        Ok(document)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let document: ConfigDocument = serde_json::from_value(value)?;
        document.slug.validate()?;
        Ok(document)
    }

    /// Read and parse a config file; the format is taken from its extension.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let document = Self::from_str_with_format(&content, format)?;
        info!(
            path = %path.display(),
            collections = document.collections.len(),
            "loaded collections config"
        );
        Ok(document)
    }
}
