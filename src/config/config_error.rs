use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing a collections config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config file extension: {0:?}")]
    UnsupportedFormat(String),
    #[error("invalid field `{name}`: {reason}")]
    InvalidField { name: String, reason: String },
    #[error("slug replacement {0:?} contains characters that are not allowed in slugs")]
    UnsafeReplacement(String),
}
