use std::path::Path;

use crate::config::ConfigError;

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(extension: &str) -> Result<Self, ConfigError> {
        match extension.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        Self::from_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("admin/config.yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.YAML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config.toml")).unwrap(), ConfigFormat::Toml);
    }

    #[test]
    fn test_unsupported() {
        let err = ConfigFormat::from_path(Path::new("config.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }
}
