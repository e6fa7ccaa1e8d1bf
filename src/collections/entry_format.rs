use serde::{Deserialize, Serialize};

/// On-disk format of the entries of a folder collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryFormat {
    Yml,
    Yaml,
    Toml,
    Json,
    /// Markdown body with a front matter block (default).
    #[default]
    Frontmatter,
    YamlFrontmatter,
    TomlFrontmatter,
    JsonFrontmatter,
}

impl EntryFormat {
    /// File extension (without the dot) used for new entries.
    pub fn extension(&self) -> &'static str {
        match self {
            EntryFormat::Yml | EntryFormat::Yaml => "yml",
            EntryFormat::Toml => "toml",
            EntryFormat::Json => "json",
            EntryFormat::Frontmatter
            | EntryFormat::YamlFrontmatter
            | EntryFormat::TomlFrontmatter
            | EntryFormat::JsonFrontmatter => "md",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(EntryFormat::default().extension(), "md");
        assert_eq!(EntryFormat::Yaml.extension(), "yml");
        assert_eq!(EntryFormat::TomlFrontmatter.extension(), "md");
    }

    #[test]
    fn test_parse_kebab_case() {
        let format: EntryFormat = serde_json::from_str("\"yaml-frontmatter\"").unwrap();
        assert_eq!(format, EntryFormat::YamlFrontmatter);
    }
}
