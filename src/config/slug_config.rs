use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Character set a slug may contain.
///
/// - `Unicode`: URI unreserved characters plus the non-ASCII characters
///   allowed in IRIs (RFC 3987 `ucschar`).
/// - `Ascii`: URI unreserved characters only (`A-Z a-z 0-9 - _ . ~`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugEncoding {
    #[default]
    Unicode,
    Ascii,
}

impl SlugEncoding {
    pub fn allows(&self, ch: char) -> bool {
        let unreserved = ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '~');
        match self {
            SlugEncoding::Ascii => unreserved,
            SlugEncoding::Unicode => unreserved || is_ucs_char(ch),
        }
    }
}

fn is_ucs_char(ch: char) -> bool {
    let cp = ch as u32;
    matches!(cp, 0xA0..=0xD7FF | 0xF900..=0xFDCF | 0xFDF0..=0xFFEF | 0xE1000..=0xEFFFD)
        || ((0x10000..0xE0000).contains(&cp) && (cp & 0xFFFF) <= 0xFFFD)
}

/// How entry slugs are sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    pub encoding: SlugEncoding,
    /// Strip diacritics before sanitizing (`é` -> `e`)
    pub clean_accents: bool,
    /// Replaces every character the encoding does not allow
    pub sanitize_replacement: String,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            encoding: SlugEncoding::Unicode,
            clean_accents: false,
            sanitize_replacement: "-".to_string(),
        }
    }
}

impl SlugConfig {
    /// The replacement must itself be a valid slug fragment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sanitize_replacement.chars().all(|ch| self.encoding.allows(ch)) {
            Ok(())
        } else {
            Err(ConfigError::UnsafeReplacement(self.sanitize_replacement.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_allows_unreserved_only() {
        let ascii = SlugEncoding::Ascii;
        assert!("aZ09-_.~".chars().all(|ch| ascii.allows(ch)));
        assert!(!ascii.allows(' '));
        assert!(!ascii.allows('/'));
        assert!(!ascii.allows('é'));
    }

    #[test]
    fn test_unicode_allows_letters_outside_ascii() {
        let unicode = SlugEncoding::Unicode;
        assert!(unicode.allows('é'));
        assert!(unicode.allows('日'));
        assert!(unicode.allows('😀'));
        assert!(!unicode.allows('?'));
        assert!(!unicode.allows('\u{7f}'));
    }

    #[test]
    fn test_validate_replacement() {
        assert!(SlugConfig::default().validate().is_ok());

        let slash = SlugConfig { sanitize_replacement: "/".to_string(), ..Default::default() };
        assert!(matches!(slash.validate(), Err(ConfigError::UnsafeReplacement(r)) if r == "/"));

        let empty = SlugConfig { sanitize_replacement: String::new(), ..Default::default() };
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_partial() {
        let config: SlugConfig = serde_json::from_str(r#"{ "encoding": "ascii" }"#).unwrap();
        assert_eq!(config.encoding, SlugEncoding::Ascii);
        assert!(!config.clean_accents);
        assert_eq!(config.sanitize_replacement, "-");
    }
}
