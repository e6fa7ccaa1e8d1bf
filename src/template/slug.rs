use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::config::SlugConfig;

static RESERVED_DOTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.+$").expect("reserved dots pattern is valid"));
static WINDOWS_RESERVED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$")
        .expect("windows reserved names pattern is valid")
});
static WINDOWS_TRAILING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\. ]+$").expect("windows trailing pattern is valid"));

const MAX_FILENAME_BYTES: usize = 255;

/// Normalize a raw value before sanitizing: trimmed, lower-cased, without
/// single quotes, periods turned into dashes.
pub fn prepare_slug(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace('\'', "")
        .replace('.', "-")
}

/// Make `value` safe to use as a slug under `config`.
///
/// Every character the encoding does not allow becomes the replacement, the
/// result is made a valid file name, then runs of the replacement collapse to
/// one and a leading or trailing replacement is dropped.
pub fn sanitize_slug(value: &str, config: &SlugConfig) -> String {
    let replacement = config.sanitize_replacement.as_str();

    let value = if config.clean_accents {
        strip_diacritics(value)
    } else {
        value.to_string()
    };

    let mut sanitized = String::with_capacity(value.len());
    for ch in value.chars() {
        if config.encoding.allows(ch) {
            sanitized.push(ch);
        } else {
            sanitized.push_str(replacement);
        }
    }

    let sanitized = sanitize_filename(&sanitized, replacement);
    collapse_replacement(sanitized, replacement)
}

/// Remove combining marks after canonical decomposition (`ñ` -> `n`).
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|ch| !is_combining_mark(*ch)).nfc().collect()
}

fn sanitize_filename(value: &str, replacement: &str) -> String {
    let value = if RESERVED_DOTS.is_match(value) || WINDOWS_RESERVED.is_match(value) {
        replacement.to_string()
    } else {
        WINDOWS_TRAILING.replace(value, replacement).into_owned()
    };

    truncate_bytes(value, MAX_FILENAME_BYTES)
}

fn truncate_bytes(mut value: String, max: usize) -> String {
    if value.len() > max {
        let mut end = max;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
    }
    value
}

fn collapse_replacement(mut value: String, replacement: &str) -> String {
    if replacement.is_empty() {
        return value;
    }

    let doubled = replacement.repeat(2);
    while value.contains(&doubled) {
        value = value.replace(&doubled, replacement);
    }

    let value = value.strip_prefix(replacement).unwrap_or(&value);
    let value = value.strip_suffix(replacement).unwrap_or(value);
    value.to_string()
}
