use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::collections::FieldPath;

static TEMPLATE_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("template variable pattern is valid"));

/// Expand every `{{key}}` of `template`.
///
/// - `year`, `month`, `day`, `hour`, `minute`, `second`: `date` in UTC, zero padded
/// - `slug`: the given `slug`
/// - `fields.<path>` or `<path>`: the scalar at that path of `data`, empty when missing
///
/// `processor` receives every substituted value before it is inserted; the
/// literal parts of the template are left untouched.
pub fn compile_string_template<F>(
    template: &str,
    date: DateTime<Utc>,
    slug: &str,
    data: &Value,
    processor: F,
) -> String
where
    F: Fn(&str) -> String,
{
    compile_string_template_with(template, date, slug, |path| data_value(data, path), processor)
}

/// [`compile_string_template`] with a custom resolver for data placeholders.
///
/// `lookup` receives the placeholder path with any `fields.` prefix removed.
pub fn compile_string_template_with<L, F>(
    template: &str,
    date: DateTime<Utc>,
    slug: &str,
    lookup: L,
    processor: F,
) -> String
where
    L: Fn(&str) -> Option<String>,
    F: Fn(&str) -> String,
{
    TEMPLATE_VARIABLE
        .replace_all(template, |caps: &Captures| {
            let key = caps[1].trim();
            let value = match key {
                "year" => date.format("%Y").to_string(),
                "month" => date.format("%m").to_string(),
                "day" => date.format("%d").to_string(),
                "hour" => date.format("%H").to_string(),
                "minute" => date.format("%M").to_string(),
                "second" => date.format("%S").to_string(),
                "slug" => slug.to_string(),
                _ => lookup(key.strip_prefix("fields.").unwrap_or(key)).unwrap_or_default(),
            };
            processor(&value)
        })
        .into_owned()
}

/// Scalar at a dotted path of `data`, rendered as text.
///
/// Numeric segments index into arrays. Objects, arrays and `null` have no
/// text form and yield `None`.
pub fn data_value(data: &Value, key: &str) -> Option<String> {
    let path = FieldPath::from(key);
    if path.is_empty() {
        return None;
    }

    let mut current = data;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
