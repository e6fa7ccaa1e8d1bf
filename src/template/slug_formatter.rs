use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::{
    collections::Collection,
    config::SlugConfig,
    template::{compile_string_template, data_value, prepare_slug, sanitize_slug},
};

/// Template used when a collection does not set `slug`.
pub const DEFAULT_SLUG_TEMPLATE: &str = "{{slug}}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("collection `{collection}` needs a `title` or `path` field, or an `identifier_field` naming a field with a value")]
    MissingIdentifier { collection: String },
}

/// Build the slug of a new entry from its data.
///
/// The identifier value (see [`Collection::identifier_field`]) fills
/// `{{slug}}`; every substituted value is prepared and sanitized with
/// `slug_config`.
pub fn slug_formatter(
    collection: &Collection,
    data: &Value,
    slug_config: &SlugConfig,
    date: DateTime<Utc>,
) -> Result<String, SlugError> {
    let identifier = collection
        .identifier_field()
        .and_then(|field| data_value(data, field))
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SlugError::MissingIdentifier { collection: collection.name.clone() })?;

    let template = collection.slug.as_deref().unwrap_or(DEFAULT_SLUG_TEMPLATE);
    let process_segment = |value: &str| sanitize_slug(&prepare_slug(value), slug_config);

    Ok(compile_string_template(template, date, &identifier, data, process_segment))
}
