use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{collections::FieldPath, config::ConfigError};

/// One editable node of an entry schema.
///
/// A field is either a leaf, a container of named children (`fields`) or a
/// wrapper around a single child (`field`, used by list widgets). Keys the
/// resolver does not interpret (`widget` options, `required`, ...) are kept
/// in `extra` so the field serializes back to what was configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct Field {
    pub name: String,
    pub label: Option<String>,
    pub widget: Option<String>,
    pub media_folder: Option<String>,
    pub public_folder: Option<String>,
    pub nesting: FieldNesting,
    pub extra: Map<String, Value>,
}

/// The three shapes a field can take.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum FieldNesting {
    #[default]
    Leaf,
    /// Multiple named children.
    Fields(Vec<Field>),
    /// A single child, addressed by its own name.
    Field(Box<Field>),
}

/// Wire shape of a field as it appears in the config document.
#[derive(Serialize, Deserialize)]
struct RawField {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    widget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    public_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<Box<Field>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawField> for Field {
    type Error = ConfigError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let nesting = match (raw.fields, raw.field) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidField {
                    name: raw.name,
                    reason: "declares both `fields` and `field`".to_string(),
                });
            }
            (Some(fields), None) => FieldNesting::Fields(fields),
            (None, Some(field)) => FieldNesting::Field(field),
            (None, None) => FieldNesting::Leaf,
        };

        Ok(Self {
            name: raw.name,
            label: raw.label,
            widget: raw.widget,
            media_folder: raw.media_folder,
            public_folder: raw.public_folder,
            nesting,
            extra: raw.extra,
        })
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        let (fields, single) = match field.nesting {
            FieldNesting::Leaf => (None, None),
            FieldNesting::Fields(fields) => (Some(fields), None),
            FieldNesting::Field(child) => (None, Some(child)),
        };

        Self {
            name: field.name,
            label: field.label,
            widget: field.widget,
            media_folder: field.media_folder,
            public_folder: field.public_folder,
            fields,
            field: single,
            extra: field.extra,
        }
    }
}

impl Field {
    /// A leaf field with only a name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            widget: None,
            media_folder: None,
            public_folder: None,
            nesting: FieldNesting::Leaf,
            extra: Map::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.nesting = FieldNesting::Fields(fields);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.nesting = FieldNesting::Field(Box::new(field));
        self
    }

    /// Children as a slice; a single `field` child is a one-element slice.
    pub fn children(&self) -> &[Field] {
        match &self.nesting {
            FieldNesting::Leaf => &[],
            FieldNesting::Fields(fields) => fields,
            FieldNesting::Field(field) => std::slice::from_ref(field.as_ref()),
        }
    }

    pub fn has_children(&self) -> bool {
        !matches!(self.nesting, FieldNesting::Leaf)
    }

    pub fn child(&self, name: &str) -> Option<&Field> {
        self.children().iter().find(|child| child.name == name)
    }
}

/// Resolve a dotted key against a field list.
///
/// The first segment names a field of `fields`; every following segment names
/// a child of the field reached so far. A numeric segment that names no child
/// is a list index: it steps into a single `field` child and is skipped over
/// `fields` children. Returns `None` as soon as a segment cannot be resolved.
pub fn select_field<'a>(fields: &'a [Field], key: &str) -> Option<&'a Field> {
    let path = FieldPath::from(key);
    let mut segments = path.segments().iter();

    let first = segments.next()?;
    let mut field = fields.iter().find(|f| f.name == *first)?;

    // Set when `field` is a list item reached through an index segment; the
    // item may still be named explicitly (`list.0.item`).
    let mut indexed_item = false;

    for segment in segments {
        if std::mem::take(&mut indexed_item) && field.name == *segment {
            continue;
        }

        field = match field.child(segment) {
            Some(child) => child,
            None if FieldPath::is_index(segment) => match &field.nesting {
                FieldNesting::Fields(_) => continue,
                FieldNesting::Field(child) => {
                    indexed_item = true;
                    child.as_ref()
                }
                FieldNesting::Leaf => return None,
            },
            None => return None,
        };
    }

    Some(field)
}

/// Flatten a field list into dotted names.
///
/// All siblings are named first, in declaration order; the children of each
/// sibling follow, grouped by parent and prefixed with the parent's dotted
/// name. A single `field` child is flattened as a one-element list, so a list
/// `it` wrapping `title { fields: [subTitle] }` yields `it.title` and
/// `it.title.subTitle`.
pub fn fields_names(fields: &[Field], prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = fields
        .iter()
        .map(|field| format!("{prefix}{}", field.name))
        .collect();

    for (index, field) in fields.iter().enumerate() {
        if field.has_children() {
            let child_prefix = format!("{}.", names[index]);
            names.extend(fields_names(field.children(), &child_prefix));
        }
    }

    names
}

/// Depth-first, pre-order walk collecting every field that sets a media folder.
pub fn fields_with_media_folders(fields: &[Field]) -> Vec<&Field> {
    let mut found = Vec::new();
    collect_media_fields(fields, &mut found);
    found
}

fn collect_media_fields<'a>(fields: &'a [Field], found: &mut Vec<&'a Field>) {
    for field in fields {
        if field.media_folder.is_some() {
            found.push(field);
        }
        collect_media_fields(field.children(), found);
    }
}

/// Media folders of a field list in traversal order.
pub fn fields_media_folders(fields: &[Field]) -> Vec<String> {
    fields_with_media_folders(fields)
        .into_iter()
        .filter_map(|field| field.media_folder.clone())
        .collect()
}
