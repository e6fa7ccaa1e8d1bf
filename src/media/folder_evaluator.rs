use chrono::{DateTime, Utc};

use crate::{
    collections::{Collection, CollectionFile, CollectionType, Entry, Field},
    config::ConfigDocument,
    template::{compile_string_template_with, data_value, prepare_slug, sanitize_slug},
};

/// Folder used for the media of an entry that has no path yet.
pub const DRAFT_MEDIA_FILES: &str = "DRAFT_MEDIA_FILES";

/// Evaluates media folder templates for one entry of a collection.
///
/// A folder is inherited down the chain config -> collection -> file ->
/// field; each level may reference the folder it inherits as
/// `{{media_folder}}`. Entry values, `{{slug}}` (the entry identifier) and the
/// entry path parts `{{dirname}}`, `{{filename}}` and `{{extension}}` are also
/// available.
pub struct FolderEvaluator<'a> {
    config: &'a ConfigDocument,
    collection: &'a Collection,
    entry: &'a Entry,
    file: Option<&'a CollectionFile>,
    date: DateTime<Utc>,
    identifier: String,
    dirname: String,
    filename: String,
    extension: String,
}

impl<'a> FolderEvaluator<'a> {
    pub fn new(
        config: &'a ConfigDocument,
        collection: &'a Collection,
        entry: &'a Entry,
        date: DateTime<Utc>,
    ) -> Self {
        let file = match collection.kind() {
            CollectionType::Files => collection.file_for_entry(entry),
            CollectionType::Folder => None,
        };

        let identifier = collection
            .identifier_field()
            .and_then(|field| data_value(&entry.data, field))
            .unwrap_or_default();

        let (dirname, filename, extension) = path_parts(collection, entry);

        Self {
            config,
            collection,
            entry,
            file,
            date,
            identifier,
            dirname,
            filename,
            extension,
        }
    }

    /// The declared file the entry belongs to, for file collections.
    pub fn file(&self) -> Option<&'a CollectionFile> {
        self.file
    }

    /// Repository folder for the media of the entry, or of one of its fields.
    ///
    /// Without any custom folder on the chain this is the site-wide folder.
    /// Otherwise a folder starting with `/` is taken from the repository root
    /// and any other is relative to the entry's directory. The result never
    /// starts or ends with `/`.
    pub fn media_folder(&self, field: Option<&Field>) -> String {
        self.evaluate(self.file, field)
    }

    /// [`FolderEvaluator::media_folder`] of the collection scope alone,
    /// ignoring the declared file the entry belongs to.
    pub fn collection_media_folder(&self) -> String {
        self.evaluate(None, None)
    }

    fn evaluate(&self, file: Option<&CollectionFile>, field: Option<&Field>) -> String {
        let custom = self.collection.media_folder.is_some()
            || file.is_some_and(|file| file.media_folder.is_some())
            || field.is_some_and(|field| field.media_folder.is_some());

        let folder = if custom {
            let folder = match field {
                Some(field) => self.field_folder(file, field),
                None => self.scope_folder(file),
            };
            self.resolve(&folder)
        } else {
            self.config.media_folder.clone().unwrap_or_default()
        };

        folder.trim_matches('/').to_string()
    }

    /// Template-expanded folder of the collection scope, then of `file`.
    fn scope_folder(&self, file: Option<&CollectionFile>) -> String {
        let mut folder = self.config.media_folder.clone().unwrap_or_default();

        if let Some(template) = &self.collection.media_folder {
            folder = self.format(template, &folder);
        }

        if let Some(template) = file.and_then(|file| file.media_folder.as_ref()) {
            folder = self.format(template, &folder);
        }

        folder
    }

    /// Template-expanded folder of a field, inheriting the scope folder.
    fn field_folder(&self, file: Option<&CollectionFile>, field: &Field) -> String {
        let parent = self.scope_folder(file);
        match &field.media_folder {
            Some(template) => self.format(template, &parent),
            None => parent,
        }
    }

    fn format(&self, template: &str, parent_folder: &str) -> String {
        let lookup = |path: &str| match path {
            "media_folder" => Some(parent_folder.to_string()),
            "dirname" => Some(self.dirname.clone()),
            "filename" => Some(self.filename.clone()),
            "extension" => Some(self.extension.clone()),
            _ => data_value(&self.entry.data, path),
        };

        let slug_config = &self.config.slug;
        let process_segment = |value: &str| {
            if value == parent_folder || value == self.dirname {
                value.to_string()
            } else {
                sanitize_slug(&prepare_slug(value), slug_config)
            }
        };

        compile_string_template_with(template, self.date, &self.identifier, lookup, process_segment)
    }

    fn resolve(&self, folder: &str) -> String {
        if folder.starts_with('/') {
            return folder.trim_start_matches('/').to_string();
        }

        if self.entry.path.is_empty() {
            let collection_folder = self.collection.folder.as_deref().unwrap_or("");
            return join_path(collection_folder, DRAFT_MEDIA_FILES);
        }

        let entry_dir = self.entry.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        join_path(entry_dir, folder)
    }
}

/// Directory (relative to the collection folder), file stem and extension
/// of the entry path.
fn path_parts(collection: &Collection, entry: &Entry) -> (String, String, String) {
    let path = entry.path.as_str();
    let (dir, base) = path.rsplit_once('/').unwrap_or(("", path));

    let folder = collection.folder.as_deref().unwrap_or("").trim_matches('/');
    let dir = if folder.is_empty() {
        dir
    } else {
        dir.strip_prefix(folder)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(dir)
    };

    let (stem, extension) = match base.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, extension),
        _ => (base, ""),
    };

    (dir.to_string(), stem.to_string(), extension.to_string())
}

/// Join two repository paths, folding `.` and `..` segments.
pub fn join_path(base: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}
