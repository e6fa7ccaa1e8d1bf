use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collections::{
    CollectionFile, CollectionType, Entry, EntryFormat, Field, fields_media_folders, fields_names,
    select_field,
};

/// Field names tried, in order, when a collection does not set `identifier_field`.
pub const IDENTIFIER_FIELDS: [&str; 2] = ["title", "path"];

/// A named content type and the schema of its entries.
///
/// Only the attributes the resolver reads are typed; everything else in the
/// collection block is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub name: String,
    /// Resolved storage type; filled in by normalization when absent
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<CollectionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<CollectionFile>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<EntryFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    /// Slug template for new entries, `{{slug}}` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_field: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// A folder collection storing its entries under `folder`.
    pub fn folder(name: &str, folder: &str) -> Self {
        Self {
            name: name.to_string(),
            folder: Some(folder.to_string()),
            ..Default::default()
        }
    }

    /// A file collection made of the given files.
    pub fn files(name: &str, files: Vec<CollectionFile>) -> Self {
        Self {
            name: name.to_string(),
            files: Some(files),
            ..Default::default()
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Storage type: the explicit tag, else inferred from `files`.
    pub fn kind(&self) -> CollectionType {
        match self.collection_type {
            Some(kind) => kind,
            None if self.files.is_some() => CollectionType::Files,
            None => CollectionType::Folder,
        }
    }

    /// Declared files; empty for folder collections.
    pub fn file_list(&self) -> &[CollectionFile] {
        self.files.as_deref().unwrap_or_default()
    }

    pub fn file_by_slug(&self, slug: &str) -> Option<&CollectionFile> {
        self.file_list().iter().find(|file| file.name == slug)
    }

    pub fn file_by_path(&self, path: &str) -> Option<&CollectionFile> {
        self.file_list().iter().find(|file| file.file == path)
    }

    /// The declared file an entry belongs to, matched by slug first, then by path.
    pub fn file_for_entry(&self, entry: &Entry) -> Option<&CollectionFile> {
        self.file_by_slug(&entry.slug)
            .or_else(|| self.file_by_path(&entry.path))
    }

    /// Entries of a file collection are fixed; folder collections honour `delete`.
    pub fn allow_deletion(&self) -> bool {
        match self.kind() {
            CollectionType::Files => false,
            CollectionType::Folder => self.delete.unwrap_or(true),
        }
    }

    /// Only folder collections with `create: true` accept new entries.
    pub fn allow_new_entries(&self) -> bool {
        match self.kind() {
            CollectionType::Files => false,
            CollectionType::Folder => self.create.unwrap_or(false),
        }
    }

    /// Extension of folder entries: `extension` if set, else the one of `format`.
    pub fn folder_entry_extension(&self) -> String {
        match &self.extension {
            Some(extension) => extension.trim_start_matches('.').to_string(),
            None => self.format.unwrap_or_default().extension().to_string(),
        }
    }

    /// Repository path of the entry with the given slug.
    pub fn entry_path(&self, slug: &str) -> Option<String> {
        match self.kind() {
            CollectionType::Folder => {
                let folder = self.folder.as_deref()?.trim_end_matches('/');
                Some(format!("{folder}/{slug}.{}", self.folder_entry_extension()))
            }
            CollectionType::Files => self.file_by_slug(slug).map(|file| file.file.clone()),
        }
    }

    /// Slug of the entry stored at `path`; inverse of [`Collection::entry_path`].
    pub fn entry_slug(&self, path: &str) -> Option<String> {
        match self.kind() {
            CollectionType::Folder => {
                let folder = self.folder.as_deref()?.trim_end_matches('/');
                let suffix = format!(".{}", self.folder_entry_extension());

                let slug = path
                    .strip_prefix(folder)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .unwrap_or(path);
                let slug = slug.strip_suffix(suffix.as_str()).unwrap_or(slug);
                Some(slug.to_string())
            }
            CollectionType::Files => self.file_by_path(path).map(|file| file.name.clone()),
        }
    }

    pub fn file_entry_label(&self, slug: &str) -> Option<&str> {
        self.file_by_slug(slug)
            .and_then(|file| file.label.as_deref())
    }

    /// Preview template name: the collection for folders, the file for files.
    pub fn template_name(&self, slug: &str) -> String {
        match self.kind() {
            CollectionType::Folder => self.name.clone(),
            CollectionType::Files => slug.to_string(),
        }
    }

    /// Media folders set anywhere in the schema, in depth-first order.
    ///
    /// Folder collections walk `fields`; file collections walk the fields of
    /// every declared file in declaration order.
    pub fn fields_media_folders(&self) -> Vec<String> {
        match self.kind() {
            CollectionType::Folder => fields_media_folders(&self.fields),
            CollectionType::Files => self
                .file_list()
                .iter()
                .flat_map(|file| fields_media_folders(&file.fields))
                .collect(),
        }
    }

    /// Resolve a dotted key (`en.title`, `it.title.subTitle`) to its field.
    pub fn select_field(&self, key: &str) -> Option<&Field> {
        select_field(&self.fields, key)
    }

    /// Name of the field whose value identifies an entry.
    ///
    /// `identifier_field` wins when it names a field; otherwise the first of
    /// [`IDENTIFIER_FIELDS`] present. Matching ignores case and surrounding
    /// whitespace.
    pub fn identifier_field(&self) -> Option<&str> {
        let names = fields_names(&self.fields, "");
        let has_field = |id: &str| {
            let id = id.trim().to_lowercase();
            names.iter().any(|name| name.trim().to_lowercase() == id)
        };

        self.identifier_field
            .as_deref()
            .filter(|id| has_field(*id))
            .or_else(|| IDENTIFIER_FIELDS.into_iter().find(|id| has_field(*id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(value: Value) -> Collection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_kind_inference() {
        assert_eq!(collection(json!({ "folder": "posts" })).kind(), CollectionType::Folder);
        assert_eq!(collection(json!({ "files": [] })).kind(), CollectionType::Files);
        assert_eq!(collection(json!({})).kind(), CollectionType::Folder);
        assert_eq!(
            collection(json!({ "name": "pages", "type": "file_based_collection" })).kind(),
            CollectionType::Files
        );
    }

    #[test]
    fn test_allow_deletion() {
        let pages = collection(json!({ "name": "pages", "type": "file_based_collection" }));
        assert!(!pages.allow_deletion());

        let posts = Collection::folder("posts", "_posts");
        assert!(posts.allow_deletion());

        let locked = collection(json!({ "name": "posts", "folder": "_posts", "delete": false }));
        assert!(!locked.allow_deletion());
    }

    #[test]
    fn test_allow_new_entries() {
        assert!(!Collection::folder("posts", "_posts").allow_new_entries());
        let creatable = collection(json!({ "folder": "_posts", "create": true }));
        assert!(creatable.allow_new_entries());
        let files = collection(json!({ "files": [], "create": true }));
        assert!(!files.allow_new_entries());
    }

    #[test]
    fn test_entry_path() {
        let posts = collection(json!({ "type": "folder_based_collection", "folder": "posts" }));
        assert_eq!(posts.entry_path("dir1/dir2/slug").as_deref(), Some("posts/dir1/dir2/slug.md"));

        let trailing = Collection::folder("posts", "posts/");
        assert_eq!(trailing.entry_path("a").as_deref(), Some("posts/a.md"));
    }

    #[test]
    fn test_entry_slug() {
        let posts = collection(json!({ "type": "folder_based_collection", "folder": "posts" }));
        assert_eq!(posts.entry_slug("posts/dir1/dir2/slug.md").as_deref(), Some("dir1/dir2/slug"));
    }

    #[test]
    fn test_entry_path_slug_round_trip() {
        let posts = collection(json!({ "folder": "content/posts", "format": "json" }));
        for slug in ["hello", "2024/hello-world", "a/b/c"] {
            let path = posts.entry_path(slug).unwrap();
            assert_eq!(posts.entry_slug(&path).as_deref(), Some(slug));
        }

        for folder in ["/posts", "posts/", "/posts/"] {
            let posts = Collection::folder("posts", folder);
            for slug in ["a", "2024/hello-world"] {
                let path = posts.entry_path(slug).unwrap();
                assert_eq!(posts.entry_slug(&path).as_deref(), Some(slug), "folder {folder:?}");
            }
        }
    }

    #[test]
    fn test_entry_slug_rooted_folder() {
        let posts = Collection::folder("posts", "/posts");
        assert_eq!(posts.entry_path("a").as_deref(), Some("/posts/a.md"));
        assert_eq!(posts.entry_slug("/posts/a.md").as_deref(), Some("a"));
    }

    #[test]
    fn test_folder_entry_extension() {
        assert_eq!(Collection::folder("posts", "posts").folder_entry_extension(), "md");
        assert_eq!(collection(json!({ "folder": "p", "format": "toml" })).folder_entry_extension(), "toml");
        assert_eq!(
            collection(json!({ "folder": "p", "format": "json", "extension": ".mdx" })).folder_entry_extension(),
            "mdx"
        );
    }

    #[test]
    fn test_files_entry_path_and_slug() {
        let pages = Collection::files(
            "pages",
            vec![CollectionFile::new("about", "site/about.md"), CollectionFile::new("home", "site/index.md")],
        );
        assert_eq!(pages.entry_path("about").as_deref(), Some("site/about.md"));
        assert_eq!(pages.entry_slug("site/index.md").as_deref(), Some("home"));
        assert!(pages.entry_path("missing").is_none());
        assert!(pages.entry_slug("site/missing.md").is_none());
    }

    #[test]
    fn test_file_label_and_template_name() {
        let pages = collection(json!({
            "name": "pages",
            "files": [{ "name": "about", "file": "about.md", "label": "About page" }]
        }));
        assert_eq!(pages.file_entry_label("about"), Some("About page"));
        assert_eq!(pages.file_entry_label("home"), None);
        assert_eq!(pages.template_name("about"), "about");
        assert_eq!(Collection::folder("posts", "posts").template_name("any"), "posts");
    }

    #[test]
    fn test_fields_media_folders_invalid_collection() {
        assert!(collection(json!({})).fields_media_folders().is_empty());
    }

    #[test]
    fn test_fields_media_folders_folder_collection() {
        let posts = collection(json!({
            "folder": "posts",
            "fields": [
                { "name": "image", "media_folder": "image_media_folder" },
                { "name": "body", "media_folder": "body_media_folder" },
                { "name": "list_1", "field": { "name": "list_1_item", "media_folder": "list_1_item_media_folder" } },
                { "name": "list_2", "fields": [{ "name": "list_2_item", "media_folder": "list_2_item_media_folder" }] }
            ]
        }));
        assert_eq!(
            posts.fields_media_folders(),
            vec![
                "image_media_folder",
                "body_media_folder",
                "list_1_item_media_folder",
                "list_2_item_media_folder",
            ]
        );
    }

    #[test]
    fn test_fields_media_folders_files_collection() {
        let pages = collection(json!({
            "files": [
                { "fields": [{ "name": "image", "media_folder": "image_media_folder" }] },
                { "fields": [{ "name": "body", "media_folder": "body_media_folder" }] },
                { "fields": [{ "name": "list_1", "field": { "name": "list_1_item", "media_folder": "list_1_item_media_folder" } }] },
                { "fields": [{ "name": "list_2", "fields": [{ "name": "list_2_item", "media_folder": "list_2_item_media_folder" }] }] }
            ]
        }));
        assert_eq!(
            pages.fields_media_folders(),
            vec![
                "image_media_folder",
                "body_media_folder",
                "list_1_item_media_folder",
                "list_2_item_media_folder",
            ]
        );
    }

    #[test]
    fn test_select_field() {
        let c = collection(json!({
            "fields": [
                { "name": "en", "fields": [{ "name": "title" }, { "name": "body" }] },
                { "name": "it", "field": { "name": "title", "fields": [{ "name": "subTitle" }] } }
            ]
        }));
        assert!(std::ptr::eq(c.select_field("en").unwrap(), &c.fields[0]));
        assert!(std::ptr::eq(c.select_field("en.title").unwrap(), &c.fields[0].children()[0]));
        assert_eq!(c.select_field("it.title.subTitle").unwrap().name, "subTitle");
        assert!(c.select_field("it.subTitle").is_none());
    }

    #[test]
    fn test_identifier_field() {
        let c = collection(json!({ "fields": [{ "name": "Title" }, { "name": "body" }] }));
        assert_eq!(c.identifier_field(), Some("title"));

        let c = collection(json!({ "identifier_field": "name", "fields": [{ "name": "name" }, { "name": "title" }] }));
        assert_eq!(c.identifier_field(), Some("name"));

        let c = collection(json!({ "identifier_field": "missing", "fields": [{ "name": "path" }] }));
        assert_eq!(c.identifier_field(), Some("path"));

        let c = collection(json!({ "fields": [{ "name": "body" }] }));
        assert_eq!(c.identifier_field(), None);
    }

    #[test]
    fn test_extra_attributes_preserved() {
        let value = json!({
            "name": "posts",
            "label": "Posts",
            "folder": "_posts",
            "sortable_fields": ["title"],
            "fields": [{ "name": "title", "widget": "string" }]
        });
        let posts = collection(value.clone());
        assert_eq!(posts.extra.get("sortable_fields"), Some(&json!(["title"])));
        assert_eq!(serde_json::to_value(&posts).unwrap(), value);
    }
}
