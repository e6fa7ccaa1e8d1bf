use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{collections::{Collection, CollectionType}, config::ConfigDocument};

/// Collections of a loaded config, keyed by name in config order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collections {
    collections: IndexMap<String, Collection>,
}

impl Collections {
    /// Build the lookup map from a config document.
    ///
    /// Returns `None` while no config has been loaded. Every collection is
    /// tagged with its storage type (`folder` or `files` key) and inserted
    /// under its name; a repeated name replaces the earlier definition in
    /// place.
    pub fn normalize(config: Option<&ConfigDocument>) -> Option<Collections> {
        let config = config?;
        let mut collections = IndexMap::with_capacity(config.collections.len());

        for collection in &config.collections {
            let mut collection = collection.clone();
            if collection.folder.is_some() {
                collection.collection_type = Some(CollectionType::Folder);
            } else if collection.files.is_some() {
                collection.collection_type = Some(CollectionType::Files);
            }

            debug!(
                name = %collection.name,
                kind = ?collection.collection_type,
                fields = collection.fields.len(),
                "normalized collection"
            );

            let name = collection.name.clone();
            if collections.insert(name.clone(), collection).is_some() {
                warn!(%name, "duplicate collection name, keeping the last definition");
            }
        }

        Some(Self { collections })
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect::<Vec<_>>()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Collection)> {
        self.collections.iter()
    }
}

impl<'a> IntoIterator for &'a Collections {
    type Item = (&'a String, &'a Collection);
    type IntoIter = indexmap::map::Iter<'a, String, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: serde_json::Value) -> ConfigDocument {
        ConfigDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_state() {
        assert_eq!(Collections::normalize(None), None);
    }

    #[test]
    fn test_load_collections_from_config() {
        let config = config(json!({
            "collections": [{
                "name": "posts",
                "folder": "_posts",
                "fields": [{ "name": "title", "widget": "string" }]
            }]
        }));

        let collections = Collections::normalize(Some(&config)).unwrap();
        assert_eq!(collections.len(), 1);

        let expected: Collection = serde_json::from_value(json!({
            "name": "posts",
            "folder": "_posts",
            "fields": [{ "name": "title", "widget": "string" }],
            "type": "folder_based_collection"
        }))
        .unwrap();
        assert_eq!(collections.get("posts"), Some(&expected));
    }

    #[test]
    fn test_tags_file_collections() {
        let config = config(json!({
            "collections": [
                { "name": "pages", "files": [{ "name": "about", "file": "about.md" }] },
                { "name": "posts", "folder": "_posts" }
            ]
        }));

        let collections = Collections::normalize(Some(&config)).unwrap();
        assert!(collections.contains("pages"));
        assert!(collections.contains("posts"));
        assert!(!collections.contains("authors"));
        assert_eq!(collections.get("pages").unwrap().collection_type, Some(CollectionType::Files));
        assert_eq!(collections.get("posts").unwrap().collection_type, Some(CollectionType::Folder));
    }

    #[test]
    fn test_preserves_config_order() {
        let config = config(json!({
            "collections": [
                { "name": "zeta", "folder": "z" },
                { "name": "alpha", "folder": "a" },
                { "name": "mid", "files": [] }
            ]
        }));

        let collections = Collections::normalize(Some(&config)).unwrap();
        assert_eq!(collections.names(), vec!["zeta", "alpha", "mid"]);
        let iterated: Vec<_> = (&collections).into_iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(iterated, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let config = config(json!({
            "collections": [
                { "name": "posts", "folder": "old" },
                { "name": "pages", "files": [] },
                { "name": "posts", "folder": "new" }
            ]
        }));

        let collections = Collections::normalize(Some(&config)).unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections.names(), vec!["posts", "pages"]);
        assert_eq!(collections.get("posts").unwrap().folder.as_deref(), Some("new"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let config = config(json!({ "collections": [{ "name": "b", "folder": "b" }, { "name": "a", "folder": "a" }] }));
        let collections = Collections::normalize(Some(&config)).unwrap();
        let text = serde_json::to_string(&collections).unwrap();
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
    }
}
