use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use tracing::warn;

use crate::{
    collections::{Collection, CollectionType, Entry, Field, fields_with_media_folders},
    config::ConfigDocument,
    media::FolderEvaluator,
};

/// Every repository folder that may hold media of `entry`.
///
/// The collection folder comes first, then the folder of the matched file
/// (file collections), then the folders of the fields in depth-first order. Folders are listed once, in
/// first-seen order, without leading or trailing `/`.
pub fn media_folders(config: &ConfigDocument, collection: &Collection, entry: &Entry) -> Vec<String> {
    media_folders_at(config, collection, entry, Utc::now())
}

/// [`media_folders`] with an explicit date for `{{year}}`-style placeholders.
pub fn media_folders_at(
    config: &ConfigDocument,
    collection: &Collection,
    entry: &Entry,
    date: DateTime<Utc>,
) -> Vec<String> {
    let evaluator = FolderEvaluator::new(config, collection, entry, date);
    let file = evaluator.file();
    if collection.kind() == CollectionType::Files && file.is_none() {
        warn!(
            collection = %collection.name,
            slug = %entry.slug,
            "entry matches no declared file"
        );
    }

    let mut folders = IndexSet::new();
    if collection.media_folder.is_some() {
        folders.insert(evaluator.collection_media_folder());
    }
    if file.is_some() {
        folders.insert(evaluator.media_folder(None));
    }

    let fields: &[Field] = match collection.kind() {
        CollectionType::Folder => &collection.fields,
        CollectionType::Files => file.map(|file| file.fields.as_slice()).unwrap_or_default(),
    };

    for field in fields_with_media_folders(fields) {
        folders.insert(evaluator.media_folder(Some(field)));
    }

    folders
        .into_iter()
        .filter(|folder| !folder.is_empty())
        .collect()
}
