use serde::{Deserialize, Serialize};

/// How a collection stores its entries.
///
/// - `Folder`: every entry is a file under the collection's `folder`, named by slug.
/// - `Files`: entries are a fixed list of files declared in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionType {
    #[serde(rename = "folder_based_collection")]
    Folder,
    #[serde(rename = "file_based_collection")]
    Files,
}
