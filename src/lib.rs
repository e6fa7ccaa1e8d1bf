pub mod config;
pub use config::{ConfigDocument, ConfigError, ConfigFormat, SlugConfig, SlugEncoding};

pub mod collections;
pub use collections::{
    Collection, CollectionFile, CollectionType, Collections, CollectionsStore, Entry, EntryFormat,
    Field, FieldNesting, FieldPath, fields_names,
};

pub mod media;
pub use media::{media_folders, media_folders_at};

pub mod template;
pub use template::{SlugError, slug_formatter};
