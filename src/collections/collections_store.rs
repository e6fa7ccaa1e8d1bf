use std::{path::Path, sync::{Arc, PoisonError, RwLock}};

use once_cell::sync::Lazy;
use tracing::info;

use crate::{collections::{Collection, Collections}, config::{ConfigDocument, ConfigError}};

static GLOBAL_STORE: Lazy<CollectionsStore> = Lazy::new(CollectionsStore::new);

/// Holder of the current normalized collections.
///
/// The map is never mutated in place: every load builds a new
/// [`Collections`] and swaps the shared pointer, so a reader holding a
/// snapshot keeps seeing the config it started with.
#[derive(Debug, Default)]
pub struct CollectionsStore {
    current: RwLock<Option<Arc<Collections>>>,
}

impl CollectionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store shared by every caller.
    pub fn global() -> &'static CollectionsStore {
        &GLOBAL_STORE
    }

    /// Replace the current collections with the ones of `config`.
    pub fn load(&self, config: &ConfigDocument) -> Arc<Collections> {
        let collections = Arc::new(Collections::normalize(Some(config)).unwrap_or_default());

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&collections));
        info!(count = collections.len(), "collections config loaded");

        collections
    }

    /// Read a config file and load its collections.
    ///
    /// On error the current collections are left untouched.
    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<Arc<Collections>, ConfigError> {
        let config = ConfigDocument::load_from_file(path).await?;
        Ok(self.load(&config))
    }

    /// Current collections, `None` until a config has been loaded.
    pub fn snapshot(&self) -> Option<Arc<Collections>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn collection(&self, name: &str) -> Option<Collection> {
        self.snapshot()?.get(name).cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Drop the current collections, back to the unloaded state.
    pub fn clear(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = None;
    }
}
