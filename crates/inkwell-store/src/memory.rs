//! In-memory post store.

use crate::PostStore;
use crate::error::StoreResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Volatile store backed by a sorted map
///
/// Used by tests and by the `memory` backend; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no posts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl PostStore for MemoryStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn get_entry(&self, title: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(title).cloned())
    }

    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()> {
        self.entries
            .write()
            .insert(title.to_string(), content.to_string());
        Ok(())
    }

    fn delete_entry(&self, title: &str) -> StoreResult<()> {
        self.entries.write().remove(title);
        Ok(())
    }

    fn exists(&self, title: &str) -> StoreResult<bool> {
        Ok(self.entries.read().contains_key(title))
    }

    fn scan(&self) -> StoreResult<Vec<(String, String)>> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
