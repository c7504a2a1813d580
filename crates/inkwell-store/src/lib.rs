//! Inkwell Store - post storage backends
//!
//! Posts are plain key-value entries: the title is the key, the raw markdown
//! is the value. Handlers only talk to [`PostStore`]; which backend sits
//! behind it is a configuration decision.
//!
//! Every call is synchronous and atomic from the caller's point of view.
//! Nothing here coordinates multiple calls, so a check-then-write sequence
//! made by a caller can race with another writer.

pub mod db;
pub mod error;
pub mod file;
pub mod memory;
pub mod tables;

pub use db::RedbStore;
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use inkwell_common::config::{StorageBackend, StorageConfig};
use std::sync::Arc;
use tracing::info;

/// Key-value access to posts, keyed by title.
pub trait PostStore: Send + Sync {
    /// All post titles, sorted ascending.
    fn list_entries(&self) -> StoreResult<Vec<String>>;

    /// Raw markdown for `title`, or `None` when there is no such post.
    fn get_entry(&self, title: &str) -> StoreResult<Option<String>>;

    /// Create or overwrite the entry for `title`.
    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()>;

    /// Remove the entry for `title`. Removing a missing entry is a no-op.
    fn delete_entry(&self, title: &str) -> StoreResult<()>;

    /// Whether an entry exists for `title`.
    fn exists(&self, title: &str) -> StoreResult<bool> {
        Ok(self.list_entries()?.iter().any(|t| t == title))
    }

    /// Every `(title, content)` pair, in `list_entries` order.
    ///
    /// Entries deleted between listing and reading are skipped.
    fn scan(&self) -> StoreResult<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for title in self.list_entries()? {
            if let Some(content) = self.get_entry(&title)? {
                entries.push((title, content));
            }
        }
        Ok(entries)
    }
}

/// Open the backend selected by `config`.
pub fn open_store(config: &StorageConfig) -> StoreResult<Arc<dyn PostStore>> {
    let store: Arc<dyn PostStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Files => Arc::new(FileStore::open(&config.data_dir)?),
        StorageBackend::Redb => Arc::new(RedbStore::open(config.data_dir.join(db::DB_FILE_NAME))?),
    };
    info!(
        "Opened {} post store at {}",
        config.backend,
        config.data_dir.display()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Files,
            data_dir: dir.path().join("entries"),
        };
        let store = open_store(&config).unwrap();
        store.save_entry("Intro", "# Hi").unwrap();
        assert!(dir.path().join("entries").join("Intro.md").exists());
    }

    #[test]
    fn test_open_store_redb() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Redb,
            data_dir: dir.path().to_path_buf(),
        };
        let store = open_store(&config).unwrap();
        store.save_entry("Intro", "# Hi").unwrap();
        assert!(dir.path().join(db::DB_FILE_NAME).exists());
        assert_eq!(store.get_entry("Intro").unwrap().as_deref(), Some("# Hi"));
    }

    #[test]
    fn test_scan_and_exists() {
        let store = MemoryStore::new();
        store.save_entry("b", "two").unwrap();
        store.save_entry("a", "one").unwrap();

        assert!(store.exists("a").unwrap());
        assert!(!store.exists("c").unwrap());
        assert_eq!(
            store.scan().unwrap(),
            vec![
                ("a".to_string(), "one".to_string()),
                ("b".to_string(), "two".to_string())
            ]
        );
    }
}
