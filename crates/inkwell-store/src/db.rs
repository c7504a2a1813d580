//! Persistent post store backed by redb.
//!
//! All posts live in one `posts` table. Each write is its own committed
//! transaction; `scan` reads the whole table inside a single read
//! transaction so it sees a consistent snapshot.

use crate::PostStore;
use crate::error::StoreResult;
use crate::tables;
use redb::{Database, ReadableTable};
use std::path::Path;
use tracing::debug;

/// File name used inside the configured data directory
pub const DB_FILE_NAME: &str = "inkwell.redb";

/// Post store in a single redb database file
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the redb database at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Create the table eagerly so later read txns don't fail
        let write_txn = db.begin_write()?;
        {
            let _t = write_txn.open_table(tables::POSTS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl PostStore for RedbStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::POSTS)?;
        let mut titles = Vec::new();
        for entry in table.iter()? {
            let entry = entry?;
            titles.push(entry.0.value().to_string());
        }
        Ok(titles)
    }

    fn get_entry(&self, title: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::POSTS)?;
        Ok(table.get(title)?.map(|v| v.value().to_string()))
    }

    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::POSTS)?;
            table.insert(title, content)?;
        }
        write_txn.commit()?;
        debug!("Saved post '{}' ({} bytes)", title, content.len());
        Ok(())
    }

    fn delete_entry(&self, title: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::POSTS)?;
            table.remove(title)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn exists(&self, title: &str) -> StoreResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::POSTS)?;
        Ok(table.get(title)?.is_some())
    }

    fn scan(&self) -> StoreResult<Vec<(String, String)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::POSTS)?;
        let mut entries = Vec::new();
        for entry in table.iter()? {
            let entry = entry?;
            entries.push((entry.0.value().to_string(), entry.1.value().to_string()));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, RedbStore) {
        let dir = TempDir::new().unwrap();
        let store = RedbStore::open(dir.path().join(DB_FILE_NAME)).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_get_delete() {
        let (_dir, store) = store();
        store.save_entry("Intro", "# Hi").unwrap();
        assert!(store.exists("Intro").unwrap());
        assert_eq!(store.get_entry("Intro").unwrap().as_deref(), Some("# Hi"));

        store.delete_entry("Intro").unwrap();
        assert!(!store.exists("Intro").unwrap());
        assert_eq!(store.get_entry("Intro").unwrap(), None);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_dir, store) = store();
        store.delete_entry("ghost").unwrap();
        assert!(store.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(DB_FILE_NAME);
        {
            let store = RedbStore::open(&path).unwrap();
            store.save_entry("b", "two").unwrap();
            store.save_entry("a", "one").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.list_entries().unwrap(), vec!["a", "b"]);
        assert_eq!(
            store.scan().unwrap(),
            vec![
                ("a".to_string(), "one".to_string()),
                ("b".to_string(), "two".to_string())
            ]
        );
    }
}
