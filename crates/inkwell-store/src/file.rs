//! Flat-file post store.
//!
//! Layout: one `<title>.md` file per post in a single directory. Anything
//! else in the directory (subdirectories, other extensions, `.tmp` files) is
//! ignored when listing. Titles may start with a dot, so dot files are posts
//! like any other.

use crate::PostStore;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXTENSION: &str = "md";

/// Store that keeps each post as a markdown file
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the post files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, title: &str) -> StoreResult<PathBuf> {
        if !is_safe_key(title) {
            return Err(StoreError::InvalidKey(title.to_string()));
        }
        Ok(self.dir.join(format!("{title}.{EXTENSION}")))
    }
}

/// A title is usable as a file stem when it cannot escape the directory.
fn is_safe_key(title: &str) -> bool {
    !title.is_empty()
        && title != "."
        && title != ".."
        && !title.contains(['/', '\\', '\0'])
}

impl PostStore for FileStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        let mut titles = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => titles.push(stem.to_string()),
                None => warn!("Skipping non UTF-8 entry file: {}", path.display()),
            }
        }
        titles.sort();
        Ok(titles)
    }

    fn get_entry(&self, title: &str) -> StoreResult<Option<String>> {
        let Ok(path) = self.entry_path(title) else {
            return Ok(None);
        };
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StoreError::InvalidEncoding {
                title: title.to_string(),
            })
    }

    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()> {
        let path = self.entry_path(title)?;
        // Write beside the target and rename so readers never see a partial file
        let tmp = self.dir.join(format!(".{title}.{EXTENSION}.tmp"));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn delete_entry(&self, title: &str) -> StoreResult<()> {
        let path = self.entry_path(title)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, title: &str) -> StoreResult<bool> {
        Ok(self.entry_path(title).is_ok_and(|path| path.is_file()))
    }
}
