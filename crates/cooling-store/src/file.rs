//! File-backed store, one JSON file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Store, StoreError};

const EXTENSION: &str = "json";

/// Store that keeps each key in its own file under a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::OpenError(format!("{}: {}", root.display(), e)))?;
        debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// Directory holding the store files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key(key) {
            return Err(StoreError::StoreError(format!(
                "invalid key {:?}: file store keys use only letters, digits, '-' and '_'",
                key
            )));
        }
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }
}

/// Keys map to file names verbatim, so `keys()` returns exactly what was
/// written.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Store for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    keys.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("storage");
        let store = FileStore::open(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set_raw("raheemCoolingCart", "[]").unwrap();
        assert_eq!(
            store.get_raw("raheemCoolingCart").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("raheemCoolingCart.json").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .set_raw("visits", "279")
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_raw("visits").unwrap().as_deref(), Some("279"));
    }

    #[test]
    fn test_missing_key_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.get_raw("missing").unwrap().is_none());
        assert!(store.delete("missing").is_ok());

        store.set_raw("k", "v").unwrap();
        store.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
    }

    #[test]
    fn test_keys_lists_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set_raw("b", "1").unwrap();
        store.set_raw("a", "2").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unsafe_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["../etc/passwd", "product 7", "product.7", ""] {
            assert!(matches!(
                store.set_raw(key, "1"),
                Err(StoreError::StoreError(_))
            ));
            assert!(store.get_raw(key).is_err());
        }
        assert!(store.keys().unwrap().is_empty());

        store.set_raw("product-7", "5").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["product-7"]);
        assert_eq!(store.get_raw("product-7").unwrap().as_deref(), Some("5"));
    }
}
