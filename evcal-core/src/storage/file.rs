//! Directory-backed key-value store: one `<key>.json` file per key.

use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{CalError, CalResult};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CalResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path).map(Some).map_err(|e| {
            CalError::StorageUnavailable(format!("Could not read {}: {}", path.display(), e))
        })
    }

    fn set(&mut self, key: &str, value: &str) -> CalResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CalError::StorageUnavailable(format!(
                "Could not create {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        std::fs::write(&temp, value)
            .and_then(|_| std::fs::rename(&temp, &path))
            .map_err(|e| {
                CalError::StorageUnavailable(format!("Could not write {}: {}", path.display(), e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("calendar-events").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested/data"));

        store.set("calendar-events", "[1]").unwrap();
        store.set("calendar-events", "[2]").unwrap();

        assert_eq!(store.get("calendar-events").unwrap().as_deref(), Some("[2]"));
        assert!(store.path_for("calendar-events").exists());
        assert!(!store.dir().join("calendar-events.json.tmp").exists());
    }

    #[test]
    fn unreadable_path_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        // A directory where the file should be cannot be read as text.
        std::fs::create_dir_all(store.path_for("calendar-events")).unwrap();

        let err = store.get("calendar-events").unwrap_err();
        assert!(matches!(err, CalError::StorageUnavailable(_)));
    }
}
