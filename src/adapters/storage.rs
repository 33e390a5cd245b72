use crate::domain::ports::KeyValueStore;
use crate::utils::error::{CatalogError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// 以單一 JSON 物件存放在本機檔案的鍵值儲存
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Overwriting unreadable store {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // 先寫暫存檔再 rename，避免寫到一半的檔案
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp_path, &self.path).map_err(|e| CatalogError::StorageError {
            key: key.to_string(),
            message: format!("could not replace {}: {}", self.path.display(), e),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trips_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("store.json");

        let mut store = FileKeyValueStore::new(&path);
        assert_eq!(store.get("redcross-bookmarks").unwrap(), None);

        store.set("redcross-bookmarks", "[1,2]").unwrap();
        store.set("theme", "dark").unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(reopened.get("redcross-bookmarks").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file_errors_on_read_and_recovers_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = FileKeyValueStore::new(&path);
        assert!(store.get("redcross-bookmarks").is_err());

        store.set("redcross-bookmarks", "[4]").unwrap();
        assert_eq!(store.get("redcross-bookmarks").unwrap().as_deref(), Some("[4]"));
    }
}
