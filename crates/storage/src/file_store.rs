//! File-based backend — persistent single-file JSON storage.
//!
//! All keys live in one JSON object file (key → value map). The map is
//! loaded into memory on creation and flushed to disk on every mutation.
//! This gives fast reads with durable writes.
//!
//! Default location: `~/.askdesk/store.json`

use askdesk_core::error::StorageError;
use askdesk_core::storage::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A file-backed key-value store.
///
/// If the file exists, entries are loaded from it. A file that fails to
/// parse is logged and treated as empty (it will be overwritten on the
/// next write). A missing file starts empty and is created on first write.
pub struct FileStore {
    path: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStore {
    /// Create a new file-backed store at the given path.
    pub fn new(path: PathBuf) -> Self {
        let entries = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = entries.len(), "File store loaded");
        Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Default path: `~/.askdesk/store.json`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".askdesk").join("store.json")
    }

    fn load_from_disk(path: &PathBuf) -> HashMap<String, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return HashMap::new(), // File doesn't exist yet — start empty
        };

        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Store file corrupt, starting empty");
                HashMap::new()
            }
        }
    }

    /// Flush all entries to disk as a single JSON object.
    async fn flush(&self) -> Result<(), StorageError> {
        let entries = self.entries.read().await;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Unavailable(format!("Failed to create store directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(&*entries).map_err(|e| {
            StorageError::Unavailable(format!("Failed to serialize store: {e}"))
        })?;

        std::fs::write(&self.path, content)
            .map_err(|e| StorageError::Unavailable(format!("Failed to write store file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.flush().await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .entries
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            self.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn set_and_get_persists() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp); // Close file so backend can use it

        let store = FileStore::new(path.clone());
        store.set("chat:100", r#"{"id":100}"#).await.unwrap();

        // Verify file was written
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("chat:100"));

        // Reload from disk — should find the entry
        let store2 = FileStore::new(path);
        assert_eq!(
            store2.get("chat:100").await.unwrap().as_deref(),
            Some(r#"{"id":100}"#)
        );
    }

    #[tokio::test]
    async fn delete_persists() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let store = FileStore::new(path.clone());
        store.set("chat:1", "a").await.unwrap();
        store.delete("chat:1").await.unwrap();

        let store2 = FileStore::new(path);
        assert!(store2.get("chat:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn handles_missing_file_gracefully() {
        let path = PathBuf::from("/tmp/askdesk_test_nonexistent_store.json");
        let _ = std::fs::remove_file(&path);
        let store = FileStore::new(path);
        assert!(store.get("chat:1").await.unwrap().is_none());
        assert!(store.list("chat:").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn handles_corrupt_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "this is not json").unwrap();
        let path = tmp.path().to_path_buf();

        // Corrupt file is treated as empty, not an error
        let store = FileStore::new(path);
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let store = FileStore::new(path);
        store.set("chat:1", "a").await.unwrap();
        store.set("knowledge_text", "b").await.unwrap();

        let keys = store.list("chat:").await.unwrap();
        assert_eq!(keys, vec!["chat:1"]);
    }
}
