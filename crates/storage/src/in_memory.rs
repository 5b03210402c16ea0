//! In-memory backend — useful for testing and ephemeral sessions.

use askdesk_core::error::StorageError;
use askdesk_core::storage::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory backend that stores values in a HashMap.
/// Useful for testing and sessions where persistence isn't needed.
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
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
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get() {
        let store = InMemoryStore::new();
        store.set("chat:1", "hello").await.unwrap();
        assert_eq!(store.get("chat:1").await.unwrap().as_deref(), Some("hello"));
        assert!(store.get("chat:2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let store = InMemoryStore::new();
        store.set("chat:1", "a").await.unwrap();
        store.set("chat:2", "b").await.unwrap();
        store.set("knowledge_text", "c").await.unwrap();

        let mut keys = store.list("chat:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["chat:1", "chat:2"]);
    }

    #[tokio::test]
    async fn delete_removes_key() {
        let store = InMemoryStore::new();
        store.set("chat:1", "a").await.unwrap();
        store.delete("chat:1").await.unwrap();
        assert!(store.get("chat:1").await.unwrap().is_none());

        // Deleting an absent key is fine
        store.delete("chat:404").await.unwrap();
    }

    #[tokio::test]
    async fn set_replaces_existing_value() {
        let store = InMemoryStore::new();
        store.set("knowledge_text", "v1").await.unwrap();
        store.set("knowledge_text", "v2").await.unwrap();
        assert_eq!(
            store.get("knowledge_text").await.unwrap().as_deref(),
            Some("v2")
        );
    }
}
