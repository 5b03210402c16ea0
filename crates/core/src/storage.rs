//! KeyValueStore trait — the abstraction over the persistence collaborator.
//!
//! The widget persists chat messages and the knowledge text through a plain
//! key-value interface. Every operation is independently failable; callers
//! above the persistence adapter treat any failure as "value absent" /
//! "write did not happen". No operation is retried automatically.
//!
//! Implementations: in-memory, file-backed, unavailable (always-failing).

use async_trait::async_trait;

use crate::error::StorageError;

/// The core KeyValueStore trait.
///
/// Keys are namespaced by the session: `chat:<message-id>` for individual
/// messages, and a single fixed key for the knowledge text.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// The backend name (e.g., "memory", "file", "unavailable").
    fn name(&self) -> &str;

    /// Fetch a value by key. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    /// Store a value under a key, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    /// List all keys starting with the given prefix. Order is unspecified.
    async fn list(&self, prefix: &str) -> std::result::Result<Vec<String>, StorageError>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> std::result::Result<(), StorageError>;
}
