//! Always-failing backend — models a structurally absent store.
//!
//! Every operation returns `StorageError::Unavailable`. The session's
//! persistence adapter must degrade gracefully against this backend: loads
//! fall back to defaults, writes are dropped, nothing propagates.

use askdesk_core::error::StorageError;
use askdesk_core::storage::KeyValueStore;
use async_trait::async_trait;

/// A store whose every call fails.
pub struct UnavailableStore;

impl UnavailableStore {
    fn err() -> StorageError {
        StorageError::Unavailable("storage backend is not available".into())
    }
}

#[async_trait]
impl KeyValueStore for UnavailableStore {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(Self::err())
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(Self::err())
    }

    async fn list(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
        Err(Self::err())
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(Self::err())
    }
}
