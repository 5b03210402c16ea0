//! The persistence adapter — an optional store with failure absorption.
//!
//! Wraps an optional [`KeyValueStore`] and catches every failure at the
//! call site: a failed or absent store reads as "value absent" and writes
//! as "write did not happen". Failures are logged, never propagated, and
//! never retried. The session layers above treat the returned values as
//! best-effort mirrors of their in-memory state.

use askdesk_core::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key prefix for individual chat messages: `chat:<message-id>`.
pub const MESSAGE_KEY_PREFIX: &str = "chat:";

/// The single fixed key for the knowledge text.
pub const KNOWLEDGE_KEY: &str = "knowledge_text";

/// A persistence side-channel that can never fail its caller.
#[derive(Clone)]
pub struct Persistence {
    store: Option<Arc<dyn KeyValueStore>>,
}

impl Persistence {
    /// Wrap a store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store: Some(store) }
    }

    /// No backing store at all — everything degrades to in-memory-only.
    pub fn none() -> Self {
        Self { store: None }
    }

    /// Whether a backing store is attached. Advisory only: an attached
    /// store may still fail any individual call.
    pub fn available(&self) -> bool {
        self.store.is_some()
    }

    /// Fetch a value. Absent store or failed call both read as `None`.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "Storage get failed, treating as absent");
                None
            }
        }
    }

    /// Store a value. Returns whether the write actually happened.
    pub async fn set(&self, key: &str, value: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.set(key, value).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Storage set failed, value kept in memory only");
                false
            }
        }
    }

    /// List keys under a prefix. Absent store or failed call yield an
    /// empty list.
    pub async fn list(&self, prefix: &str) -> Vec<String> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        match store.list(prefix).await {
            Ok(keys) => keys,
            Err(e) => {
                debug!(prefix, error = %e, "Storage list failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Delete a key. Returns whether the delete actually happened.
    pub async fn delete(&self, key: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.delete(key).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Storage delete failed");
                false
            }
        }
    }
}
