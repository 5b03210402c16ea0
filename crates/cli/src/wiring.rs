//! Builds runtime components from configuration.

use std::sync::Arc;

use askdesk_config::{StorageConfig, WidgetConfig};
use askdesk_session::Persistence;
use askdesk_storage::{FileStore, InMemoryStore};

/// Construct the persistence layer named by the storage config.
///
/// Backends: "memory" (process-lifetime only), "file" (JSON file, defaulting
/// to `~/.askdesk/store.json`), "none" (no persistence at all). Unknown
/// names were already rejected by config validation, but fall back to no
/// persistence rather than failing here.
pub fn store_from_config(storage: &StorageConfig) -> Persistence {
    match storage.backend.as_str() {
        "memory" => Persistence::new(Arc::new(InMemoryStore::new())),
        "file" => {
            let path = storage
                .path
                .clone()
                .unwrap_or_else(FileStore::default_path);
            Persistence::new(Arc::new(FileStore::new(path)))
        }
        _ => Persistence::none(),
    }
}

/// Construct the completion client from configuration.
pub fn client_from_config(
    config: &WidgetConfig,
) -> Result<askdesk_completion::AnthropicClient, String> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| "no API key configured".to_string())?;
    Ok(askdesk_completion::AnthropicClient::new(api_key).with_base_url(&config.base_url))
}
