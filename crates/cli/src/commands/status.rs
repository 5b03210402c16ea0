//! `askdesk status` — Show configuration and storage status.

use askdesk_config::WidgetConfig;
use askdesk_session::{KNOWLEDGE_KEY, MESSAGE_KEY_PREFIX};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!();
    println!("  askdesk status");
    println!("  --------------");
    println!("  Config dir:   {}", WidgetConfig::config_dir().display());
    println!("  API key:      {}", if config.has_api_key() { "configured" } else { "MISSING" });
    println!("  Model:        {}", config.model);
    println!("  Max tokens:   {}", config.max_tokens);
    println!("  Language:     {}", config.language().display_name());
    println!("  Storage:      {}", config.storage.backend);

    let store = crate::wiring::store_from_config(&config.storage);
    if store.available() {
        let stored_messages = store.list(MESSAGE_KEY_PREFIX).await.len();
        let has_knowledge = store.get(KNOWLEDGE_KEY).await.is_some();
        println!("  Messages:     {stored_messages} persisted");
        println!(
            "  Knowledge:    {}",
            if has_knowledge { "custom text persisted" } else { "built-in default" }
        );
    } else {
        println!("  Messages:     not persisted (no storage backend)");
    }
    println!();

    Ok(())
}
