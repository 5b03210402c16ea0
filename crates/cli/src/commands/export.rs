//! `askdesk export` — Write the persisted chat history to a dated JSON file.

use askdesk_config::WidgetConfig;
use askdesk_session::MessageLog;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = crate::wiring::store_from_config(&config.storage);

    if !store.available() {
        return Err("storage backend is 'none'; there is no persisted history to export".into());
    }

    let log = MessageLog::new(store);
    log.load_all(config.language()).await;

    let snapshot = log.export_snapshot().await;
    std::fs::write(&snapshot.file_name, &snapshot.json)?;
    println!(
        "Exported {} messages to {}",
        log.len().await,
        snapshot.file_name
    );

    Ok(())
}
