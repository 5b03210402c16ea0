//! `askdesk onboard` — First-time setup.

use askdesk_config::WidgetConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = WidgetConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("askdesk — First-Time Setup");
    println!("==========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\nConfig already exists at: {}", config_path.display());
        println!("Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, WidgetConfig::default_toml())?;
        println!("Created config.toml at: {}", config_path.display());
        println!("\nNext steps:");
        println!("  1. Edit {} and add your API key", config_path.display());
        println!("     (or set the ASKDESK_API_KEY environment variable)");
        println!("  2. Run: askdesk chat\n");
    }

    Ok(())
}
