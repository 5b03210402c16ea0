//! askdesk CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize the config directory and default config
//! - `chat`    — Interactive chat session
//! - `export`  — Write the persisted chat history to a dated JSON file
//! - `status`  — Show configuration and storage status

use clap::{Parser, Subcommand};

mod commands;
mod wiring;

#[derive(Parser)]
#[command(
    name = "askdesk",
    about = "askdesk — embeddable support chat assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Start an interactive chat session
    Chat {
        /// Language code to start in (en, hi, ta, te, bn, mr)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Write the persisted chat history to a dated JSON file
    Export,

    /// Show configuration and storage status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { language } => commands::chat::run(language).await?,
        Commands::Export => commands::export::run().await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
