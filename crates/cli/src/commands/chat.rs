//! `askdesk chat` — Interactive chat session.

use std::io::Write;
use std::sync::Arc;

use askdesk_config::WidgetConfig;
use askdesk_core::language::Language;
use askdesk_session::{ChatSession, SendOutcome};
use tokio::io::AsyncBufReadExt;

pub async fn run(language: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable:");
        eprintln!("    export ASKDESK_API_KEY='sk-ant-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            WidgetConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let start_language = match language {
        Some(code) => Language::from_code(&code)?,
        None => config.language(),
    };

    let client = Arc::new(crate::wiring::client_from_config(&config)?);
    let store = crate::wiring::store_from_config(&config.storage);

    let session = ChatSession::new(client, store)
        .with_model(&config.model)
        .with_max_tokens(config.max_tokens)
        .with_language(start_language);
    session.mount().await;

    println!();
    println!("  askdesk — Interactive Chat");
    println!();
    println!("  Model:    {}", config.model);
    println!("  Storage:  {}", config.storage.backend);
    println!("  Language: {}", start_language.display_name());
    println!();
    println!("  Commands: /lang <code>, /train <text|@file>, /clear, /export, /quit");
    println!();

    for message in session.messages().await {
        println!("  {} > {}", message.sender, message.text);
    }
    println!();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(&session, command).await? {
                break;
            }
            prompt()?;
            continue;
        }

        match session.send(line).await {
            SendOutcome::Replied(reply) => {
                println!();
                for text_line in reply.text.lines() {
                    println!("  bot > {text_line}");
                }
                println!();
            }
            SendOutcome::Ignored => {}
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  you > ");
    std::io::stdout().flush()
}

/// Handle a slash command. Returns `false` when the session should end.
async fn handle_command(
    session: &ChatSession,
    command: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" => return Ok(false),
        "lang" => match Language::from_code(arg) {
            Ok(language) => {
                session.set_language(language).await;
                println!("  [switched to {}]", language.display_name());
            }
            Err(_) => {
                let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
                println!("  [unknown language '{arg}'; one of: {}]", codes.join(", "));
            }
        },
        "train" => {
            let text = if let Some(path) = arg.strip_prefix('@') {
                std::fs::read_to_string(path)?
            } else {
                arg.to_string()
            };
            match session.train(&text).await {
                Ok(outcome) => {
                    if outcome.over_soft_limit {
                        println!("  [knowledge updated; text is large and may slow replies]");
                    } else if outcome.persisted {
                        println!("  [knowledge updated]");
                    } else {
                        println!("  [knowledge updated in memory only]");
                    }
                }
                Err(e) => println!("  [training failed: {e}]"),
            }
        }
        "clear" => {
            session.clear().await;
            for message in session.messages().await {
                println!("  {} > {}", message.sender, message.text);
            }
        }
        "export" => {
            let snapshot = session.export().await;
            std::fs::write(&snapshot.file_name, &snapshot.json)?;
            println!("  [exported to {}]", snapshot.file_name);
        }
        other => println!("  [unknown command '/{other}']"),
    }

    Ok(true)
}
