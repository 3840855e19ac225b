//! `mnemo chat` — interactive or single-message chat mode.

use crate::transcript::TranscriptWriter;
use anyhow::Context;
use mnemo_agent::{MemoryPolicy, Session, Turn};
use mnemo_config::AppConfig;
use mnemo_core::identity::Identity;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

pub async fn run(message: Option<String>) -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load config")?;
    // AppConfig's Debug impl redacts the API key.
    debug!(?config, "Loaded configuration");

    let provider = mnemo_providers::build_from_config(&config)
        .context("failed to build model provider")?;
    let tools = Arc::new(mnemo_tools::default_registry());

    let identity = match &config.system_prompt_override {
        Some(prompt) => Identity::from_prompt("mnemo", prompt),
        None => Identity::with_tools("mnemo", &tools),
    };

    let policy = MemoryPolicy::from_config(&config.memory);
    let mut session = Session::new(
        provider,
        &config.model,
        config.temperature,
        tools,
        identity,
        policy,
    );

    if let Some(msg) = message {
        // Single message mode: no transcript, print the result and exit.
        let result = session.process(&msg).await?;
        println!("{result}");
        return Ok(());
    }

    // Interactive mode.
    let mut transcript = if config.transcript.enabled {
        let dir = PathBuf::from(&config.transcript.dir);
        let writer = TranscriptWriter::create(&dir)?;
        info!(path = %writer.path().display(), "Transcript enabled");
        Some(writer)
    } else {
        None
    };

    println!();
    println!("mnemo — provider: {}, model: {}", config.provider, config.model);
    println!("Type 'exit' or 'quit' to end the chat.");
    println!();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    print!("You: ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print!("You: ");
            std::io::stdout().flush()?;
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        match session.process(input).await {
            Ok(result) => {
                println!("Agent: {result}");
                if let Some(writer) = transcript.as_mut() {
                    writer.record(&Turn {
                        user_input: input.to_string(),
                        result,
                    })?;
                }
            }
            Err(e) => {
                // Unknown tools and transport failures surface here; the
                // session stays usable for the next turn.
                warn!(error = %e, "Turn failed");
                eprintln!("[error] {e}");
            }
        }
        println!();

        print!("You: ");
        std::io::stdout().flush()?;
    }

    if let Some(writer) = transcript {
        writer.close()?;
    }

    println!("Goodbye!");
    Ok(())
}
