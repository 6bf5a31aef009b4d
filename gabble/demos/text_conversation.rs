//! Two-turn text conversation with token counts and the full history printed.
//!
//! Run with `GEMINI_API_KEY=... cargo run -p gabble --example text_conversation`.

use gabble::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GabbleConfig::from_env()?;
    let mut conversation = gemini_conversation(&config)?;
    *conversation.safety_settings_mut() = uniform_safety_settings(HarmBlockThreshold::BlockNone);

    for prompt in [
        "Make up a small logic puzzle.",
        "Walk me through the solution to that puzzle step by step.",
    ] {
        println!("tokens: {}", conversation.count_tokens(prompt).await?);
        conversation.send(prompt).await?;
    }

    for message in conversation.history() {
        println!("[{}] {}", message.role.as_str(), message.first_text().unwrap_or(""));
    }

    Ok(())
}
