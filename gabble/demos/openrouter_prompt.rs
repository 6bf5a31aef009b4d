//! Single prompt against OpenRouter; multiple choices print separated.
//!
//! Run with `OPENROUTER_API_KEY=... cargo run -p gabble --example openrouter_prompt`.

use gabble::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GabbleConfig::from_env()?;
    let conversation = openrouter_conversation(&config)?
        .with_generation_config(GenerationConfig::default().with_max_output_tokens(512));

    println!("{}", conversation.send("Compare ChatGPT and Gemini.").await?);

    Ok(())
}
