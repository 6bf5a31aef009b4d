//! Ask a question about a PNG screenshot.
//!
//! Run with `GEMINI_API_KEY=... cargo run -p gabble --example image_prompt -- path/to/image.png`.

use gabble::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "test.png".to_string());
    let image = std::fs::read(&path)?;

    let config = GabbleConfig::from_env()?;
    let prompt = image_prompt(&config)?;
    let question = "When this message shows up, what should I usually do?";

    println!("tokens: {}", prompt.count_tokens(question, &image).await?);
    println!("{}", prompt.send(question, &image).await?);

    Ok(())
}
