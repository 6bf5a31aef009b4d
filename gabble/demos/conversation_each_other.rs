//! Two conversations debate each other for a few rounds.
//!
//! Run with `GEMINI_API_KEY=... cargo run -p gabble --example conversation_each_other`.

use gabble::prelude::*;
use tracing_subscriber::EnvFilter;

const CONTEXT: &str = "For large-scale system development";
const FIRST: &str = "Java";
const SECOND: &str = "Python";
const ROUNDS: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GabbleConfig::from_env()?;
    let mut first = gemini_conversation(&config)?;
    let mut second = gemini_conversation(&config)?;
    for conversation in [&mut first, &mut second] {
        *conversation.safety_settings_mut() =
            uniform_safety_settings(HarmBlockThreshold::BlockNone);
    }

    let theme = format!("{CONTEXT}, let's debate which is better: {FIRST} or {SECOND}.\n\n");
    let mut first_reply = first
        .send(format!(
            "{theme}**Important:** argue that {FIRST} is better.\n\n\
             Start by explaining why {FIRST} is better."
        ))
        .await?;
    let mut second_reply = second
        .send(format!(
            "{theme}**Important:** argue that {SECOND} is better.\n\n\
             Start by rebutting the following claim that {FIRST} is better.\n\n\
             Opponent's claim:###{first_reply}###"
        ))
        .await?;

    for round in 1..=ROUNDS {
        println!("round {round}");
        first_reply = first.send(second_reply.as_str()).await?;
        second_reply = second.send(first_reply.as_str()).await?;
    }

    for message in second.history() {
        println!("{}", message.first_text().unwrap_or(""));
        println!("================");
    }

    Ok(())
}
