//! A conversation that answers through a registered `getEvents` function.
//!
//! Run with `GEMINI_API_KEY=... cargo run -p gabble --example function_conversation`.

use gabble::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GabbleConfig::from_env()?;
    let mut conversation = gemini_conversation(&config)?;
    conversation.set_generation_config(GenerationConfig::default().with_temperature(0.3));

    let declaration = integer_function(
        "getEvents",
        "Look up the events held on a given day",
        &[
            ("year", "Year (Gregorian)"),
            ("month", "Month"),
            ("day", "Day of month"),
        ],
    );
    conversation
        .functions_mut()
        .register_sync_fn(declaration, |args| {
            let year = parse_arg::<i32>(&args, "year")?;
            let month = parse_arg::<u32>(&args, "month")?;
            let day = parse_arg::<u32>(&args, "day")?;
            tracing::info!(year, month, day, "looking up events");

            json_output(json!({
                "events": [
                    {"name": "Members meetup", "place": "Tokyo"},
                    {"name": "Training camp", "place": "Sapporo"},
                    {"name": "Study group", "place": "Kyoto"},
                    {"name": "Assembly", "place": "Fukuoka"},
                    {"name": "Seminar", "place": "Osaka"}
                ]
            }))
        });

    let question = "Use the provided function to answer the question below.\n\n\
                    Question###\nWhich events are held on March 25th, 2024?\n###";
    let turn = conversation.send_turn(question).await?;

    println!("{}", turn.text);
    println!(
        "round trips: {}, messages appended: {}",
        turn.round_trips, turn.messages_appended
    );

    Ok(())
}
