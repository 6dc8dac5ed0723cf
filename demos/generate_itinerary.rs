//! Example: generating an itinerary, with a canned response by default.
//!
//! Run with: `RUST_LOG=debug cargo run --example generate_itinerary`
//! Pass `--live <model>` to call a local Ollama server instead.

use std::sync::Arc;

use travel_content::{BackoffConfig, ContentGenerator, MockBackend};

const CANNED: &str = "\
# A Weekend in Old Manila

Day 1: Intramuros
- 8:00 AM Visit Fort Santiago for a historical walk
Entrance fee: ₱75
Duration: 2 hours
- 11:00 AM San Agustin Church
- 1:00 PM Lunch at Barbara's Heritage Restaurant

Day 2: Bay and Markets
Morning: 9:00 AM Explore Binondo food crawl
Evening: 6:00 PM Manila Bay sunset";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let generator = match args.iter().position(|a| a == "--live") {
        Some(i) => {
            let model = args.get(i + 1).map_or("llama3.2:3b", String::as_str);
            ContentGenerator::new("http://localhost:11434", model)
                .with_backoff(BackoffConfig::interactive())
        }
        None => ContentGenerator::new("http://unused", "mock")
            .with_backend(Arc::new(MockBackend::fixed(CANNED))),
    };

    let itinerary = generator.itinerary("Manila", 2).await?;
    println!("{}", itinerary.title);
    for section in &itinerary.sections {
        println!("\n{}", section.title);
        for place in &section.places {
            let fee = place.entrance_fee.as_deref().unwrap_or("-");
            println!("  {:>8}  {}  (fee: {fee})", place.time, place.name);
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&itinerary)?);
    Ok(())
}
