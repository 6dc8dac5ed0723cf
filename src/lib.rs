//! # Travel Content
//!
//! Turns AI-generated travel text into typed records for a Philippines
//! travel catalog: destinations, local foods, places, events, and
//! day-by-day itineraries.
//!
//! Model output is messy. A response may be clean JSON, a fenced JSON
//! block with trailing commas, a numbered markdown list, labelled blocks
//! (`Name:`, `Price:`), or a paragraph of prose. Every parser accepts all
//! of these and always returns usable, defaulted records.
//!
//! ## Core Concepts
//!
//! - **[`content`]**: the pure, synchronous parsers. Start here if you
//!   already have the text.
//! - **[`ContentGenerator`]**: renders a prompt, calls a [`Backend`]
//!   through [`with_backoff`](backend::with_backoff), and parses the reply.
//! - **[`ParserDefaults`]**: placeholder images, default tags and types,
//!   and length limits, loadable from JSON (or YAML with the `yaml` feature).
//!
//! ## Quick Start
//!
//! ```
//! use travel_content::content::{parse_itinerary_content, parse_foods};
//!
//! let foods = parse_foods("1. Lechon\nPrice: 500 - 1,000", "Cebu", 3);
//! assert_eq!(foods[0].price_range, "₱500 - ₱1,000");
//!
//! let text = "Day 1\n9:00 AM Magellan's Cross\nEntrance fee: free";
//! let plan = parse_itinerary_content(text, "Cebu");
//! assert_eq!(plan.sections[0].places[0].entrance_fee.as_deref(), Some("Free"));
//! ```
//!
//! ## Generating
//!
//! ```no_run
//! use travel_content::{BackoffConfig, ContentGenerator, LlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = ContentGenerator::new("http://localhost:11434", "llama3.2:3b")
//!         .with_llm_config(LlmConfig::default().with_temperature(0.4))
//!         .with_backoff(BackoffConfig::interactive());
//!
//!     let itinerary = generator.itinerary("Bohol", 2).await?;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod content;
pub mod error;
pub mod generator;
pub mod output_parser;
pub mod prompt;

pub use backend::{Backend, BackoffConfig, MockBackend, OllamaBackend};
pub use client::LlmConfig;
pub use content::{
    DestinationRecord, EventRecord, FoodRecord, ItineraryPlace, ItinerarySection,
    ItineraryStructure, ParserDefaults, PlaceRecord, Region,
};
pub use error::{ContentError, Result};
pub use generator::ContentGenerator;
