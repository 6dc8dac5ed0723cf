//! Travel content extraction from free-form model output.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`model`] | Record types handed to persistence as JSON |
//! | [`defaults`] | [`ParserDefaults`]: placeholder values and limits |
//! | [`classify`] | Single-line classifier shared by every parser |
//! | [`rules`] | Per-entity label tables and routes |
//! | [`machine`] | State machine producing record drafts |
//! | [`fields`] | Price, fee, tag, name and image helpers |
//! | [`region`] | Island-group inference from a place name |
//! | [`destinations`], [`foods`], [`places`], [`itinerary`] | Public parse functions |
//!
//! Every parser first tries a structured JSON decode and falls back to the
//! line-oriented path. Parsers are pure: the same text always yields the
//! same records, and malformed input never fails, it only yields fewer or
//! defaulted records.
//!
//! ```
//! use travel_content::content::{infer_region, parse_destinations, Region, DEFAULT_COUNT};
//!
//! let text = "1. Davao City\nHome of Mount Apo.\n2. Baguio\nSummer capital.";
//! let records = parse_destinations(text, DEFAULT_COUNT);
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].region, Region::Mindanao);
//! assert_eq!(infer_region("Baguio", Region::Visayas), Region::Luzon);
//! ```

pub mod classify;
pub mod defaults;
pub mod destinations;
pub mod fields;
pub mod foods;
pub mod itinerary;
pub mod machine;
pub mod model;
pub mod places;
pub mod region;
pub mod rules;
mod structured;

pub use defaults::ParserDefaults;
pub use destinations::{parse_destinations, parse_destinations_with};
pub use foods::{parse_foods, parse_foods_with};
pub use itinerary::{parse_itinerary_content, parse_itinerary_content_with};
pub use model::{
    DestinationRecord, EventRecord, FoodRecord, ItineraryPlace, ItinerarySection,
    ItineraryStructure, PlaceRecord, Region,
};
pub use places::{parse_events, parse_events_with, parse_places, parse_places_with};
pub use region::infer_region;

/// Record count used when the caller does not ask for a specific number.
pub const DEFAULT_COUNT: usize = 3;
