//! Place and event records.
//!
//! Both share the flat-list state machine; events add a `date` field and
//! default to the festival type.

use log::debug;

use crate::content::defaults::ParserDefaults;
use crate::content::fields::{non_empty_or, parse_tags};
use crate::content::machine::{collect_drafts, Draft};
use crate::content::model::{EventRecord, PlaceRecord};
use crate::content::rules::{Field, EVENT_RULES, PLACE_RULES};
use crate::content::structured::{decode_objects, string_field, tags_field, JsonObject};
use crate::output_parser::preprocess;

pub fn parse_places(text: &str, count: usize) -> Vec<PlaceRecord> {
    parse_places_with(text, count, &ParserDefaults::default())
}

/// Parse up to `count` attractions.
pub fn parse_places_with(text: &str, count: usize, defaults: &ParserDefaults) -> Vec<PlaceRecord> {
    let text = preprocess(text);
    if text.is_empty() {
        return Vec::new();
    }
    if let Some(objects) = decode_objects(&text, count) {
        return objects.iter().map(|o| place_from_json(o, defaults)).collect();
    }

    let records: Vec<PlaceRecord> = collect_drafts(&text, &PLACE_RULES)
        .iter()
        .take(count)
        .map(|d| place_from_draft(d, defaults))
        .collect();
    debug!("text path produced {} place(s)", records.len());
    records
}

pub fn parse_events(text: &str, count: usize) -> Vec<EventRecord> {
    parse_events_with(text, count, &ParserDefaults::default())
}

/// Parse up to `count` festivals or events.
pub fn parse_events_with(text: &str, count: usize, defaults: &ParserDefaults) -> Vec<EventRecord> {
    let text = preprocess(text);
    if text.is_empty() {
        return Vec::new();
    }
    if let Some(objects) = decode_objects(&text, count) {
        return objects.iter().map(|o| event_from_json(o, defaults)).collect();
    }

    let records: Vec<EventRecord> = collect_drafts(&text, &EVENT_RULES)
        .iter()
        .take(count)
        .map(|d| event_from_draft(d, defaults))
        .collect();
    debug!("text path produced {} event(s)", records.len());
    records
}

fn field_or(draft: &Draft, field: Field, fallback: &str) -> String {
    draft.get(field).unwrap_or(fallback).to_string()
}

fn draft_tags(draft: &Draft, defaults: &ParserDefaults) -> Vec<String> {
    draft
        .get(Field::Tags)
        .map(parse_tags)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| defaults.generated_tags.clone())
}

fn place_from_draft(draft: &Draft, defaults: &ParserDefaults) -> PlaceRecord {
    PlaceRecord {
        name: non_empty_or(&draft.name, &defaults.unknown_place),
        kind: field_or(draft, Field::Kind, &defaults.place_type),
        description: draft.text(Field::Description).to_string(),
        location: field_or(draft, Field::Location, &defaults.location),
        tags: draft_tags(draft, defaults),
    }
}

fn event_from_draft(draft: &Draft, defaults: &ParserDefaults) -> EventRecord {
    EventRecord {
        name: non_empty_or(&draft.name, &defaults.unknown_event),
        kind: field_or(draft, Field::Kind, &defaults.event_type),
        description: draft.text(Field::Description).to_string(),
        location: field_or(draft, Field::Location, &defaults.location),
        date: field_or(draft, Field::Date, &defaults.event_date),
        tags: draft_tags(draft, defaults),
    }
}

fn place_from_json(obj: &JsonObject, defaults: &ParserDefaults) -> PlaceRecord {
    PlaceRecord {
        name: string_field(obj, &["name", "title"])
            .unwrap_or_else(|| defaults.unknown_place.clone()),
        kind: string_field(obj, &["type", "category"])
            .unwrap_or_else(|| defaults.place_type.clone()),
        description: string_field(obj, &["description", "about"]).unwrap_or_default(),
        location: string_field(obj, &["location", "address"])
            .unwrap_or_else(|| defaults.location.clone()),
        tags: tags_field(obj, &["tags"]).unwrap_or_else(|| defaults.generated_tags.clone()),
    }
}

fn event_from_json(obj: &JsonObject, defaults: &ParserDefaults) -> EventRecord {
    EventRecord {
        name: string_field(obj, &["name", "title"])
            .unwrap_or_else(|| defaults.unknown_event.clone()),
        kind: string_field(obj, &["type", "category"])
            .unwrap_or_else(|| defaults.event_type.clone()),
        description: string_field(obj, &["description", "about"]).unwrap_or_default(),
        location: string_field(obj, &["location", "venue"])
            .unwrap_or_else(|| defaults.location.clone()),
        date: string_field(obj, &["date", "dates", "when"])
            .unwrap_or_else(|| defaults.event_date.clone()),
        tags: tags_field(obj, &["tags"]).unwrap_or_else(|| defaults.generated_tags.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_with_labels() {
        let text = "\
## Chocolate Hills
Type: Natural Landmark
Location: Carmen, Bohol
Over 1,200 cone-shaped hills.

## Tarsier Sanctuary
Home of the tiny primate.
";
        let places = parse_places(text, 3);
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].kind, "Natural Landmark");
        assert_eq!(places[0].location, "Carmen, Bohol");
        assert_eq!(places[0].description, "Over 1,200 cone-shaped hills.");
        assert_eq!(places[1].kind, "Attraction");
        assert_eq!(places[1].location, "Philippines");
        assert_eq!(places[1].description, "Home of the tiny primate.");
        assert_eq!(places[1].tags, vec!["Generated", "AI"]);
    }

    #[test]
    fn events_with_dates() {
        let text = "\
1. Sinulog Festival - Cebu's grandest fiesta
When: Third Sunday of January
Venue: Cebu City
Description: Street dancing in honor of the Santo Niño.

2. Kadayawan
";
        let events = parse_events(text, 3);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Sinulog Festival");
        assert_eq!(events[0].date, "Third Sunday of January");
        assert_eq!(events[0].location, "Cebu City");
        assert_eq!(
            events[0].description,
            "Cebu's grandest fiesta Street dancing in honor of the Santo Niño."
        );
        assert_eq!(events[1].kind, "Festival");
        assert_eq!(events[1].date, "Annual event");
    }

    #[test]
    fn count_bound_and_placeholder_names() {
        let text = "1. **  **\n2. B\n3. C\n4. D";
        let places = parse_places(text, 3);
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].name, "Unknown Place");
        let events = parse_events(text, 2);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Unknown Event");
    }

    #[test]
    fn json_event() {
        let events = parse_events(
            r#"{"name": "MassKara", "date": "October", "tags": "masks, Bacolod"}"#,
            3,
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "October");
        assert_eq!(events[0].tags, vec!["masks", "Bacolod"]);
        assert_eq!(events[0].location, "Philippines");
    }

    #[test]
    fn empty_input() {
        assert!(parse_places("", 3).is_empty());
        assert!(parse_events(" ", 3).is_empty());
    }

    #[test]
    fn reasoning_blocks_are_not_parsed() {
        let places = parse_places(
            "<thinking>## Draft spot</thinking>\n## Chocolate Hills\nType: Natural Landmark",
            3,
        );
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Chocolate Hills");

        let events = parse_events("<think>\n1. Fake Fest\n</think>\n1. Sinulog\nDate: January", 3);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Sinulog");
        assert_eq!(events[0].date, "January");
    }
}
