//! Destination records.

use log::debug;

use crate::content::defaults::ParserDefaults;
use crate::content::fields::{non_empty_or, parse_tags};
use crate::content::machine::{collect_drafts, Draft};
use crate::content::model::{DestinationRecord, Region};
use crate::content::region::infer_region;
use crate::content::rules::{Field, DESTINATION_RULES};
use crate::content::structured::{decode_objects, string_field, tags_field, JsonObject};
use crate::output_parser::preprocess;

/// Parse up to `count` destinations using [`ParserDefaults::default`].
///
/// # Examples
///
/// ```
/// use travel_content::content::{parse_destinations, Region};
///
/// let text = "1. Cebu City - a vibrant province\nOverview: Queen City of the South.";
/// let records = parse_destinations(text, 3);
/// assert_eq!(records[0].name, "Cebu City");
/// assert_eq!(records[0].region, Region::Visayas);
/// ```
pub fn parse_destinations(text: &str, count: usize) -> Vec<DestinationRecord> {
    parse_destinations_with(text, count, &ParserDefaults::default())
}

pub fn parse_destinations_with(
    text: &str,
    count: usize,
    defaults: &ParserDefaults,
) -> Vec<DestinationRecord> {
    let text = preprocess(text);
    if text.is_empty() {
        return Vec::new();
    }

    if let Some(objects) = decode_objects(&text, count) {
        return objects.iter().map(|o| from_json(o, defaults)).collect();
    }

    let records: Vec<DestinationRecord> = collect_drafts(&text, &DESTINATION_RULES)
        .iter()
        .take(count)
        .map(|d| from_draft(d, defaults))
        .collect();
    debug!("text path produced {} destination(s)", records.len());
    records
}

fn from_draft(draft: &Draft, defaults: &ParserDefaults) -> DestinationRecord {
    let name = non_empty_or(&draft.name, &defaults.unknown_destination);
    let region = draft
        .get(Field::Region)
        .and_then(Region::from_name)
        .unwrap_or_else(|| infer_region(&name, defaults.default_region));
    let tags = draft
        .get(Field::Tags)
        .map(parse_tags)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| defaults.generated_tags.clone());

    DestinationRecord {
        region,
        description: draft.text(Field::Description).to_string(),
        tags,
        image: draft
            .get(Field::Image)
            .map_or_else(|| defaults.placeholder_image.clone(), str::to_string),
        name,
    }
}

fn from_json(obj: &JsonObject, defaults: &ParserDefaults) -> DestinationRecord {
    let name = string_field(obj, &["name", "title", "destination"])
        .unwrap_or_else(|| defaults.unknown_destination.clone());
    let region = string_field(obj, &["region"])
        .and_then(|r| Region::from_name(&r))
        .unwrap_or_else(|| infer_region(&name, defaults.default_region));

    DestinationRecord {
        region,
        description: string_field(obj, &["description", "overview"]).unwrap_or_default(),
        tags: tags_field(obj, &["tags"]).unwrap_or_else(|| defaults.generated_tags.clone()),
        image: string_field(obj, &["image", "imageUrl", "image_url"])
            .unwrap_or_else(|| defaults.placeholder_image.clone()),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: &str = "\
Here are three destinations you'll love:

1. Cebu City - a vibrant province
Overview: The oldest city in the country.
Key attractions:
- Magellan's Cross
- Basilica del Santo Niño
History:
Ferdinand Magellan arrived in 1521.
Cuisine:
Famous for lechon.
Travel Tips:
Bring cash for jeepneys.

2. **Siargao**
Surfing capital with island hopping.
Best time to visit: March to October

3. Vigan
A preserved Spanish colonial town.
Tags: heritage, UNESCO
";

    #[test]
    fn parses_numbered_destinations() {
        let records = parse_destinations(THREE, 3);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cebu City", "Siargao", "Vigan"]);
        assert_eq!(records[0].region, Region::Visayas);
        assert_eq!(records[1].region, Region::Mindanao);
        assert_eq!(records[2].region, Region::Luzon);
    }

    #[test]
    fn only_overview_and_attractions_feed_description() {
        let records = parse_destinations(THREE, 3);
        assert_eq!(
            records[0].description,
            "a vibrant province The oldest city in the country. Magellan's Cross Basilica del Santo Niño"
        );
        // History, cuisine, and tips sections are recognized but dropped.
        assert!(!records[0].description.contains("1521"));
        assert!(!records[0].description.contains("lechon"));
        assert!(!records[0].description.contains("jeepneys"));
        assert!(!records[1].description.contains("March"));
    }

    #[test]
    fn tags_from_label_or_default() {
        let records = parse_destinations(THREE, 3);
        assert_eq!(records[0].tags, vec!["Generated", "AI"]);
        assert_eq!(records[2].tags, vec!["heritage", "UNESCO"]);
        assert_eq!(records[2].description, "A preserved Spanish colonial town.");
    }

    #[test]
    fn count_bounds_result() {
        assert_eq!(parse_destinations(THREE, 2).len(), 2);
        assert_eq!(parse_destinations(THREE, 0).len(), 0);
    }

    #[test]
    fn empty_and_prose_inputs() {
        assert!(parse_destinations("", 3).is_empty());
        assert!(parse_destinations("   \n\t", 3).is_empty());
        assert!(parse_destinations("Just a paragraph about travel.", 3).is_empty());
    }

    #[test]
    fn blank_header_gets_placeholder_name() {
        let records = parse_destinations("1. **  **\n", 3);
        assert_eq!(records[0].name, "Unknown Destination");
        assert_eq!(records[0].region, Region::Luzon);
    }

    #[test]
    fn region_label_overrides_inference() {
        let records = parse_destinations("## Camotes Islands\nRegion: Visayas\n", 3);
        assert_eq!(records[0].region, Region::Visayas);
        let records = parse_destinations("## Camotes Islands\nRegion: Atlantis\n", 3);
        assert_eq!(records[0].region, Region::Luzon);
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let text = r#"[
            {"name": "Bohol", "region": "Visayas", "description": "Chocolate Hills", "tags": ["hills"], "image": "https://img/bohol.jpg"},
            {"name": "Davao"}
        ]"#;
        let records = parse_destinations(text, 3);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            DestinationRecord {
                name: "Bohol".into(),
                region: Region::Visayas,
                description: "Chocolate Hills".into(),
                tags: vec!["hills".into()],
                image: "https://img/bohol.jpg".into(),
            }
        );
        assert_eq!(records[1].region, Region::Mindanao);
        assert_eq!(records[1].tags, vec!["Generated", "AI"]);
        assert_eq!(records[1].image, ParserDefaults::default().placeholder_image);
    }

    #[test]
    fn json_region_outside_closed_set_is_inferred() {
        let records = parse_destinations(r#"{"name": "Cebu", "region": "Central Visayas"}"#, 3);
        assert_eq!(records[0].region, Region::Visayas);
    }

    #[test]
    fn custom_defaults_are_used() {
        let defaults = ParserDefaults::default()
            .with_placeholder_image("blank.png")
            .with_default_region(Region::Mindanao);
        let records = parse_destinations_with("1. Nowhere Town", 3, &defaults);
        assert_eq!(records[0].image, "blank.png");
        assert_eq!(records[0].region, Region::Mindanao);
    }

    #[test]
    fn reparsing_is_idempotent() {
        assert_eq!(parse_destinations(THREE, 3), parse_destinations(THREE, 3));
    }

    #[test]
    fn reasoning_block_is_not_parsed() {
        let text = "<think>\n1. Boracay maybe?\n2. Cebu\n</think>\n1. Bohol\nChocolate Hills.";
        let records = parse_destinations(text, 3);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Bohol");
        assert_eq!(records[0].description, "Chocolate Hills.");
    }
}
