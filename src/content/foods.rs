//! Food records for a destination.

use log::debug;

use crate::content::defaults::ParserDefaults;
use crate::content::fields::{
    ensure_peso, ensure_tag, non_empty_or, normalize_price_range, parse_tags,
};
use crate::content::machine::{collect_drafts, Draft};
use crate::content::model::FoodRecord;
use crate::content::rules::{Field, FOOD_RULES};
use crate::content::structured::{decode_objects, string_field, tags_field, JsonObject};
use crate::output_parser::preprocess;

/// Parse up to `count` dishes served at `destination`.
///
/// Every record is tagged with `destination`; `location_id` is left empty
/// for the caller to fill in once the destination is persisted.
///
/// # Examples
///
/// ```
/// use travel_content::content::parse_foods;
///
/// let foods = parse_foods("1. Lechon\nPrice: 300-600", "Cebu", 3);
/// assert_eq!(foods[0].price_range, "₱300 - ₱600");
/// assert!(foods[0].tags.contains(&"Cebu".to_string()));
/// ```
pub fn parse_foods(text: &str, destination: &str, count: usize) -> Vec<FoodRecord> {
    parse_foods_with(text, destination, count, &ParserDefaults::default())
}

pub fn parse_foods_with(
    text: &str,
    destination: &str,
    count: usize,
    defaults: &ParserDefaults,
) -> Vec<FoodRecord> {
    let text = preprocess(text);
    if text.is_empty() {
        return Vec::new();
    }

    if let Some(objects) = decode_objects(&text, count) {
        return objects
            .iter()
            .map(|o| from_json(o, destination, defaults))
            .collect();
    }

    let records: Vec<FoodRecord> = collect_drafts(&text, &FOOD_RULES)
        .iter()
        .take(count)
        .map(|d| from_draft(d, destination, defaults))
        .collect();
    debug!("text path produced {} food(s) for {destination}", records.len());
    records
}

fn from_draft(draft: &Draft, destination: &str, defaults: &ParserDefaults) -> FoodRecord {
    FoodRecord {
        name: non_empty_or(&draft.name, &defaults.unknown_food),
        kind: draft
            .get(Field::Kind)
            .map_or_else(|| defaults.food_type.clone(), str::to_string),
        description: draft.text(Field::Description).to_string(),
        price_range: normalize_price_range(draft.text(Field::Price), &defaults.food_price_range),
        location_id: String::new(),
        tags: food_tags(draft.get(Field::Tags).map(parse_tags), destination, defaults),
        image: draft
            .get(Field::Image)
            .map_or_else(|| defaults.placeholder_image.clone(), str::to_string),
    }
}

fn from_json(obj: &JsonObject, destination: &str, defaults: &ParserDefaults) -> FoodRecord {
    let price_range = match string_field(obj, &["price_range", "priceRange", "price", "cost"]) {
        Some(price) if price.trim_start().starts_with('₱') => price,
        Some(price) if price.chars().any(|c| c.is_ascii_digit()) => {
            normalize_price_range(&price, &defaults.food_price_range)
        }
        _ => ensure_peso(&defaults.food_price_range),
    };

    FoodRecord {
        name: string_field(obj, &["name", "dish", "food"])
            .unwrap_or_else(|| defaults.unknown_food.clone()),
        kind: string_field(obj, &["type", "category"])
            .unwrap_or_else(|| defaults.food_type.clone()),
        description: string_field(obj, &["description", "about"]).unwrap_or_default(),
        price_range,
        location_id: string_field(obj, &["location_id", "locationId"]).unwrap_or_default(),
        tags: food_tags(tags_field(obj, &["tags"]), destination, defaults),
        image: string_field(obj, &["image", "imageUrl", "image_url"])
            .unwrap_or_else(|| defaults.placeholder_image.clone()),
    }
}

/// Explicit tags or the configured defaults, always including the destination.
fn food_tags(
    tags: Option<Vec<String>>,
    destination: &str,
    defaults: &ParserDefaults,
) -> Vec<String> {
    let mut tags = tags
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| defaults.food_tags.clone());
    ensure_tag(&mut tags, destination);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELLED: &str = "\
Name: Lechon
Type: Main Dish
Description: Whole roasted pig with crackling skin.
Price: 500 - 1,000

Name: Puso
Category: Side
About: Rice boiled in woven coconut leaves.
Cost: ₱10
Tags: street food, rice

Name: Sutukil
Sutukil is a style of cooking seafood.
";

    #[test]
    fn labelled_blocks() {
        let foods = parse_foods(LABELLED, "Cebu", 5);
        assert_eq!(foods.len(), 3);

        assert_eq!(foods[0].name, "Lechon");
        assert_eq!(foods[0].kind, "Main Dish");
        assert_eq!(foods[0].price_range, "₱500 - ₱1,000");
        assert_eq!(foods[0].tags, vec!["Local", "Traditional", "Cebu"]);

        assert_eq!(foods[1].kind, "Side");
        assert_eq!(foods[1].price_range, "₱10");
        assert_eq!(foods[1].tags, vec!["street food", "rice", "Cebu"]);

        assert_eq!(foods[2].description, "Sutukil is a style of cooking seafood.");
        assert_eq!(foods[2].kind, "Local Specialty");
        assert_eq!(foods[2].price_range, "₱100 - ₱300");
    }

    #[test]
    fn numbered_list_with_body_description() {
        let text =
            "1. Kinilaw - Filipino ceviche\nFresh fish cured in vinegar.\n2. Chorizo de Cebu";
        let foods = parse_foods(text, "Cebu", 3);
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].name, "Kinilaw");
        assert_eq!(
            foods[0].description,
            "Filipino ceviche Fresh fish cured in vinegar."
        );
        assert!(foods[1].location_id.is_empty());
    }

    #[test]
    fn price_always_starts_with_peso() {
        let text = "1. A\nPrice: cheap\n2. B\nPrice: PHP 80\n3. C\nPrice range: 40 to 60";
        for food in parse_foods(text, "Iloilo", 3) {
            assert!(food.price_range.starts_with('₱'), "{}", food.price_range);
        }
    }

    #[test]
    fn destination_tag_not_duplicated() {
        let foods = parse_foods("1. Batchoy\nTags: noodles, iloilo", "Iloilo", 3);
        assert_eq!(foods[0].tags, vec!["noodles", "iloilo"]);
    }

    #[test]
    fn json_records() {
        let text = r#"[{"name": "Lechon", "price_range": "₱400 - ₱800", "tags": ["pork"]},
                      {"dish": "Ngohiong", "price": "30-50", "type": "Snack"},
                      {"name": "Danggit"}]"#;
        let foods = parse_foods(text, "Cebu", 3);
        assert_eq!(foods[0].price_range, "₱400 - ₱800");
        assert_eq!(foods[0].tags, vec!["pork", "Cebu"]);
        assert_eq!(foods[1].name, "Ngohiong");
        assert_eq!(foods[1].price_range, "₱30 - ₱50");
        assert_eq!(foods[2].price_range, "₱100 - ₱300");
        assert_eq!(foods[2].kind, "Local Specialty");
    }

    #[test]
    fn empty_input() {
        assert!(parse_foods("", "Cebu", 3).is_empty());
    }

    #[test]
    fn count_bound() {
        assert_eq!(parse_foods(LABELLED, "Cebu", 2).len(), 2);
    }

    #[test]
    fn reasoning_block_is_not_parsed() {
        let text = "<think>\n1. Adobo?\nPrice: 50\n</think>\n1. Lechon\nPrice: 500";
        let foods = parse_foods(text, "Cebu", 3);
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Lechon");
        assert_eq!(foods[0].price_range, "₱500");
    }

    #[test]
    fn bare_name_label_names_the_dish() {
        let foods = parse_foods("1. Dish one\nName:\nSutukil\nPrice: 200", "Cebu", 3);
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Sutukil");
        assert_eq!(foods[0].price_range, "₱200");
    }
}
