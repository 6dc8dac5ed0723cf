use serde::Deserialize;

use crate::content::model::Region;

/// Placeholder values the parsers fall back to when a field cannot be extracted.
///
/// Passed into every `*_with` parse function so tests and callers can swap the
/// network-facing placeholders (image URLs) for fixed strings.
///
/// # Example
///
/// ```
/// use travel_content::content::ParserDefaults;
///
/// let defaults = ParserDefaults::default()
///     .with_placeholder_image("https://cdn.example.com/blank.png")
///     .with_place_type("Landmark");
/// assert_eq!(defaults.place_type, "Landmark");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParserDefaults {
    /// Image used for destinations and foods without one.
    pub placeholder_image: String,

    /// Prefix of the featured-photo lookup used for itinerary places.
    /// The encoded `name,destination` query is appended as-is.
    pub image_lookup_base: String,

    /// Tags for destinations, places, and events that carry none.
    pub generated_tags: Vec<String>,

    /// Tags for foods that carry none. The destination name is appended.
    pub food_tags: Vec<String>,

    pub unknown_destination: String,
    pub unknown_food: String,
    pub unknown_place: String,
    pub unknown_event: String,

    pub default_region: Region,
    pub food_type: String,
    pub food_price_range: String,
    pub place_type: String,
    pub event_type: String,
    pub location: String,
    pub event_date: String,

    /// Characters of raw input kept in a synthesized itinerary place.
    pub fallback_excerpt_chars: usize,

    /// Longest itinerary place name taken from a timestamped line.
    pub max_place_name_chars: usize,
}

impl Default for ParserDefaults {
    fn default() -> Self {
        Self {
            placeholder_image: "https://placehold.co/600x400?text=Philippines".to_string(),
            image_lookup_base: "https://source.unsplash.com/featured/?".to_string(),
            generated_tags: vec!["Generated".to_string(), "AI".to_string()],
            food_tags: vec!["Local".to_string(), "Traditional".to_string()],
            unknown_destination: "Unknown Destination".to_string(),
            unknown_food: "Unknown Dish".to_string(),
            unknown_place: "Unknown Place".to_string(),
            unknown_event: "Unknown Event".to_string(),
            default_region: Region::Luzon,
            food_type: "Local Specialty".to_string(),
            food_price_range: "₱100 - ₱300".to_string(),
            place_type: "Attraction".to_string(),
            event_type: "Festival".to_string(),
            location: "Philippines".to_string(),
            event_date: "Annual event".to_string(),
            fallback_excerpt_chars: 200,
            max_place_name_chars: 60,
        }
    }
}

impl ParserDefaults {
    /// Load defaults from a JSON document. Missing keys keep their default.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load defaults from a YAML document. Missing keys keep their default.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }

    pub fn with_image_lookup_base(mut self, base: impl Into<String>) -> Self {
        self.image_lookup_base = base.into();
        self
    }

    pub fn with_generated_tags(mut self, tags: Vec<String>) -> Self {
        self.generated_tags = tags;
        self
    }

    pub fn with_food_tags(mut self, tags: Vec<String>) -> Self {
        self.food_tags = tags;
        self
    }

    pub fn with_default_region(mut self, region: Region) -> Self {
        self.default_region = region;
        self
    }

    pub fn with_food_price_range(mut self, range: impl Into<String>) -> Self {
        self.food_price_range = range.into();
        self
    }

    pub fn with_place_type(mut self, kind: impl Into<String>) -> Self {
        self.place_type = kind.into();
        self
    }

    pub fn with_event_type(mut self, kind: impl Into<String>) -> Self {
        self.event_type = kind.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_fallback_excerpt_chars(mut self, chars: usize) -> Self {
        self.fallback_excerpt_chars = chars;
        self
    }
}
