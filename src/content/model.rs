//! Output record shapes produced by the content parsers.
//!
//! Records are plain values built fresh on every parse call. Identity and
//! persistence belong to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Island group of a destination.
///
/// Closed set: every [`DestinationRecord`] carries one of these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Luzon,
    Visayas,
    Mindanao,
}

impl Region {
    /// All regions in inference order.
    pub const ALL: [Region; 3] = [Region::Luzon, Region::Visayas, Region::Mindanao];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Luzon => "Luzon",
            Region::Visayas => "Visayas",
            Region::Mindanao => "Mindanao",
        }
    }

    /// Case-insensitive lookup of a region name, ignoring surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Region> {
        let name = name.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A travel destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub name: String,
    pub region: Region,
    pub description: String,
    pub tags: Vec<String>,
    pub image: String,
}

/// A local dish tied to a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price_range: String,
    /// Persisted destination identifier. Empty until the caller assigns it.
    pub location_id: String,
    pub tags: Vec<String>,
    pub image: String,
}

impl FoodRecord {
    /// Attach the persisted identifier of the destination this dish belongs to.
    pub fn with_location_id(mut self, id: impl Into<String>) -> Self {
        self.location_id = id.into();
        self
    }
}

/// An attraction or point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
}

/// A festival or recurring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub tags: Vec<String>,
}

/// A parsed itinerary: a title and its ordered sections (days or periods).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItineraryStructure {
    pub title: String,
    pub sections: Vec<ItinerarySection>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItinerarySection {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub places: Vec<ItineraryPlace>,
}

/// One timed stop inside an itinerary section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPlace {
    pub name: String,
    /// Clock-time token as written in the source, e.g. `"8:00 AM"`.
    pub time: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance_fee: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}
