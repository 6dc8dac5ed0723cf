//! Per-entity extraction tables.
//!
//! Each entity type is described by an [`EntityRules`] value: an ordered
//! list of section-label patterns, the [`Route`] each label sends body text
//! to, and a few classifier switches. The shared line loop never changes
//! when a new source format is supported; only a table does.

use once_cell::sync::Lazy;
use regex::Regex;

use Field as F;
use Label as L;
use Route::{Append, Discard};

/// A record field body text can be routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Kind,
    Description,
    Region,
    Location,
    Date,
    Price,
    Tags,
    Image,
}

impl Field {
    /// Single-value fields: an inline label value completes them.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Field::Description | Field::Tags)
    }
}

/// Where body text under the current section label goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Append to a field with a space separator.
    Append(Field),
    /// The label is recognized but its body text is dropped.
    Discard,
}

/// Every section label any table can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Overview,
    Attractions,
    BestTime,
    History,
    Cuisine,
    Tips,
    Name,
    Kind,
    Description,
    Price,
    Location,
    Date,
    Tags,
    Image,
    Region,
    Title,
    Period,
    Duration,
}

/// One compiled section-label pattern.
#[derive(Debug, Clone)]
pub struct LabelRule {
    pub label: Label,
    pub route: Route,
    pattern: Regex,
}

impl LabelRule {
    /// Match a line against this label. Returns `(keyword, inline_rest)`.
    pub fn captures<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.pattern.captures(line)?;
        let keyword = caps.name("key")?.as_str();
        let rest = caps.name("rest").map_or("", |m| m.as_str());
        Some((keyword, rest))
    }
}

/// Build the label regex around a keyword alternation.
///
/// Accepts an optional list marker (`1.`, `-`, `##`), optional bold markers,
/// the keyword, then either a colon with inline text or the end of the line.
fn label_pattern(keywords: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?i)^\s*(?:\d+[.)]\s+|#{{1,6}}\s*|[-*•]\s+)?\**\s*(?P<key>{keywords})\s*\**\s*(?::\s*\**\s*(?P<rest>.*?))?\s*$"
    ))
}

/// Classification and routing table for one entity type.
#[derive(Debug, Clone)]
pub struct EntityRules {
    labels: Vec<LabelRule>,
    /// Route for body text inside a record before any label appears.
    pub default_route: Route,
    /// Recognize clock-time lines (itineraries).
    pub timestamps: bool,
    /// Treat `Day N` and fully-bold lines as headers (itineraries).
    pub day_headers: bool,
    /// A `Name:` label starts a new record when the open one already has a labelled name.
    pub name_label_opens_record: bool,
}

impl EntityRules {
    pub fn new(default_route: Route) -> Self {
        Self {
            labels: Vec::new(),
            default_route,
            timestamps: false,
            day_headers: false,
            name_label_opens_record: false,
        }
    }

    /// Append a label rule. `keywords` is a regex alternation such as
    /// `r"price(?:\s+range)?|cost"`, matched case-insensitively.
    /// Earlier rules win when several match.
    pub fn push_label(
        &mut self,
        label: Label,
        keywords: &str,
        route: Route,
    ) -> Result<(), regex::Error> {
        self.labels.push(LabelRule {
            label,
            route,
            pattern: label_pattern(keywords)?,
        });
        Ok(())
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_day_headers(mut self, enabled: bool) -> Self {
        self.day_headers = enabled;
        self
    }

    pub fn with_name_label_opens_record(mut self, enabled: bool) -> Self {
        self.name_label_opens_record = enabled;
        self
    }

    pub fn labels(&self) -> &[LabelRule] {
        &self.labels
    }

    /// Route configured for `label`, or `Discard` if this table lacks it.
    pub fn route_for(&self, label: Label) -> Route {
        self.labels
            .iter()
            .find(|r| r.label == label)
            .map_or(Route::Discard, |r| r.route)
    }
}

fn build(default_route: Route, entries: &[(Label, &str, Route)]) -> EntityRules {
    let mut rules = EntityRules::new(default_route);
    for (label, keywords, route) in entries {
        rules
            .push_label(*label, keywords, *route)
            .expect("built-in label pattern must compile");
    }
    rules
}

/// Destinations. Only overview and attraction text reaches the description;
/// best-time, history, cuisine and tips sections are recognized and dropped.
pub static DESTINATION_RULES: Lazy<EntityRules> = Lazy::new(|| {
    build(
        Append(F::Description),
        &[
            (L::Overview, r"overview|about|description|summary", Append(F::Description)),
            (
                L::Attractions,
                r"(?:key\s+|top\s+|main\s+|must-see\s+)?attractions?|highlights",
                Append(F::Description),
            ),
            (
                L::BestTime,
                r"best\s+time(?:\s+to\s+(?:visit|go))?|when\s+to\s+visit",
                Discard,
            ),
            (L::History, r"history|historical\s+background", Discard),
            (
                L::Cuisine,
                r"(?:local\s+)?(?:cuisine|food|delicacies)|what\s+to\s+eat",
                Discard,
            ),
            (L::Tips, r"(?:travel\s+)?tips", Discard),
            (L::Region, r"region|island\s+group", Append(F::Region)),
            (L::Tags, r"tags|keywords", Append(F::Tags)),
            (L::Image, r"image(?:\s+url)?", Append(F::Image)),
        ],
    )
});

pub static FOOD_RULES: Lazy<EntityRules> = Lazy::new(|| {
    build(
        Append(F::Description),
        &[
            (
                L::Name,
                r"name|dish(?:\s+name)?|food(?:\s+name)?",
                Append(F::Name),
            ),
            (L::Kind, r"type|category|kind", Append(F::Kind)),
            (L::Description, r"description|about|details", Append(F::Description)),
            (L::Price, r"price(?:\s+range)?|cost|range", Append(F::Price)),
            (L::Tags, r"tags|keywords", Append(F::Tags)),
            (L::Image, r"image(?:\s+url)?", Append(F::Image)),
        ],
    )
    .with_name_label_opens_record(true)
});

pub static PLACE_RULES: Lazy<EntityRules> = Lazy::new(|| {
    build(
        Append(F::Description),
        &[
            (L::Kind, r"type|category", Append(F::Kind)),
            (
                L::Location,
                r"location|address|where|province|city",
                Append(F::Location),
            ),
            (
                L::Description,
                r"description|about|overview|highlights|why\s+visit",
                Append(F::Description),
            ),
            (L::Tags, r"tags|keywords", Append(F::Tags)),
        ],
    )
});

pub static EVENT_RULES: Lazy<EntityRules> = Lazy::new(|| {
    build(
        Append(F::Description),
        &[
            (L::Kind, r"type|category", Append(F::Kind)),
            (L::Location, r"location|venue|where", Append(F::Location)),
            (L::Date, r"dates?|when|schedule|month", Append(F::Date)),
            (
                L::Description,
                r"description|about|overview|highlights",
                Append(F::Description),
            ),
            (L::Tags, r"tags|keywords", Append(F::Tags)),
        ],
    )
});

/// Itineraries. Routes here are informational; the itinerary reducer
/// handles sections and places itself.
pub static ITINERARY_RULES: Lazy<EntityRules> = Lazy::new(|| {
    build(
        Append(F::Description),
        &[
            (L::Title, r"title", Discard),
            (L::Date, r"date", Append(F::Date)),
            (
                L::Duration,
                r"duration|time\s+needed|suggested\s+duration",
                Discard,
            ),
            (L::Period, r"morning|afternoon|evening|night", Append(F::Description)),
            (
                L::Description,
                r"overview|description|summary|notes?",
                Append(F::Description),
            ),
        ],
    )
    .with_timestamps(true)
    .with_day_headers(true)
});
