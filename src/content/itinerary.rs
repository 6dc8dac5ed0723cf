//! Day-by-day itineraries.
//!
//! Unlike the flat record lists, an itinerary nests places inside sections,
//! so it runs its own reducer over the shared classifier. A section is opened
//! by a header (`Day 2`, `## Arrival`, `**Island hopping**`), by a period
//! label when nothing is open yet, or implicitly by the first timed line.
//! Each timed line opens a place; body text then describes the open place,
//! or the open section when no place is open.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::content::classify::{classify, HeaderKind, LineKind};
use crate::content::defaults::ParserDefaults;
use crate::content::fields::{
    append_text, clean_place_name, excerpt, extract_fee, image_url, non_empty_or,
};
use crate::content::model::{ItineraryPlace, ItinerarySection, ItineraryStructure};
use crate::content::rules::{Label, ITINERARY_RULES};
use crate::content::structured::{string_field, JsonObject};
use crate::output_parser::{parse_json_value, preprocess};

const FLEXIBLE: &str = "Flexible";
const IMPLICIT_SECTION: &str = "Day 1";

static DAY_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^day\s+\d+").expect("regex"));

/// Parse an itinerary for `destination` using [`ParserDefaults::default`].
///
/// # Examples
///
/// ```
/// use travel_content::content::parse_itinerary_content;
///
/// let itinerary = parse_itinerary_content("Day 1\n8:00 AM Visit Fort Santiago", "Manila");
/// assert_eq!(itinerary.title, "Manila Itinerary");
/// assert_eq!(itinerary.sections[0].places[0].time, "8:00 AM");
/// assert_eq!(itinerary.sections[0].places[0].name, "Fort Santiago");
/// ```
pub fn parse_itinerary_content(text: &str, destination: &str) -> ItineraryStructure {
    parse_itinerary_content_with(text, destination, &ParserDefaults::default())
}

pub fn parse_itinerary_content_with(
    text: &str,
    destination: &str,
    defaults: &ParserDefaults,
) -> ItineraryStructure {
    let text = preprocess(text);
    if text.is_empty() {
        return ItineraryStructure {
            title: default_title(destination),
            sections: Vec::new(),
        };
    }

    if let Ok(value) = parse_json_value(&text) {
        if let Some(itinerary) = from_json(&value, destination, defaults) {
            debug!(
                "structured decode produced {} itinerary section(s)",
                itinerary.sections.len()
            );
            return itinerary;
        }
    }

    let mut builder = Builder::new(destination, defaults);
    for line in text.lines() {
        builder.line(line);
    }
    builder.finish(&text)
}

fn default_title(destination: &str) -> String {
    titled(destination, "Itinerary")
}

/// `Cebu` + `Highlights` -> `Cebu Highlights`; a blank destination keeps the suffix alone.
fn titled(destination: &str, suffix: &str) -> String {
    match destination.trim() {
        "" => suffix.to_string(),
        destination => format!("{destination} {suffix}"),
    }
}

/// Name for a place the text did not name.
fn fallback_place_name(destination: &str, defaults: &ParserDefaults) -> String {
    non_empty_or(destination.trim(), &defaults.unknown_place)
}

/// `MORNING` -> `Morning`
fn capitalize(word: &str) -> String {
    let lower = word.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

struct Builder<'a> {
    destination: &'a str,
    defaults: &'a ParserDefaults,
    title: Option<String>,
    sections: Vec<ItinerarySection>,
    /// The last place of the last section still receives body text.
    place_open: bool,
    /// A label seen without inline text, waiting for its value on the next body line.
    pending: Option<Label>,
    seen_line: bool,
}

impl<'a> Builder<'a> {
    fn new(destination: &'a str, defaults: &'a ParserDefaults) -> Self {
        Self {
            destination,
            defaults,
            title: None,
            sections: Vec::new(),
            place_open: false,
            pending: None,
            seen_line: false,
        }
    }

    fn line(&mut self, line: &str) {
        let kind = classify(line, &ITINERARY_RULES);
        if kind == LineKind::Blank {
            return;
        }
        let leading = !self.seen_line;
        self.seen_line = true;

        match kind {
            LineKind::Blank => {}
            LineKind::Header { kind, text } => {
                let is_title = leading
                    && kind == HeaderKind::Markdown(1)
                    && self.title.is_none()
                    && !DAY_TITLE.is_match(&text);
                if is_title {
                    self.title = Some(text);
                } else {
                    self.open_section(text);
                }
            }
            LineKind::Label {
                label: Label::Period,
                keyword,
                rest,
            } => {
                if self.sections.is_empty() {
                    self.open_section(capitalize(&keyword));
                } else {
                    self.place_open = false;
                    self.pending = None;
                }
                if !rest.is_empty() {
                    self.line(&rest);
                }
            }
            LineKind::Label { label, rest, .. } => {
                self.pending = None;
                if rest.is_empty() {
                    self.pending = Some(label);
                } else {
                    self.labelled(label, &rest);
                }
            }
            LineKind::Timestamp { time, rest } => self.open_place(time, &rest),
            LineKind::Body(text) => match self.pending.take() {
                Some(label) => self.labelled(label, &text),
                None => self.body(&text),
            },
        }
    }

    fn open_section(&mut self, title: String) {
        self.sections.push(ItinerarySection {
            title,
            ..Default::default()
        });
        self.place_open = false;
        self.pending = None;
    }

    fn open_place(&mut self, time: String, rest: &str) {
        if self.sections.is_empty() {
            self.open_section(IMPLICIT_SECTION.to_string());
        }
        let (name, description) = clean_place_name(rest, self.defaults.max_place_name_chars);
        let name = non_empty_or(&name, &fallback_place_name(self.destination, self.defaults));
        let place = ItineraryPlace {
            image_url: image_url(&self.defaults.image_lookup_base, &name, self.destination),
            entrance_fee: extract_fee(rest),
            description: description.unwrap_or_default(),
            time,
            name,
            duration: None,
        };
        if let Some(section) = self.sections.last_mut() {
            section.places.push(place);
            self.place_open = true;
        }
        self.pending = None;
    }

    fn labelled(&mut self, label: Label, value: &str) {
        match label {
            Label::Title => {
                if self.title.is_none() {
                    self.title = Some(value.to_string());
                }
            }
            Label::Date => {
                if let Some(section) = self.sections.last_mut() {
                    let date = section.date.get_or_insert_with(String::new);
                    append_text(date, value);
                }
            }
            Label::Duration => {
                if let Some(place) = self.open_place_mut() {
                    place.duration = Some(value.to_string());
                }
            }
            _ => self.body(value),
        }
    }

    fn open_place_mut(&mut self) -> Option<&mut ItineraryPlace> {
        if !self.place_open {
            return None;
        }
        self.sections.last_mut()?.places.last_mut()
    }

    fn body(&mut self, text: &str) {
        if let Some(place) = self.open_place_mut() {
            append_text(&mut place.description, text);
            if place.entrance_fee.is_none() {
                place.entrance_fee = extract_fee(text);
            }
        } else if let Some(section) = self.sections.last_mut() {
            append_text(&mut section.description, text);
        }
    }

    fn finish(mut self, text: &str) -> ItineraryStructure {
        if self.sections.is_empty() {
            debug!("no itinerary sections found, synthesizing highlights");
            self.sections.push(self.highlights(text));
        }
        ItineraryStructure {
            title: self.title.unwrap_or_else(|| default_title(self.destination)),
            sections: self.sections,
        }
    }

    fn highlights(&self, text: &str) -> ItinerarySection {
        let destination = self.destination.trim();
        ItinerarySection {
            title: titled(destination, "Highlights"),
            description: String::new(),
            date: None,
            places: vec![ItineraryPlace {
                name: fallback_place_name(destination, self.defaults),
                time: FLEXIBLE.to_string(),
                description: excerpt(text, self.defaults.fallback_excerpt_chars),
                entrance_fee: None,
                image_url: image_url(&self.defaults.image_lookup_base, destination, ""),
                duration: None,
            }],
        }
    }
}

/// An object with a `sections` array, or a bare array of section objects.
fn from_json(
    value: &Value,
    destination: &str,
    defaults: &ParserDefaults,
) -> Option<ItineraryStructure> {
    let (title, sections) = match value {
        Value::Object(obj) => {
            let sections = obj.get("sections")?.as_array()?;
            (string_field(obj, &["title", "name"]), sections)
        }
        Value::Array(sections) => (None, sections),
        _ => return None,
    };

    let sections: Vec<ItinerarySection> = sections
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(i, obj)| section_from_json(i, obj, destination, defaults))
        .collect();
    if sections.is_empty() {
        return None;
    }

    Some(ItineraryStructure {
        title: title.unwrap_or_else(|| default_title(destination)),
        sections,
    })
}

fn section_from_json(
    index: usize,
    obj: &JsonObject,
    destination: &str,
    defaults: &ParserDefaults,
) -> ItinerarySection {
    let places: Vec<ItineraryPlace> = ["places", "activities", "items"]
        .iter()
        .find_map(|key| obj.get(*key)?.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|p| place_from_json(p, destination, defaults))
                .collect()
        })
        .unwrap_or_default();

    ItinerarySection {
        title: string_field(obj, &["title", "name", "day"])
            .unwrap_or_else(|| format!("Day {}", index + 1)),
        description: string_field(obj, &["description", "summary"]).unwrap_or_default(),
        date: string_field(obj, &["date"]),
        places,
    }
}

fn place_from_json(
    obj: &JsonObject,
    destination: &str,
    defaults: &ParserDefaults,
) -> ItineraryPlace {
    let name = string_field(obj, &["name", "place", "title"])
        .unwrap_or_else(|| fallback_place_name(destination, defaults));
    ItineraryPlace {
        time: string_field(obj, &["time"]).unwrap_or_else(|| FLEXIBLE.to_string()),
        description: string_field(obj, &["description", "details"]).unwrap_or_default(),
        entrance_fee: string_field(obj, &["entranceFee", "entrance_fee", "fee"]),
        image_url: string_field(obj, &["imageUrl", "image_url", "image"])
            .unwrap_or_else(|| image_url(&defaults.image_lookup_base, &name, destination)),
        duration: string_field(obj, &["duration"]),
        name,
    }
}
