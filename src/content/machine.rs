//! The shared line loop for flat record lists (destinations, foods, places, events).
//!
//! ```text
//!            header                  label
//!   Idle ───────────► InRecord ───────────► InSection(label)
//!                        ▲  │ header              │ header / label
//!                        └──┴─────────────────────┘
//! ```
//!
//! Body text is routed by [`route_for`]: dropped while `Idle`, sent to the
//! table's default route in `InRecord`, and to the label's route in
//! `InSection`. A `Discard` route recognizes a section without keeping it.
//! A scalar label with an inline value (`Type: Beach`) is complete on its
//! own line and returns the machine to `InRecord`.

use std::collections::HashMap;

use crate::content::classify::{classify, LineKind};
use crate::content::fields::{append_text, split_header};
use crate::content::rules::{EntityRules, Field, Label, Route};

/// Parser state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    InRecord,
    InSection { label: Label, route: Route },
}

/// Where body text goes in `state`. `None` means the text is dropped.
pub fn route_for(state: State, rules: &EntityRules) -> Option<Route> {
    match state {
        State::Idle => None,
        State::InRecord => Some(rules.default_route),
        State::InSection { route, .. } => Some(route),
    }
}

/// A record under construction: its name plus the raw text routed to each field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    fields: HashMap<Field, String>,
    named_by_label: bool,
    /// The header name is provisional until a bare `Name:` label gets its value.
    rename_pending: bool,
}

impl Draft {
    fn from_header(text: &str, rules: &EntityRules) -> Self {
        let (name, rest) = split_header(text);
        let mut draft = Draft {
            name,
            ..Default::default()
        };
        if let (Some(rest), Route::Append(field)) = (rest, rules.default_route) {
            draft.append(field, &rest);
        }
        draft
    }

    fn append(&mut self, field: Field, text: &str) {
        if field == Field::Name {
            let text = text.trim();
            if !text.is_empty() && (self.name.is_empty() || self.rename_pending) {
                self.name = text.to_string();
                self.rename_pending = false;
            }
            return;
        }
        let slot = self.fields.entry(field).or_default();
        if field == Field::Tags && !slot.is_empty() && !text.trim().is_empty() {
            slot.push(',');
        }
        append_text(slot, text);
    }

    /// Trimmed text routed to `field`, empty if none.
    pub fn text(&self, field: Field) -> &str {
        self.fields.get(&field).map_or("", |s| s.trim())
    }

    /// Text routed to `field`, or `None` when it is empty.
    pub fn get(&self, field: Field) -> Option<&str> {
        Some(self.text(field)).filter(|s| !s.is_empty())
    }
}

/// Run the state machine over `text` and return every draft in input order.
pub fn collect_drafts(text: &str, rules: &EntityRules) -> Vec<Draft> {
    let mut drafts: Vec<Draft> = Vec::new();
    let mut state = State::Idle;

    for line in text.lines() {
        match classify(line, rules) {
            LineKind::Blank => {}
            LineKind::Header { text, .. } => {
                drafts.push(Draft::from_header(&text, rules));
                state = State::InRecord;
            }
            LineKind::Label { label, rest, .. } => {
                let route = rules.route_for(label);

                if label == Label::Name && rules.name_label_opens_record {
                    let open_new = match (state, drafts.last()) {
                        (State::Idle, _) | (_, None) => true,
                        (_, Some(current)) => current.named_by_label,
                    };
                    if open_new {
                        drafts.push(Draft::default());
                    }
                    if let Some(current) = drafts.last_mut() {
                        current.named_by_label = true;
                        if !rest.is_empty() {
                            current.name = rest;
                            state = State::InRecord;
                            continue;
                        }
                        current.rename_pending = !current.name.is_empty();
                    }
                    state = State::InSection { label, route };
                    continue;
                }

                if state == State::Idle {
                    continue;
                }
                state = State::InSection { label, route };
                if let (Route::Append(field), Some(current)) = (route, drafts.last_mut()) {
                    current.append(field, &rest);
                    if field.is_scalar() && !rest.is_empty() {
                        state = State::InRecord;
                    }
                }
            }
            LineKind::Timestamp { .. } => {
                // Only itinerary tables enable timestamps; treat the raw line as body text.
                if let (Some(Route::Append(field)), Some(current)) =
                    (route_for(state, rules), drafts.last_mut())
                {
                    current.append(field, line);
                }
            }
            LineKind::Body(body) => {
                if let (Some(Route::Append(field)), Some(current)) =
                    (route_for(state, rules), drafts.last_mut())
                {
                    current.append(field, &body);
                }
            }
        }
    }

    drafts
}
