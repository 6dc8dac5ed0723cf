//! # Structured Output Extraction
//!
//! Pulls a JSON value out of generated text when the model actually returned
//! JSON, possibly wrapped in `<think>` blocks or a markdown fence.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`parse_json_value`] | Decode the text (or its fenced block) as one JSON value |
//! | [`strip_think_tags`] | Remove `<think>` blocks from text |
//! | [`remove_trailing_commas`] | Fix the most common LLM JSON error |
//!
//! Prose is never scanned for bracketed fragments; text that is not JSON as a
//! whole (or inside a fence) goes to the line-oriented parsers.

pub mod error;
pub mod extract;
pub mod json;
pub mod repair;

pub use error::ParseError;
pub use extract::{preprocess, strip_think_tags};
pub use json::parse_json_value;
pub use repair::remove_trailing_commas;
