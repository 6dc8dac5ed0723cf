//! Untyped JSON extraction from generated text.

use serde_json::Value;

use crate::output_parser::error::{truncate, ParseError};
use crate::output_parser::extract::{extract_code_block_for, preprocess};
use crate::output_parser::repair::remove_trailing_commas;

/// Decode generated text as a single JSON value.
///
/// Candidates (in order):
/// 1. The whole preprocessed text
/// 2. The body of a `` ```json `` fenced block
/// 3. Either candidate with trailing commas removed
///
/// # Examples
///
/// ```
/// use travel_content::output_parser::parse_json_value;
///
/// let value = parse_json_value("<think>ok</think>[{\"name\": \"Siargao\"}]").unwrap();
/// assert_eq!(value[0]["name"], "Siargao");
/// assert!(parse_json_value("1. Siargao - surfing capital").is_err());
/// ```
pub fn parse_json_value(response: &str) -> Result<Value, ParseError> {
    let cleaned = preprocess(response);
    if cleaned.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let mut candidates = vec![cleaned.as_str()];
    if let Some(fenced) = extract_code_block_for(&cleaned, "json") {
        candidates.push(fenced);
    }

    for candidate in &candidates {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            return Ok(value);
        }
    }

    for candidate in &candidates {
        if let Some(repaired) = remove_trailing_commas(candidate) {
            if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
                return Ok(value);
            }
        }
    }

    Err(ParseError::Unparseable {
        expected_format: "JSON",
        text: truncate(&cleaned, 200),
    })
}
