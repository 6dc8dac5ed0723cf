//! Error types for JSON candidate extraction.

/// Why no JSON value could be pulled out of generated text.
///
/// The content parsers never surface this to their callers: any of these
/// means "use the line-oriented text path instead".
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The text was empty or whitespace-only after preprocessing.
    #[error("empty LLM response")]
    EmptyResponse,

    /// No candidate decoded as JSON, even after repair.
    #[error("could not parse {expected_format} from LLM response: {text}")]
    Unparseable {
        /// The format the parser was trying to extract.
        expected_format: &'static str,
        /// A truncated copy of the cleaned text (max 200 chars).
        text: String,
    },
}

/// Keep at most `max_chars` characters of `s`, appending "..." when cut.
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}
