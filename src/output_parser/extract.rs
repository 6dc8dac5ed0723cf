//! Preprocessing and fenced-block extraction shared by the structured path.

/// Strip `<think>` blocks, then trim whitespace.
pub fn preprocess(text: &str) -> String {
    strip_think_tags(text).trim().to_string()
}

/// Strip all `<think>...</think>` and `<thinking>...</thinking>` blocks from text.
///
/// An unclosed block swallows the rest of the text.
///
/// # Examples
///
/// ```
/// use travel_content::output_parser::strip_think_tags;
///
/// assert_eq!(strip_think_tags("<think>reasoning</think>1. Cebu"), "1. Cebu");
/// assert_eq!(strip_think_tags("<think>no closing tag"), "");
/// ```
pub fn strip_think_tags(text: &str) -> String {
    let once = strip_tag_pair(text, "<think>", "</think>");
    strip_tag_pair(&once, "<thinking>", "</thinking>")
}

fn strip_tag_pair(text: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        match rest[start..].find(close) {
            Some(offset) => rest = &rest[start + offset + close.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Body of the first fenced code block tagged with `lang` (case-insensitive).
///
/// # Examples
///
/// ```
/// use travel_content::output_parser::extract::extract_code_block_for;
///
/// let input = "Here you go:\n```json\n[{\"name\": \"Vigan\"}]\n```";
/// assert_eq!(extract_code_block_for(input, "json"), Some("[{\"name\": \"Vigan\"}]"));
/// ```
pub fn extract_code_block_for<'a>(text: &'a str, lang: &str) -> Option<&'a str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find("```") {
        let after_fence = search_from + offset + 3;
        let line_end = after_fence + text[after_fence..].find('\n')?;
        let content_start = line_end + 1;

        if text[after_fence..line_end].trim().eq_ignore_ascii_case(lang) {
            let close = text[content_start..].find("```")?;
            return Some(text[content_start..content_start + close].trim());
        }
        search_from = content_start;
    }
    None
}
