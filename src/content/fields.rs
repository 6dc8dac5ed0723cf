//! Field-level extraction helpers shared by the entity reducers.

use once_cell::sync::Lazy;
use regex::Regex;
use url::form_urlencoded;

const PESO: char = '₱';

static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(?:-|–|—|to)\s*(?:₱|php|p)?\s*(\d[\d,]*(?:\.\d+)?)")
        .expect("regex")
});
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("regex"));
static FEE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:entrance\s+fee|fee|cost|price|admission)\b").expect("regex")
});
static CURRENCY_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:₱|\bphp\.?\s?|\bp)\s?\d[\d,]*(?:\.\d+)?").expect("regex")
});
/// A whole number token; `2nd` and `3F` are not amounts.
static BARE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d[\d,]*(?:\.\d+)?\b").expect("regex"));
static FREE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfree\b").expect("regex"));
static LEADING_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s*(?:[-*•+|:–—]|\d+[.)])\s*)+").expect("regex"));
static LEADING_VERB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:visit|explore|go\s+to)\b[\s:,-]*").expect("regex"));

/// Split header text like `Cebu City - a vibrant province` into name and remainder.
///
/// The earliest of ` - `, ` – `, ` — ` or `: ` separates the two.
pub fn split_header(text: &str) -> (String, Option<String>) {
    let cut = [" - ", " – ", " — ", ": "]
        .iter()
        .filter_map(|sep| text.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|(at, _)| *at);

    match cut {
        Some((at, len)) => {
            let name = text[..at].trim().to_string();
            let rest = text[at + len..].trim();
            (name, (!rest.is_empty()).then(|| rest.to_string()))
        }
        None => (text.trim().to_string(), None),
    }
}

/// Normalize a price mention to a peso-denominated string.
///
/// A numeric range becomes `₱a - ₱b`, a single number `₱n`; text without
/// numbers falls back to `default`.
///
/// # Examples
///
/// ```
/// use travel_content::content::fields::normalize_price_range;
///
/// assert_eq!(normalize_price_range("100-300", "₱0"), "₱100 - ₱300");
/// assert_eq!(normalize_price_range("PHP 150 to 250 per plate", "₱0"), "₱150 - ₱250");
/// assert_eq!(normalize_price_range("₱80", "₱0"), "₱80");
/// assert_eq!(normalize_price_range("affordable", "₱100 - ₱300"), "₱100 - ₱300");
/// ```
pub fn normalize_price_range(raw: &str, default: &str) -> String {
    if let Some(caps) = PRICE_RANGE.captures(raw) {
        return format!("{PESO}{} - {PESO}{}", &caps[1], &caps[2]);
    }
    if let Some(number) = NUMBER.find(raw) {
        return format!("{PESO}{}", number.as_str());
    }
    ensure_peso(default)
}

/// Strip any leading currency glyph and prefix the peso sign.
pub fn ensure_peso(value: &str) -> String {
    let mut bare = value.trim().trim_start_matches([PESO, '$']).trim_start();
    if bare.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("php")) {
        bare = bare[3..].trim_start_matches('.').trim_start();
    } else if let Some(rest) = bare.strip_prefix(['P', 'p']) {
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            bare = rest;
        }
    }
    format!("{PESO}{}", bare.trim())
}

/// First fee amount on a line mentioning an entrance fee, cost or price.
///
/// An amount with a currency prefix beats an earlier bare number. A line
/// that says `free` without any amount yields `"Free"`.
pub fn extract_fee(line: &str) -> Option<String> {
    if !FEE_KEYWORDS.is_match(line) {
        return None;
    }
    if let Some(token) = CURRENCY_AMOUNT.find(line).or_else(|| BARE_AMOUNT.find(line)) {
        return Some(token.as_str().trim().to_string());
    }
    FREE.is_match(line).then(|| "Free".to_string())
}

/// Split a comma, semicolon or pipe separated tag list.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split([',', ';', '|']) {
        let tag = tag.trim().trim_start_matches('#').trim();
        if !tag.is_empty() && !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Append `tag` unless an equal tag (ignoring ASCII case) is present.
pub fn ensure_tag(tags: &mut Vec<String>, tag: &str) {
    let tag = tag.trim();
    if !tag.is_empty() && !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
        tags.push(tag.to_string());
    }
}

/// Derive an itinerary place name from the text left after the time token.
///
/// Strips list markers, separators and a leading verb (`Visit`, `Explore`,
/// `Go to`). A name over `max_chars` is cut at its first colon, the tail
/// becoming the returned description, and then hard-truncated.
pub fn clean_place_name(rest: &str, max_chars: usize) -> (String, Option<String>) {
    let stripped = LEADING_MARKERS.replace(rest.trim(), "");
    let stripped = LEADING_VERB.replace(stripped.trim(), "");
    let mut name = stripped.trim().to_string();
    let mut description = None;

    if name.chars().count() > max_chars {
        if let Some(colon) = name.find(':') {
            let tail = name[colon + 1..].trim().to_string();
            name = name[..colon].trim().to_string();
            description = (!tail.is_empty()).then_some(tail);
        }
    }
    if name.chars().count() > max_chars {
        name = name.chars().take(max_chars).collect::<String>().trim_end().to_string();
    }
    (name, description)
}

/// Featured-photo lookup URL for a place at a destination.
///
/// # Examples
///
/// ```
/// use travel_content::content::fields::image_url;
///
/// assert_eq!(
///     image_url("https://img.example/?", "Fort Santiago", "Manila"),
///     "https://img.example/?Fort+Santiago,Manila"
/// );
/// ```
pub fn image_url(base: &str, name: &str, destination: &str) -> String {
    let encode = |s: &str| form_urlencoded::byte_serialize(s.trim().as_bytes()).collect::<String>();
    let query = match (name.trim().is_empty(), destination.trim().is_empty()) {
        (false, false) => format!("{},{}", encode(name), encode(destination)),
        (false, true) => encode(name),
        (true, false) => encode(destination),
        (true, true) => "travel".to_string(),
    };
    format!("{base}{query}")
}

/// First `max_chars` characters of `text` followed by `...`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept.trim_end())
}

/// `value` unless it is blank, in which case `fallback`.
pub(crate) fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Append `text` to `target` with a single space separator.
pub fn append_text(target: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
