//! Single-line classifier shared by every content parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::rules::{EntityRules, Label};

/// What started a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// `1. text` or `1) text`
    Numbered,
    /// `# text` / `## text`, with the heading level.
    Markdown(usize),
    /// `Day 2: text`
    Day,
    /// A line that is bold from end to end: `**Arrival**`
    Bold,
}

/// The classification of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Start of a new record or itinerary section.
    Header { kind: HeaderKind, text: String },
    /// A section label, with the keyword as written and any inline text.
    Label {
        label: Label,
        keyword: String,
        rest: String,
    },
    /// A line carrying a clock time. `time` is normalized (`"8:00 AM"`).
    Timestamp { time: String, rest: String },
    Body(String),
}

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s+(.+)$").expect("regex"));
static MARKDOWN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(#{1,2})\s+(.+)$").expect("regex"));
static DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:[-*•]\s+)?\**\s*(day\s+\d+\b.*?)\s*\**:?\s*$").expect("regex")
});
static BOLD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*\*([^*]+?)\*\*:?\s*$").expect("regex"));
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*•+]\s+").expect("regex"));

/// Clock time: `8:00 AM`, `8 am`, `10:30p.m.`.
pub(crate) static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?::[0-5]\d)?)\s*([ap])\.?\s?m\b\.?").expect("regex")
});

/// A bare range start right before a clock time: the `9:00-` of `9:00-11:00 AM`.
static RANGE_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?::[0-5]\d)?)\s*(?:[-–—]|\bto\b)\s*$").expect("regex")
});

/// Classify `line` against an entity table.
///
/// Precedence: blank, label, timestamp (if enabled), numbered or markdown
/// header, day or bold header (if enabled), body.
pub fn classify(line: &str, rules: &EntityRules) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    for rule in rules.labels() {
        if let Some((keyword, rest)) = rule.captures(trimmed) {
            return LineKind::Label {
                label: rule.label,
                keyword: keyword.to_string(),
                rest: strip_markup(rest),
            };
        }
    }

    if rules.timestamps {
        if let Some((time, rest)) = split_time(trimmed) {
            return LineKind::Timestamp { time, rest };
        }
    }

    if let Some(caps) = NUMBERED.captures(trimmed) {
        return header(HeaderKind::Numbered, &caps[1]);
    }
    if let Some(caps) = MARKDOWN.captures(trimmed) {
        return header(HeaderKind::Markdown(caps[1].len()), &caps[2]);
    }

    if rules.day_headers {
        if let Some(caps) = DAY.captures(trimmed) {
            return header(HeaderKind::Day, &caps[1]);
        }
        if let Some(caps) = BOLD_LINE.captures(trimmed) {
            return header(HeaderKind::Bold, &caps[1]);
        }
    }

    let body = strip_markup(&BULLET.replace(trimmed, ""));
    if body.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Body(body)
    }
}

fn header(kind: HeaderKind, raw: &str) -> LineKind {
    let text = strip_markup(raw);
    let text = text.trim_end_matches(':').trim_end().to_string();
    LineKind::Header { kind, text }
}

/// Remove bold markers and surrounding whitespace.
pub(crate) fn strip_markup(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// Find the first clock time in `line`.
///
/// Returns the normalized time and the line with that time removed, along
/// with the other end of a range (`8:00 AM - 10:00 AM`, `9:00-11:00 AM`).
/// A bare range start takes the meridiem of the end unless the range
/// crosses noon (`11-1 PM` starts at `11 AM`).
pub(crate) fn split_time(line: &str) -> Option<(String, String)> {
    let caps = TIME.captures(line)?;
    let whole = caps.get(0)?;
    let meridiem = caps[2].to_ascii_uppercase();

    let before = &line[..whole.start()];
    let range_start = RANGE_START
        .captures(before)
        .filter(|start| !follows_day_word(&before[..start.get(0).map_or(0, |m| m.start())]));
    let (time, before) = match range_start {
        Some(start) => {
            let start_meridiem = if crosses_noon(&start[1], &caps[1]) {
                flip(&meridiem)
            } else {
                meridiem.as_str()
            };
            let cut = start.get(0).map_or(before.len(), |m| m.start());
            (format!("{} {}M", &start[1], start_meridiem), &before[..cut])
        }
        None => (format!("{} {}M", &caps[1], meridiem), before),
    };

    let tail = line[whole.end()..].trim_start();
    let range_end = tail
        .strip_prefix(['-', '–', '—'])
        .or_else(|| tail.strip_prefix("to "))
        .map(str::trim_start)
        .and_then(|t| TIME.find(t).filter(|m| m.start() == 0).map(|m| &t[m.end()..]));
    let after = range_end.unwrap_or(tail);

    let rest = format!("{} {}", before.trim_end(), after);
    Some((time, strip_markup(&rest)))
}

/// `Day 1 - 9 AM`: the number belongs to the day, not a range.
fn follows_day_word(prefix: &str) -> bool {
    let prefix = prefix.trim_end().trim_end_matches('*');
    prefix.len() >= 3
        && prefix.is_char_boundary(prefix.len() - 3)
        && prefix[prefix.len() - 3..].eq_ignore_ascii_case("day")
}

fn hour(time: &str) -> u32 {
    time.split(':').next().and_then(|h| h.parse().ok()).unwrap_or(0)
}

fn crosses_noon(start: &str, end: &str) -> bool {
    let (start, end) = (hour(start), hour(end));
    start != 12 && (end == 12 || start > end)
}

fn flip(meridiem: &str) -> &'static str {
    if meridiem == "AM" {
        "PM"
    } else {
        "AM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::rules::{DESTINATION_RULES, ITINERARY_RULES, PLACE_RULES};
    use test_case::test_case;

    #[test]
    fn numbered_header() {
        assert_eq!(
            classify("1. Cebu City - a vibrant province", &DESTINATION_RULES),
            LineKind::Header {
                kind: HeaderKind::Numbered,
                text: "Cebu City - a vibrant province".into()
            }
        );
    }

    #[test]
    fn markdown_header_with_bold() {
        assert_eq!(
            classify("## **Vigan**:", &PLACE_RULES),
            LineKind::Header {
                kind: HeaderKind::Markdown(2),
                text: "Vigan".into()
            }
        );
    }

    #[test]
    fn three_hashes_is_body() {
        assert_eq!(
            classify("### Notes on Vigan", &PLACE_RULES),
            LineKind::Body("### Notes on Vigan".into())
        );
    }

    #[test]
    fn label_beats_header() {
        let kind = classify("## Key Attractions", &DESTINATION_RULES);
        assert!(matches!(kind, LineKind::Label { label: Label::Attractions, .. }));
    }

    #[test]
    fn bullet_stripped_from_body() {
        assert_eq!(
            classify("  - Magellan's Cross  ", &DESTINATION_RULES),
            LineKind::Body("Magellan's Cross".into())
        );
    }

    #[test]
    fn timestamps_ignored_without_flag() {
        let kind = classify("8:00 AM breakfast", &DESTINATION_RULES);
        assert_eq!(kind, LineKind::Body("8:00 AM breakfast".into()));
    }

    #[test_case("- 8:00 AM Visit Fort Santiago", "8:00 AM", "- Visit Fort Santiago" ; "bullet prefix")]
    #[test_case("8am: breakfast", "8 AM", ": breakfast" ; "compact lower case")]
    #[test_case("10:30 p.m. Night market", "10:30 PM", "Night market" ; "dotted meridiem")]
    #[test_case("9:00 AM - 11:00 AM Intramuros tour", "9:00 AM", "Intramuros tour" ; "range")]
    #[test_case("1 pm to 3 pm siesta", "1 PM", "siesta" ; "worded range")]
    #[test_case("9:00-11:00 AM Intramuros tour", "9:00 AM", "Intramuros tour" ; "compact range")]
    #[test_case("11:30 - 1 PM Lunch at Larsian", "11:30 AM", "Lunch at Larsian" ; "range across noon")]
    #[test_case("2 to 4 pm Island hopping", "2 PM", "Island hopping" ; "worded compact range")]
    #[test_case("Day 1 - 9 AM Fort Santiago", "9 AM", "Day 1 - Fort Santiago" ; "day number is not a range")]
    #[test_case("**2 PM** Lunch", "2 PM", "Lunch" ; "bold time")]
    fn timestamp_lines(line: &str, time: &str, rest: &str) {
        assert_eq!(
            classify(line, &ITINERARY_RULES),
            LineKind::Timestamp {
                time: time.into(),
                rest: rest.into()
            }
        );
    }

    #[test]
    fn number_next_to_word_am_is_not_time() {
        assert!(split_time("Top 5 Amazing beaches").is_none());
    }

    #[test]
    fn day_and_bold_headers() {
        assert_eq!(
            classify("**Day 1: Old Manila**", &ITINERARY_RULES),
            LineKind::Header {
                kind: HeaderKind::Day,
                text: "Day 1: Old Manila".into()
            }
        );
        assert_eq!(
            classify("**Arrival in Cebu**", &ITINERARY_RULES),
            LineKind::Header {
                kind: HeaderKind::Bold,
                text: "Arrival in Cebu".into()
            }
        );
    }

    #[test]
    fn period_label() {
        let kind = classify("Morning:", &ITINERARY_RULES);
        assert!(matches!(
            kind,
            LineKind::Label { label: Label::Period, ref keyword, .. } if keyword == "Morning"
        ));
    }
}
