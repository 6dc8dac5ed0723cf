//! Minimal JSON repair for generated text.

/// Remove commas that directly precede `}` or `]`, ignoring string contents.
///
/// Returns `None` when nothing was removed.
///
/// # Examples
///
/// ```
/// use travel_content::output_parser::remove_trailing_commas;
///
/// assert_eq!(
///     remove_trailing_commas(r#"[{"name": "Bohol",},]"#).as_deref(),
///     Some(r#"[{"name": "Bohol"}]"#)
/// );
/// assert_eq!(remove_trailing_commas(r#"{"a": 1}"#), None);
/// ```
pub fn remove_trailing_commas(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape_next = false;
    let mut changed = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            continue;
        }

        match ch {
            '"' => in_string = true,
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, Some('}') | Some(']')) {
                    changed = true;
                    continue;
                }
            }
            _ => {}
        }
        out.push(ch);
    }

    changed.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_inside_string_is_kept() {
        assert_eq!(remove_trailing_commas(r#"{"a": "x,}"}"#), None);
    }

    #[test]
    fn comma_before_whitespace_and_bracket() {
        assert_eq!(
            remove_trailing_commas("[1, 2,\n  ]").as_deref(),
            Some("[1, 2\n  ]")
        );
    }
}
