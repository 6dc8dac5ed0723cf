//! Structured-decode attempt that precedes the line-oriented path.

use log::debug;
use serde_json::{Map, Value};

use crate::content::fields::parse_tags;
use crate::output_parser::parse_json_value;

pub(crate) type JsonObject = Map<String, Value>;

/// Decode `text` as a JSON array (up to `count` objects) or a single object.
///
/// `None` means the text path should run: the text is not JSON, is scalar
/// JSON, or is an array without any objects.
pub(crate) fn decode_objects(text: &str, count: usize) -> Option<Vec<JsonObject>> {
    let value = match parse_json_value(text) {
        Ok(value) => value,
        Err(err) => {
            debug!("structured decode skipped: {err}");
            return None;
        }
    };

    let objects: Vec<JsonObject> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .take(count)
            .collect(),
        Value::Object(obj) => vec![obj].into_iter().take(count).collect(),
        other => {
            debug!("structured decode produced a scalar ({other}), using text path");
            return None;
        }
    };

    if objects.is_empty() && count > 0 {
        return None;
    }
    debug!("structured decode produced {} record(s)", objects.len());
    Some(objects)
}

/// First non-blank string (or number) under any of `keys`, unmodified.
pub(crate) fn string_field(obj: &JsonObject, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Tags under any of `keys`: an array of strings or one delimited string.
pub(crate) fn tags_field(obj: &JsonObject, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|key| {
        let tags: Vec<String> = match obj.get(*key)? {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Value::String(s) => parse_tags(s),
            _ => return None,
        };
        (!tags.is_empty()).then_some(tags)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn array_is_bounded_by_count() {
        let text = r#"[{"name": "a"}, {"name": "b"}, {"name": "c"}]"#;
        assert_eq!(decode_objects(text, 2).unwrap().len(), 2);
    }

    #[test]
    fn single_object_is_wrapped() {
        let objects = decode_objects(r#"{"name": "Vigan"}"#, 3).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["name"], "Vigan");
    }

    #[test]
    fn scalars_and_prose_use_text_path() {
        assert!(decode_objects("42", 3).is_none());
        assert!(decode_objects(r#"["just", "strings"]"#, 3).is_none());
        assert!(decode_objects("1. Cebu", 3).is_none());
    }

    #[test]
    fn zero_count_yields_no_records() {
        assert_eq!(decode_objects(r#"[{"name": "a"}]"#, 0).map(|o| o.len()), Some(0));
    }

    #[test]
    fn string_field_takes_first_present_key() {
        let o = obj(json!({"title": "", "dish": "Kinilaw", "price": 150}));
        assert_eq!(string_field(&o, &["title", "dish"]).as_deref(), Some("Kinilaw"));
        assert_eq!(string_field(&o, &["price"]).as_deref(), Some("150"));
        assert_eq!(string_field(&o, &["missing"]), None);
    }

    #[test]
    fn tags_from_array_or_string() {
        let o = obj(json!({"tags": ["beach", ""], "keywords": "dive, surf"}));
        assert_eq!(tags_field(&o, &["tags"]).unwrap(), vec!["beach"]);
        assert_eq!(tags_field(&o, &["keywords"]).unwrap(), vec!["dive", "surf"]);
        assert_eq!(tags_field(&o, &["nope"]), None);
    }
}
