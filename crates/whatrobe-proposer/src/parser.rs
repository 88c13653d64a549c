//! Tolerant parsing of generative model output.
//!
//! Models wrap JSON in prose, fence it in markdown, or stop mid-array. The
//! parser looks for the first substring that parses as a JSON array and maps
//! each element onto a [`ProposedOutfit`] without judging it; validation
//! against the inventory happens in the stage.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

lazy_static! {
    /// Greedy: first '[' through last ']'
    static ref JSON_ARRAY: Regex = Regex::new(r"(?s)\[.*\]").unwrap();
}

/// One outfit as the model described it, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedOutfit {
    pub name: Option<String>,
    /// `None` when the field is missing or not a list.
    pub item_ids: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("empty response")]
    Empty,
    #[error("no JSON array in response")]
    NoJsonArray,
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Extract and decode the outfit array from raw model text.
pub fn parse_response(text: &str) -> Result<Vec<ProposedOutfit>, ParseFailure> {
    if text.trim().is_empty() {
        return Err(ParseFailure::Empty);
    }

    let elements = extract_array(text)?;
    Ok(elements.iter().map(proposed_from_value).collect())
}

/// First JSON array in `text`: the greedy span first, then each balanced
/// `[...]` span from left to right.
pub fn extract_array(text: &str) -> Result<Vec<Value>, ParseFailure> {
    let greedy = JSON_ARRAY.find(text).ok_or(ParseFailure::NoJsonArray)?;
    let first_error = match serde_json::from_str::<Vec<Value>>(greedy.as_str()) {
        Ok(values) => return Ok(values),
        Err(e) => e.to_string(),
    };

    for (start, _) in text.match_indices('[') {
        if let Some(span) = balanced_span(&text[start..]) {
            if let Ok(values) = serde_json::from_str::<Vec<Value>>(span) {
                return Ok(values);
            }
        }
    }

    Err(ParseFailure::InvalidJson(first_error))
}

/// The shortest prefix of `text` (which starts with '[') whose brackets
/// balance, ignoring brackets inside JSON strings.
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

fn proposed_from_value(value: &Value) -> ProposedOutfit {
    let text_field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let item_ids = value
        .get("itemIds")
        .or_else(|| value.get("item_ids"))
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| match id {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        });

    ProposedOutfit {
        name: text_field("name"),
        item_ids,
        description: text_field("description").or_else(|| text_field("reason")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_array() {
        let out = parse_response(r#"[{"name":"A","itemIds":["t1","b1"],"description":"works"}]"#).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.as_deref(), Some("A"));
        assert_eq!(out[0].item_ids, Some(vec!["t1".to_string(), "b1".to_string()]));
        assert_eq!(out[0].description.as_deref(), Some("works"));
    }

    #[test]
    fn test_array_wrapped_in_prose() {
        let text = "Sure! Here are your outfits:\n```json\n[{\"name\": \"X\", \"itemIds\": [\"a\", \"b\"]}]\n```\nEnjoy!";
        let out = parse_response(text).unwrap();
        assert_eq!(out[0].item_ids.as_ref().unwrap().len(), 2);
        assert_eq!(out[0].description, None);
    }

    #[test]
    fn test_brackets_in_trailing_prose() {
        let text = r#"[{"name":"X","itemIds":["a","b"]}] (note: ids are from [your wardrobe])"#;
        let out = parse_response(text).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_brackets_inside_strings() {
        let text = r#"[see below] [{"name":"Look [1]","itemIds":["a","b"]}] trailing ]"#;
        let out = parse_response(text).unwrap();
        assert_eq!(out[0].name.as_deref(), Some("Look [1]"));
    }

    #[test]
    fn test_missing_or_malformed_ids() {
        let out = parse_response(r#"[{"name":"A"},{"name":"B","itemIds":"t1,b1"},{"itemIds":["a",7,null]}]"#).unwrap();
        assert_eq!(out[0].item_ids, None);
        assert_eq!(out[1].item_ids, None);
        assert_eq!(out[2].item_ids, Some(vec!["a".to_string(), "7".to_string()]));
    }

    #[test]
    fn test_failures() {
        assert_eq!(parse_response("   "), Err(ParseFailure::Empty));
        assert_eq!(parse_response("I cannot help with that."), Err(ParseFailure::NoJsonArray));
        assert!(matches!(
            parse_response(r#"[{"name": "truncated", "itemIds": ["a""#),
            Err(ParseFailure::NoJsonArray) | Err(ParseFailure::InvalidJson(_))
        ));
        assert!(matches!(parse_response("[not json]"), Err(ParseFailure::InvalidJson(_))));
    }

    #[test]
    fn test_non_object_elements_become_invalid_proposals() {
        let out = parse_response(r#"["t1", {"itemIds": ["a","b"]}]"#).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].item_ids, None);
    }
}
