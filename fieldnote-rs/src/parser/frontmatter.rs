//! The header-block codec: YAML frontmatter in and out of documents.
//!
//! This is the whitespace-preserving variant: the body is everything after
//! the closing `---` line, byte for byte. Nothing is trimmed or normalized
//! on either side of the round trip beyond the delimiter lines themselves,
//! so a document's leading blank lines and trailing whitespace survive
//! parse/serialize unchanged.

use crate::error::{FieldnoteError, Result};
use crate::properties::{PropertyMap, PropertyValue};
use serde_yaml::Value as YamlValue;
use std::path::Path;

/// Header extraction result.
#[derive(Debug, Clone)]
pub struct HeaderSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// Everything after the header block.
    pub body: &'a str,
}

/// Split text into header block and body.
///
/// The header must start at the very beginning of the text with a `---`
/// line and end at the next `---` line. Text without a well-formed header
/// is returned whole as the body.
pub fn split_header(text: &str) -> HeaderSplit<'_> {
    if !text.starts_with("---") {
        return HeaderSplit { yaml: None, body: text };
    }

    let after_first_delimiter = &text[3..];

    // The opening --- must be a full line.
    let yaml_start = if after_first_delimiter.starts_with('\n') {
        4
    } else if after_first_delimiter.starts_with("\r\n") {
        5
    } else {
        return HeaderSplit { yaml: None, body: text };
    };

    let remaining = &text[yaml_start..];

    // The closing --- must be on its own line: \n---\n, or \n--- at EOF.
    let closing_pos = remaining
        .find("\n---\n")
        .or_else(|| remaining.find("\n---\r\n"))
        .or_else(|| {
            if remaining.ends_with("\n---") {
                Some(remaining.len() - 4)
            } else {
                None
            }
        });

    match closing_pos {
        Some(pos) => {
            let yaml_end = yaml_start + pos;
            let yaml = &text[yaml_start..yaml_end];

            let delimiter_end = yaml_end + 4; // \n---
            let body = if delimiter_end < text.len() {
                let rest = &text[delimiter_end..];
                if let Some(stripped) = rest.strip_prefix("\r\n") {
                    stripped
                } else if let Some(stripped) = rest.strip_prefix('\n') {
                    stripped
                } else {
                    rest
                }
            } else {
                ""
            };

            HeaderSplit { yaml: Some(yaml), body }
        }
        None => HeaderSplit { yaml: None, body: text },
    }
}

/// Extract the header as a raw YAML string.
pub fn extract_header(text: &str) -> Option<&str> {
    split_header(text).yaml
}

/// Parse a document's text into its property map and body.
///
/// Text without a header block yields an empty map and the original text.
pub fn parse(text: &str) -> Result<(PropertyMap, &str)> {
    parse_with_path(text, Path::new("<unknown>"))
}

/// Parse with path context for error messages.
pub fn parse_with_path<'a>(text: &'a str, path: &Path) -> Result<(PropertyMap, &'a str)> {
    let split = split_header(text);

    let Some(yaml) = split.yaml else {
        return Ok((PropertyMap::new(), split.body));
    };

    let value: YamlValue =
        serde_yaml::from_str(yaml).map_err(|e| FieldnoteError::InvalidHeader {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let properties = map_from_yaml(&value, path)?;
    Ok((properties, split.body))
}

/// Serialize a property map and body into the on-disk textual form.
pub fn serialize(properties: &PropertyMap, body: &str) -> Result<String> {
    let mut mapping = serde_yaml::Mapping::new();
    for (key, value) in properties.iter() {
        mapping.insert(YamlValue::String(key.to_string()), value_to_yaml(value));
    }

    let yaml = serde_yaml::to_string(&YamlValue::Mapping(mapping))?;
    Ok(format!("---\n{}---\n{}", yaml, body))
}

fn map_from_yaml(value: &YamlValue, path: &Path) -> Result<PropertyMap> {
    let mut properties = PropertyMap::new();

    let mapping = match value {
        // An all-comment or all-blank header parses as null.
        YamlValue::Null => return Ok(properties),
        YamlValue::Mapping(mapping) => mapping,
        other => {
            return Err(invalid_header(
                path,
                format!("header is not a mapping (found {})", yaml_kind(other)),
            ));
        }
    };

    for (key, value) in mapping {
        let key = match key {
            YamlValue::String(s) => s.clone(),
            other => {
                return Err(invalid_header(
                    path,
                    format!("property key is not a string (found {})", yaml_kind(other)),
                ));
            }
        };
        properties.insert(key, value_from_yaml(value, path)?);
    }

    Ok(properties)
}

fn value_from_yaml(value: &YamlValue, path: &Path) -> Result<PropertyValue> {
    match value {
        YamlValue::Null => Ok(PropertyValue::Empty),
        YamlValue::Bool(b) => Ok(PropertyValue::Scalar(b.to_string())),
        YamlValue::Number(n) => Ok(PropertyValue::Scalar(n.to_string())),
        YamlValue::String(s) => Ok(PropertyValue::Scalar(s.clone())),
        YamlValue::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for item in seq {
                match item {
                    YamlValue::Bool(b) => items.push(b.to_string()),
                    YamlValue::Number(n) => items.push(n.to_string()),
                    YamlValue::String(s) => items.push(s.clone()),
                    other => {
                        return Err(invalid_header(
                            path,
                            format!(
                                "list values must be scalars (found {})",
                                yaml_kind(other)
                            ),
                        ));
                    }
                }
            }
            Ok(PropertyValue::List(items))
        }
        other => Err(invalid_header(
            path,
            format!("nested values are not supported (found {})", yaml_kind(other)),
        )),
    }
}

fn value_to_yaml(value: &PropertyValue) -> YamlValue {
    match value {
        PropertyValue::Empty => YamlValue::Null,
        PropertyValue::Scalar(s) => scalar_to_yaml(s),
        PropertyValue::List(items) => {
            YamlValue::Sequence(items.iter().map(|s| scalar_to_yaml(s)).collect())
        }
    }
}

/// Turn a text value back into a typed YAML scalar where the text is the
/// canonical form, so numbers and booleans round-trip unquoted.
fn scalar_to_yaml(s: &str) -> YamlValue {
    if s == "true" {
        return YamlValue::Bool(true);
    }
    if s == "false" {
        return YamlValue::Bool(false);
    }

    if let Ok(i) = s.parse::<i64>() {
        let n = serde_yaml::Number::from(i);
        if n.to_string() == s {
            return YamlValue::Number(n);
        }
    }

    if let Ok(f) = s.parse::<f64>() {
        let n = serde_yaml::Number::from(f);
        if n.to_string() == s {
            return YamlValue::Number(n);
        }
    }

    YamlValue::String(s.to_string())
}

fn invalid_header(path: &Path, message: String) -> FieldnoteError {
    FieldnoteError::InvalidHeader {
        path: path.to_path_buf(),
        message,
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_no_header() {
        let split = split_header("Just some content");
        assert!(split.yaml.is_none());
        assert_eq!(split.body, "Just some content");
    }

    #[test]
    fn test_split_with_header() {
        let split = split_header("---\ntitle: Test\ntags: [a, b]\n---\n\nContent here");
        assert_eq!(split.yaml, Some("title: Test\ntags: [a, b]"));
        assert_eq!(split.body, "\nContent here");
    }

    #[test]
    fn test_split_header_at_eof() {
        let split = split_header("---\ntitle: Test\n---");
        assert_eq!(split.yaml, Some("title: Test"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_split_no_closing_delimiter() {
        let split = split_header("---\ntitle: Test\n\nContent without closing");
        assert!(split.yaml.is_none());
    }

    #[test]
    fn test_split_triple_dash_in_body() {
        let split = split_header("---\ntitle: Test\n---\n\n---\n\nTriple dashes in body");
        assert_eq!(split.yaml, Some("title: Test"));
        assert!(split.body.contains("---"));
    }

    #[test]
    fn test_parse_scalar_and_list() {
        let (props, body) =
            parse("---\ntitle: My Note\ntags:\n  - rust\n  - cli\n---\n\nContent").unwrap();
        assert_eq!(
            props.get("title"),
            Some(&PropertyValue::Scalar("My Note".to_string()))
        );
        assert_eq!(
            props.get("tags"),
            Some(&PropertyValue::List(vec![
                "rust".to_string(),
                "cli".to_string()
            ]))
        );
        assert_eq!(body, "\nContent");
    }

    #[test]
    fn test_parse_empty_value() {
        let (props, _) = parse("---\nstatus:\ntitle: T\n---\nBody").unwrap();
        assert_eq!(props.get("status"), Some(&PropertyValue::Empty));
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let (props, _) = parse("---\nzebra: 1\nalpha: 2\nmid: 3\n---\n").unwrap();
        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, vec!["zebra", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_typed_scalars_as_text() {
        let (props, _) = parse("---\ncount: 42\ndone: true\nrating: 4.5\n---\n").unwrap();
        assert_eq!(props.get("count"), Some(&PropertyValue::Scalar("42".into())));
        assert_eq!(props.get("done"), Some(&PropertyValue::Scalar("true".into())));
        assert_eq!(props.get("rating"), Some(&PropertyValue::Scalar("4.5".into())));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse("---\ninvalid: yaml: syntax:\n---\nContent");
        assert!(matches!(
            result,
            Err(FieldnoteError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_nested_mapping() {
        let result = parse("---\nouter:\n  inner: 1\n---\n");
        assert!(matches!(
            result,
            Err(FieldnoteError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_parse_no_header_returns_text_whole() {
        let (props, body) = parse("\n\nleading blanks kept").unwrap();
        assert!(props.is_empty());
        assert_eq!(body, "\n\nleading blanks kept");
    }

    #[test]
    fn test_serialize_parse_round_trip() {
        let mut props = PropertyMap::new();
        props.add("title", Some("Test"), false);
        props.insert(
            "tags",
            PropertyValue::List(vec!["rust".to_string(), "cli".to_string()]),
        );
        props.add("status", None, false);
        props.add("count", Some("42"), false);

        let text = serialize(&props, "\nBody text\n").unwrap();
        let (reparsed, body) = parse(&text).unwrap();

        assert_eq!(reparsed, props);
        assert_eq!(body, "\nBody text\n");
    }

    #[test]
    fn test_serialize_preserves_body_whitespace() {
        let mut props = PropertyMap::new();
        props.add("title", Some("T"), false);

        let body = "\n\n  indented start\n\ntrailing blanks\n\n\n";
        let text = serialize(&props, body).unwrap();
        let (_, reparsed_body) = parse(&text).unwrap();
        assert_eq!(reparsed_body, body);
    }

    #[test]
    fn test_serialize_unquoted_number() {
        let mut props = PropertyMap::new();
        props.add("count", Some("42"), false);
        let text = serialize(&props, "").unwrap();
        assert!(text.contains("count: 42\n"));
    }

    #[test]
    fn test_serialize_quotes_non_canonical_number_text() {
        let mut props = PropertyMap::new();
        props.add("version", Some("01"), false);
        let text = serialize(&props, "").unwrap();
        let (reparsed, _) = parse(&text).unwrap();
        assert_eq!(
            reparsed.get("version"),
            Some(&PropertyValue::Scalar("01".to_string()))
        );
    }
}
