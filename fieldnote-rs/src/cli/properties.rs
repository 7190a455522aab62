//! Property commands implementation.

use crate::cli::args::{
    AddPropertyArgs, GetPropertiesArgs, RemovePropertyArgs, ReorderPropertiesArgs,
};
use crate::cli::output::Output;
use crate::document::Document;
use crate::error::{FieldnoteError, Result};
use crate::properties::{PropertyMap, PropertyValue};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ModifyResponse {
    pub path: String,
    pub message: String,
}

/// Flatten a property map into a JSON object for output.
pub fn properties_to_json(properties: &PropertyMap) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, value) in properties.iter() {
        let json = match value {
            PropertyValue::Empty => serde_json::Value::Null,
            PropertyValue::Scalar(s) => serde_json::Value::String(s.clone()),
            PropertyValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        };
        map.insert(key.to_string(), json);
    }
    serde_json::Value::Object(map)
}

// === get-properties ===

pub fn get(args: &GetPropertiesArgs, output: &Output) -> Result<()> {
    let doc = Document::open(&args.path)?;
    let data = properties_to_json(doc.properties());

    if let Some(ref key) = args.key {
        match data.get(key) {
            Some(value) => output.print(value),
            None => Err(FieldnoteError::Other(format!(
                "Key '{}' not found in properties",
                key
            ))),
        }
    } else {
        output.print(&data)
    }
}

// === add-property ===

pub fn add(args: &AddPropertyArgs, output: &Output) -> Result<()> {
    let mut doc = Document::open(&args.path)?;

    if args.empty_list {
        if !doc.has_property(&args.key) {
            doc.properties_mut()
                .insert(args.key.clone(), PropertyValue::List(Vec::new()));
        }
    } else {
        doc.add_property(&args.key, args.value.as_deref(), args.overwrite);
    }

    doc.write(None)?;

    output.print(&ModifyResponse {
        path: doc.path.to_string_lossy().to_string(),
        message: format!("Property '{}' added", args.key),
    })
}

// === remove-property ===

pub fn remove(args: &RemovePropertyArgs, output: &Output) -> Result<()> {
    let mut doc = Document::open(&args.path)?;

    doc.remove_property(&args.key, args.value.as_deref(), args.remove_key);
    doc.write(None)?;

    let message = if args.remove_key {
        format!("Property '{}' removed", args.key)
    } else {
        format!("Property '{}' value cleared", args.key)
    };

    output.print(&ModifyResponse {
        path: doc.path.to_string_lossy().to_string(),
        message,
    })
}

// === reorder-properties ===

pub fn reorder(args: &ReorderPropertiesArgs, output: &Output) -> Result<()> {
    let mut doc = Document::open(&args.path)?;

    doc.reorder_properties(&args.keys, !args.bottom);
    doc.write(None)?;

    output.print(&ModifyResponse {
        path: doc.path.to_string_lossy().to_string(),
        message: "Properties reordered".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_to_json() {
        let mut props = PropertyMap::new();
        props.add("title", Some("Test"), false);
        props.insert(
            "tags",
            PropertyValue::List(vec!["a".to_string(), "b".to_string()]),
        );
        props.add("status", None, false);

        let json = properties_to_json(&props);
        assert_eq!(json["title"], serde_json::json!("Test"));
        assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(json["status"], serde_json::Value::Null);
    }
}
