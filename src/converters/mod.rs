//! JSON Converters
//!
//! This module converts document trees to JSON and back.
//!
//! The document root becomes a single-key object. An element without
//! attributes or child elements becomes its text (or `null` when empty);
//! anything else becomes an object with prefixed attribute keys, a text key
//! and one key per child element name. Repeated children become arrays.
//!
//! The conversion is lossy: the relative order of differently named children
//! and of text runs in mixed content is not kept, and neither are positions.

mod base;

pub use base::ConverterConfig;

use serde_json::{Map, Value as JsonValue};

use crate::documents::Node;
use crate::error::{Error, Result};
use crate::names::{is_valid_name, local_name};

/// Convert a document tree to JSON
pub fn to_json(root: &Node, config: &ConverterConfig) -> JsonValue {
    let mut object = Map::new();
    object.insert(element_key(root, config), element_value(root, config));
    JsonValue::Object(object)
}

fn element_key(node: &Node, config: &ConverterConfig) -> String {
    if config.strip_namespaces() {
        local_name(&node.name).to_string()
    } else {
        node.name.clone()
    }
}

fn element_value(node: &Node, config: &ConverterConfig) -> JsonValue {
    let texts: Vec<&str> = match &node.text {
        Some(text) => vec![text.as_str()],
        None => node
            .children
            .iter()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text.as_deref())
            .collect(),
    };

    let has_elements = node.element_children().next().is_some();
    if node.attributes.is_empty() && !has_elements {
        return match texts.first() {
            Some(text) => JsonValue::String(text.to_string()),
            None => JsonValue::Null,
        };
    }

    let mut object = Map::new();
    for (name, value) in &node.attributes {
        object.insert(config.attribute_key(name), JsonValue::String(value.clone()));
    }

    match texts.as_slice() {
        [] => {}
        [text] => {
            object.insert(config.text_key().to_string(), JsonValue::String(text.to_string()));
        }
        many => {
            let runs = many.iter().map(|t| JsonValue::String(t.to_string())).collect();
            object.insert(config.text_key().to_string(), JsonValue::Array(runs));
        }
    }

    for child in node.element_children() {
        let key = element_key(child, config);
        let value = element_value(child, config);
        match object.get_mut(&key) {
            Some(JsonValue::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = JsonValue::Array(vec![first, value]);
            }
            None => {
                object.insert(key, value);
            }
        }
    }

    JsonValue::Object(object)
}

/// Rebuild a document tree from JSON produced by [`to_json`]
///
/// The top-level value must be an object with exactly one key, the root name.
pub fn from_json(value: &JsonValue, config: &ConverterConfig) -> Result<Node> {
    let object = match value {
        JsonValue::Object(object) if object.len() == 1 => object,
        _ => {
            return Err(Error::Convert(
                "top-level JSON value must be an object with a single key".to_string(),
            ))
        }
    };

    match object.iter().next() {
        Some((name, content)) => build_node(name, content, config),
        None => Err(Error::Convert("missing root element".to_string())),
    }
}

fn build_node(name: &str, value: &JsonValue, config: &ConverterConfig) -> Result<Node> {
    if !is_valid_name(name) {
        return Err(Error::Convert(format!("Invalid element name '{}'", name)));
    }

    let mut node = Node::new(name);
    let mut texts = Vec::new();

    match value {
        JsonValue::Object(object) => {
            for (key, item) in object {
                if key == config.text_key() {
                    match item {
                        JsonValue::Array(runs) => {
                            for run in runs {
                                texts.push(scalar_text(run, key)?);
                            }
                        }
                        other => texts.push(scalar_text(other, key)?),
                    }
                } else if let Some(attribute) = config.attribute_name(key) {
                    node.attributes
                        .insert(attribute.to_string(), scalar_text(item, key)?);
                } else if let JsonValue::Array(items) = item {
                    for item in items {
                        node.children.push(build_node(key, item, config)?);
                    }
                } else {
                    node.children.push(build_node(key, item, config)?);
                }
            }
        }
        JsonValue::Array(_) => {
            return Err(Error::Convert(format!(
                "Unexpected array as content of element '{}'",
                name
            )))
        }
        JsonValue::Null => {}
        scalar => texts.push(scalar_text(scalar, name)?),
    }

    texts.retain(|t| !t.is_empty());
    if node.children.is_empty() {
        if !texts.is_empty() {
            node.text = Some(texts.concat());
        }
    } else {
        node.children.extend(texts.into_iter().map(Node::text_node));
    }

    Ok(node)
}

fn scalar_text(value: &JsonValue, key: &str) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Null => Ok(String::new()),
        _ => Err(Error::Convert(format!(
            "Expected a scalar value for '{}'",
            key
        ))),
    }
}
