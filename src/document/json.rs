//! JSON input for component trees.
//!
//! Canonical form:
//!
//! ```json
//! {"type": "page", "props": {"size": "A4"}, "children": [{"type": "text", "children": ["Hi"]}]}
//! ```
//!
//! Keys other than `type`, `props` and `children` are treated as props, so
//! `{"type": "text", "class": "font-bold", "children": ["Hi"]}` also works.
//! Objects without a `type` key may use a shorthand:
//! `{"text": "Hello"}` → `{"type": "text", "children": ["Hello"]}`.

use serde_json::{Map, Value};

use super::{Child, Element, Node, Props};
use crate::error::FolioError;

enum Target {
    Children,
    Prop(&'static str),
}

/// Shorthand keys: (shorthand_key, tag, where the value goes).
///
/// Checked in order when an object has no `"type"` key.
const SHORTHANDS: &[(&str, &str, Target)] = &[
    ("document", "document", Target::Children),
    ("page", "page", Target::Children),
    ("view", "view", Target::Children),
    ("text", "text", Target::Children),
    ("image", "image", Target::Prop("src")),
    ("link", "link", Target::Prop("href")),
];

/// Parse a component tree from a JSON string.
pub fn from_json(input: &str) -> Result<Node, FolioError> {
    let value: Value = serde_json::from_str(input).map_err(|e| {
        FolioError::invalid_document(format!("invalid JSON: {}", e))
            .with_context("line", e.line())
            .with_context("column", e.column())
    })?;
    from_value(value)
}

/// Convert an already-parsed JSON value into a component tree.
pub fn from_value(value: Value) -> Result<Node, FolioError> {
    node_from_value(value, "root")
}

fn invalid(path: &str, message: impl std::fmt::Display) -> FolioError {
    FolioError::invalid_document(format!("{}: {}", path, message)).with_context("path", path)
}

/// Rewrite a shorthand object to canonical `{"type": ...}` form.
fn normalize_shorthand(map: &mut Map<String, Value>) -> Result<(), String> {
    for (key, tag, target) in SHORTHANDS {
        if let Some(value) = map.remove(*key) {
            map.insert("type".into(), Value::String((*tag).into()));
            match target {
                Target::Children => map.insert("children".into(), value),
                Target::Prop(name) => map.insert((*name).into(), value),
            };
            return Ok(());
        }
    }
    Err(format!(
        "component object has no 'type' field and no shorthand key ({})",
        SHORTHANDS
            .iter()
            .map(|(k, _, _)| *k)
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

fn node_from_value(value: Value, path: &str) -> Result<Node, FolioError> {
    let mut obj = match value {
        Value::Object(map) => map,
        other => return Err(invalid(path, format!("expected object, got {}", other))),
    };

    if !obj.contains_key("type") {
        normalize_shorthand(&mut obj).map_err(|e| invalid(path, e))?;
    }

    let tag = match obj.remove("type") {
        Some(Value::String(tag)) if !tag.is_empty() => tag,
        Some(other) => {
            return Err(invalid(path, format!("'type' must be a non-empty string, got {}", other)));
        }
        None => return Err(invalid(path, "missing 'type'")),
    };

    let children = match obj.remove("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => children_from_values(items, path)?,
        Some(single) => vec![child_from_value(single, &format!("{}.children", path))?],
    };

    let mut props_map = match obj.remove("props") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(invalid(path, format!("'props' must be an object, got {}", other)));
        }
    };
    // Inline keys never override explicit props.
    for (key, value) in obj {
        props_map.entry(key).or_insert(value);
    }

    let props: Props = serde_json::from_value(Value::Object(props_map))
        .map_err(|e| invalid(&format!("{}.props", path), e))?;

    Ok(Node::Primitive(Element { tag, props, children }))
}

fn children_from_values(items: Vec<Value>, path: &str) -> Result<Vec<Child>, FolioError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| child_from_value(item, &format!("{}.children[{}]", path, i)))
        .collect()
}

fn child_from_value(value: Value, path: &str) -> Result<Child, FolioError> {
    match value {
        Value::Null => Ok(Child::Null),
        Value::Bool(b) => Ok(Child::Bool(b)),
        Value::String(s) => Ok(Child::Text(s)),
        Value::Number(n) => n
            .as_f64()
            .map(Child::Number)
            .ok_or_else(|| invalid(path, "number out of range")),
        Value::Array(items) => Ok(Child::List(children_from_values(items, path)?)),
        obj @ Value::Object(_) => node_from_value(obj, path).map(Child::Node),
    }
}
