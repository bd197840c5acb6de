//! # Styles
//!
//! A [`Style`] is a flat map of layout, typography and visual properties
//! (camelCase keys such as `paddingTop` or `fontWeight`). Values are either
//! numbers (points, weights, ratios) or strings (percentages, colors,
//! keywords). A style never holds a null value: nulls are dropped on input.
//!
//! Two syntaxes produce styles:
//!
//! - explicit property maps ([`Style`] built in Rust or deserialized from JSON)
//! - utility-class strings, resolved by [`resolve_classes`]
//!
//! [`merge`] combines them; the override argument always wins per key.
//!
//! ```
//! use folio::style::{merge, resolve_classes, Style};
//!
//! let classes = resolve_classes("p-4 text-red-500");
//! let explicit = Style::new().with("color", "#000000");
//! let merged = merge(&classes, &explicit);
//! assert_eq!(merged.get("color").and_then(|v| v.as_str()), Some("#000000"));
//! assert_eq!(merged.get("padding").and_then(|v| v.as_f64()), Some(16.0));
//! ```

mod classes;
mod palette;

pub use classes::resolve_classes;
pub use palette::color;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Percentage string with up to six decimals, e.g. `33.333333%`.
    pub fn percent(value: f64) -> Self {
        let formatted = format!("{:.6}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        StyleValue::Text(format!("{}%", trimmed))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// Flat, ordered style property map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, StyleValue>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Assign a property; a later assignment to the same key replaces the earlier one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, StyleValue)> for Style {
    fn from_iter<I: IntoIterator<Item = (String, StyleValue)>>(iter: I) -> Self {
        Style(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let mut style = Style::new();
        for (key, value) in raw {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::Number(n) => {
                    let n = n.as_f64().ok_or_else(|| {
                        serde::de::Error::custom(format!("style.{}: number out of range", key))
                    })?;
                    style.set(key, n);
                }
                serde_json::Value::String(s) => style.set(key, s),
                serde_json::Value::Bool(b) => style.set(key, b.to_string()),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "style.{}: expected number or string, got {}",
                        key, other
                    )));
                }
            }
        }
        Ok(style)
    }
}

/// Shallow merge: every key of `overrides` replaces the same key of `base`.
///
/// Keys present in only one argument are kept as-is.
pub fn merge(base: &Style, overrides: &Style) -> Style {
    let mut merged = base.clone();
    for (key, value) in overrides.iter() {
        merged.set(key.clone(), value.clone());
    }
    merged
}
