//! Component properties.
//!
//! `Props` is the property bag carried by every node of the component tree.
//! It deserializes from JSON with camelCase keys; anything it does not know
//! lands in `extra`, where composite components can read it.

use serde::Deserialize;

use crate::assets::ImageSource;
use crate::error::FolioError;
use crate::ir::page::{Edges, PageDimensions};
use crate::style::Style;

/// Properties shared by all component kinds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Props {
    /// Utility-class string, e.g. `"p-4 text-lg font-bold"`.
    #[serde(alias = "className", alias = "tw")]
    pub class: Option<String>,
    /// Explicit style map. Wins over `class` for any shared key.
    pub style: Style,

    // Page
    pub size: Option<PageSize>,
    pub orientation: Option<Orientation>,
    pub margin: Option<Margin>,

    // Document metadata
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,

    /// Image source (`image` nodes).
    pub src: Option<ImageSource>,
    /// Link target (`link` nodes).
    pub href: Option<String>,

    /// Everything else, for composite components.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an extra property, if present.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}

/// Page size: a named preset or explicit dimensions in points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageSize {
    Named(String),
    Custom(PageDimensions),
}

impl PageSize {
    pub fn resolve(&self) -> Result<PageDimensions, FolioError> {
        match self {
            PageSize::Custom(dims) => {
                if dims.width > 0.0 && dims.height > 0.0 {
                    Ok(*dims)
                } else {
                    Err(FolioError::invalid_document(format!(
                        "page size must be positive, got {}x{}",
                        dims.width, dims.height
                    )))
                }
            }
            PageSize::Named(name) => PageDimensions::from_name(name).ok_or_else(|| {
                FolioError::invalid_document(format!("unknown page size {:?}", name))
                    .with_context("size", name.as_str())
                    .with_suggestion(
                        "use A3, A4, A5, A6, B4, B5, LETTER, LEGAL, TABLOID, EXECUTIVE or {width, height}",
                    )
            }),
        }
    }
}

impl From<&str> for PageSize {
    fn from(name: &str) -> Self {
        PageSize::Named(name.to_string())
    }
}

impl From<PageDimensions> for PageSize {
    fn from(dims: PageDimensions) -> Self {
        PageSize::Custom(dims)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Margin input: a number, a CSS-style shorthand string, or per-edge values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Margin {
    Uniform(f64),
    Shorthand(String),
    Edges {
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
        left: Option<f64>,
    },
}

impl Margin {
    /// Normalize to four populated edges; missing edges are zero.
    pub fn to_edges(&self) -> Result<Edges, FolioError> {
        match self {
            Margin::Uniform(value) => Ok(Edges::uniform(*value)),
            Margin::Shorthand(text) => Edges::parse_shorthand(text),
            Margin::Edges { top, right, bottom, left } => {
                Ok(Edges::from_partial(*top, *right, *bottom, *left))
            }
        }
    }
}

impl From<f64> for Margin {
    fn from(value: f64) -> Self {
        Margin::Uniform(value)
    }
}

impl From<&str> for Margin {
    fn from(value: &str) -> Self {
        Margin::Shorthand(value.to_string())
    }
}

impl From<Edges> for Margin {
    fn from(edges: Edges) -> Self {
        Margin::Edges {
            top: Some(edges.top),
            right: Some(edges.right),
            bottom: Some(edges.bottom),
            left: Some(edges.left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_props_from_json() {
        let props: Props = serde_json::from_str(
            r##"{
                "className": "p-4",
                "style": {"color": "#111111"},
                "size": "letter",
                "orientation": "landscape",
                "margin": "10 20",
                "title": "Report",
                "variant": "compact"
            }"##,
        )
        .unwrap();
        assert_eq!(props.class.as_deref(), Some("p-4"));
        assert_eq!(props.size, Some(PageSize::Named("letter".into())));
        assert_eq!(props.orientation, Some(Orientation::Landscape));
        assert_eq!(props.margin, Some(Margin::Shorthand("10 20".into())));
        assert_eq!(props.title.as_deref(), Some("Report"));
        assert_eq!(props.get_str("variant"), Some("compact"));
    }

    #[test]
    fn test_margin_forms() {
        assert_eq!(Margin::from(20.0).to_edges().unwrap(), Edges::uniform(20.0));
        assert_eq!(
            Margin::from("10 20").to_edges().unwrap(),
            Edges::new(10.0, 20.0, 10.0, 20.0)
        );
        let partial: Margin = serde_json::from_str(r#"{"top": 5, "left": 3}"#).unwrap();
        assert_eq!(partial.to_edges().unwrap(), Edges::new(5.0, 0.0, 0.0, 3.0));
    }

    #[test]
    fn test_custom_page_size() {
        let size: PageSize = serde_json::from_str(r#"{"width": 300, "height": 400}"#).unwrap();
        assert_eq!(size.resolve().unwrap(), PageDimensions::new(300.0, 400.0));
    }

    #[test]
    fn test_unknown_named_size() {
        let err = PageSize::from("A9").resolve().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDocument);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let size = PageSize::Custom(PageDimensions::new(0.0, 100.0));
        assert!(size.resolve().is_err());
    }
}
