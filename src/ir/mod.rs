//! # Intermediate Representation (IR)
//!
//! The IR is the engine-agnostic form of a document: pages of typed nodes
//! with flattened styles, plus manifests of every font and image the
//! document needs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌──────────┐
//! │ Components  │ ──► │     IR      │ ──► │  Assets   │ ──► │  Engine  │
//! │(declarative)│     │ (IrDocument)│     │ (resolve) │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └───────────┘     └──────────┘
//! ```
//!
//! An `IrDocument` is built fresh per render and never mutated once
//! handed to an engine. It serializes to JSON for inspection:
//!
//! ```
//! use folio::convert::TreeConverter;
//! use folio::document::{document, page, text};
//!
//! let ir = TreeConverter::default()
//!     .convert(&document().child(page().child(text("Hello"))).into())
//!     .unwrap();
//! let json = serde_json::to_value(&ir).unwrap();
//! assert_eq!(json["pages"][0]["children"][0]["kind"], "text");
//! ```

pub mod page;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::assets::fonts::{display_family, normalize_family};
use crate::assets::{FontKey, FontStyle, ImageSource};
use crate::style::Style;
use page::{Edges, PageDimensions};

pub const IR_VERSION: &str = "1.0";

/// The six node kinds an engine has to understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Page,
    Container,
    Text,
    Image,
    Link,
}

impl NodeKind {
    /// Classify a primitive tag. Unknown tags are containers.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "document" => NodeKind::Document,
            "page" => NodeKind::Page,
            "text" | "span" => NodeKind::Text,
            "image" | "img" => NodeKind::Image,
            "link" | "a" => NodeKind::Link,
            _ => NodeKind::Container,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Page => "page",
            NodeKind::Container => "container",
            NodeKind::Text => "text",
            NodeKind::Image => "image",
            NodeKind::Link => "link",
        }
    }
}

/// Kind-specific properties of an [`IrNode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IrProps {
    /// Text content (`text` nodes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Key into the resolved image map (`image` nodes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<PageDimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrNode {
    pub kind: NodeKind,
    pub style: Style,
    pub children: Vec<IrNode>,
    pub props: IrProps,
}

impl IrNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            style: Style::new(),
            children: Vec::new(),
            props: IrProps::default(),
        }
    }

    /// A text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text);
        node.props.content = Some(content.into());
        node
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(content) = &self.props.content {
            out.push_str(content);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrPage {
    pub size: PageDimensions,
    /// Always fully populated; unspecified edges are zero.
    pub margin: Edges,
    /// The page node's own merged style.
    pub style: Style,
    pub children: Vec<IrNode>,
}

impl IrPage {
    /// Lift a converted `page` node into a page.
    pub fn from_node(node: IrNode, default_size: PageDimensions) -> Self {
        Self {
            size: node.props.size.unwrap_or(default_size),
            margin: node.props.margin.unwrap_or_default(),
            style: node.style,
            children: node.children,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Every weight and style a document uses for one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontUsage {
    /// Normalized family name.
    pub family: String,
    /// Family name as first written in the tree.
    pub name: String,
    pub weights: BTreeSet<u16>,
    pub styles: BTreeSet<FontStyle>,
}

impl FontUsage {
    pub fn new(family: &str, weights: BTreeSet<u16>, styles: BTreeSet<FontStyle>) -> Self {
        Self {
            family: normalize_family(family),
            name: display_family(family),
            weights,
            styles,
        }
    }

    /// Every (weight, style) face of the family, weights × styles.
    pub fn faces(&self) -> Vec<FontKey> {
        self.weights
            .iter()
            .flat_map(|&weight| {
                self.styles
                    .iter()
                    .map(move |&style| FontKey::new(&self.family, weight, style))
            })
            .collect()
    }
}

/// An image referenced by the document, keyed by source identity.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUsage {
    pub id: String,
    pub source: ImageSource,
}

impl ImageUsage {
    pub fn new(source: ImageSource) -> Self {
        Self {
            id: source.identity(),
            source,
        }
    }
}

/// A converted document, ready for asset resolution.
#[derive(Debug, Clone, Serialize)]
pub struct IrDocument {
    pub version: String,
    pub pages: Vec<IrPage>,
    pub fonts: Vec<FontUsage>,
    pub images: Vec<ImageUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl IrDocument {
    pub fn new(pages: Vec<IrPage>) -> Self {
        Self {
            version: IR_VERSION.to_string(),
            pages,
            fonts: Vec::new(),
            images: Vec::new(),
            metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(NodeKind::from_tag("page"), NodeKind::Page);
        assert_eq!(NodeKind::from_tag("IMG"), NodeKind::Image);
        assert_eq!(NodeKind::from_tag("a"), NodeKind::Link);
        assert_eq!(NodeKind::from_tag("view"), NodeKind::Container);
        assert_eq!(NodeKind::from_tag("section"), NodeKind::Container);
    }

    #[test]
    fn test_font_usage_faces_cross_product() {
        let usage = FontUsage::new(
            "Open Sans",
            BTreeSet::from([400, 700]),
            BTreeSet::from([FontStyle::Normal, FontStyle::Italic]),
        );
        assert_eq!(usage.name, "Open Sans");
        let faces = usage.faces();
        assert_eq!(faces.len(), 4);
        assert!(faces.contains(&FontKey::new("open-sans", 700, FontStyle::Italic)));
    }

    #[test]
    fn test_page_from_node_defaults() {
        let page = IrPage::from_node(IrNode::new(NodeKind::Page), PageDimensions::LETTER);
        assert_eq!(page.size, PageDimensions::LETTER);
        assert_eq!(page.margin, Edges::zero());
    }

    #[test]
    fn test_text_content_walks_children() {
        let mut node = IrNode::new(NodeKind::Text);
        node.children.push(IrNode::text("Hello, "));
        node.children.push(IrNode::text("world"));
        assert_eq!(node.text_content(), "Hello, world");
    }

    #[test]
    fn test_props_skip_empty_fields() {
        let json = serde_json::to_value(IrNode::text("x")).unwrap();
        assert_eq!(json["props"], serde_json::json!({"content": "x"}));
        assert_eq!(json["kind"], "text");
    }
}
