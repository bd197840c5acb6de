//! # Component Tree
//!
//! The declarative input to folio: a tree of nodes, each either a
//! **primitive** (a fixed tag such as `page` or `text`, with props and
//! children) or a **composite** (a function from props to another node,
//! expanded during conversion).
//!
//! ```
//! use folio::document::*;
//!
//! let card = component("Card", |props: &Props| {
//!     let heading = props.get_str("heading").unwrap_or("Untitled").to_string();
//!     view().class("p-4 border rounded").child(text(heading).class("font-bold")).into()
//! });
//!
//! let doc = document()
//!     .title("Quarterly report")
//!     .child(page().size("A4").margin("36 48").child(card.with_prop("heading", "Revenue")));
//! ```
//!
//! The same tree can be read from JSON, see [`from_json`].

mod json;
mod props;

pub use json::{from_json, from_value};
pub use props::{Margin, Orientation, PageSize, Props};

pub use crate::assets::ImageSource;

use std::fmt;
use std::sync::Arc;

use crate::style::Style;

/// Render function of a composite component.
pub type RenderFn = dyn Fn(&Props) -> Node + Send + Sync;

/// A node of the component tree.
#[derive(Debug, Clone)]
pub enum Node {
    Primitive(Element),
    Composite(Composite),
}

impl Node {
    /// Attach a property to the node (the element's or the composite's props).
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let props = match &mut self {
            Node::Primitive(element) => &mut element.props,
            Node::Composite(composite) => &mut composite.props,
        };
        props.extra.insert(key.into(), value.into());
        self
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Primitive(element)
    }
}

impl From<Composite> for Node {
    fn from(composite: Composite) -> Self {
        Node::Composite(composite)
    }
}

/// A primitive node: tag, props, children.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub props: Props,
    pub children: Vec<Child>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::default(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.props.class = Some(class.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.props.style = style;
        self
    }

    pub fn size(mut self, size: impl Into<PageSize>) -> Self {
        self.props.size = Some(size.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.props.orientation = Some(orientation);
        self
    }

    pub fn margin(mut self, margin: impl Into<Margin>) -> Self {
        self.props.margin = Some(margin.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.props.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.props.author = Some(author.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.props.subject = Some(subject.into());
        self
    }

    pub fn src(mut self, src: impl Into<ImageSource>) -> Self {
        self.props.src = Some(src.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.props.href = Some(href.into());
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.extra.insert(key.into(), value.into());
        self
    }
}

/// A function component awaiting expansion.
#[derive(Clone)]
pub struct Composite {
    pub name: String,
    pub props: Props,
    render: Arc<RenderFn>,
}

impl Composite {
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Props) -> Node + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            props: Props::default(),
            render: Arc::new(render),
        }
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.extra.insert(key.into(), value.into());
        self
    }

    /// Invoke the render function once with this node's props.
    pub fn expand(&self) -> Node {
        (self.render)(&self.props)
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// A child slot. Lists nest arbitrarily; `Null` and `Bool` render nothing.
#[derive(Debug, Clone)]
pub enum Child {
    Node(Node),
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
    List(Vec<Child>),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Node(Node::Primitive(element))
    }
}

impl From<Composite> for Child {
    fn from(composite: Composite) -> Self {
        Child::Node(Node::Composite(composite))
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Number(n)
    }
}

impl From<i64> for Child {
    fn from(n: i64) -> Self {
        Child::Number(n as f64)
    }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self {
        Child::Bool(b)
    }
}

impl From<Vec<Child>> for Child {
    fn from(items: Vec<Child>) -> Self {
        Child::List(items)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Child::Null)
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn document() -> Element {
    Element::new("document")
}

pub fn page() -> Element {
    Element::new("page")
}

pub fn view() -> Element {
    Element::new("view")
}

pub fn text(content: impl Into<String>) -> Element {
    Element::new("text").child(content.into())
}

pub fn image(src: impl Into<ImageSource>) -> Element {
    Element::new("image").src(src)
}

pub fn link(href: impl Into<String>) -> Element {
    Element::new("link").href(href)
}

/// Define a composite component.
pub fn component<F>(name: impl Into<String>, render: F) -> Composite
where
    F: Fn(&Props) -> Node + Send + Sync + 'static,
{
    Composite::new(name, render)
}
