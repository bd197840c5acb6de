//! # Tree Conversion
//!
//! Walks a component tree and produces an [`IrDocument`] skeleton plus the
//! font and image manifests. No asset is fetched here; deferred image
//! producers are recorded and left for the asset batch.
//!
//! Per node:
//!
//! 1. expand composites until a primitive is reached (capped)
//! 2. classify the tag into a [`NodeKind`]
//! 3. merge styles: utility classes first, explicit `style` on top
//! 4. flatten children, dropping `null`/booleans, turning strings and
//!    numbers into text
//! 5. record font and image usage
//!
//! Then pages are extracted from the root.

mod usage;

use std::borrow::Cow;

use crate::config::ConvertOptions;
use crate::document::{Child, Element, Node, Orientation};
use crate::error::{ErrorCode, FolioError};
use crate::ir::page::{Edges, PageDimensions};
use crate::ir::{IrDocument, IrNode, IrPage, Metadata, NodeKind};
use crate::style::{self, Style};
use usage::{Typography, UsageCollector};

/// Converts component trees into IR documents.
#[derive(Debug, Clone, Default)]
pub struct TreeConverter {
    options: ConvertOptions,
}

/// A child after list flattening.
enum Flat<'a> {
    Node(&'a Node),
    Text(String),
}

impl TreeConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a whole tree.
    ///
    /// A `document` root yields its `page` children; a `page` root yields
    /// itself; anything else is wrapped in one default page.
    pub fn convert(&self, root: &Node) -> Result<IrDocument, FolioError> {
        let mut usage = UsageCollector::default();
        let root = self.expand(root)?;
        let kind = NodeKind::from_tag(&root.tag);

        let (pages, metadata) = match kind {
            NodeKind::Document => {
                let pages = self.convert_document(&root, &mut usage)?;
                (pages, Some(metadata_from(&root)))
            }
            NodeKind::Page => {
                let node = self.convert_element(&root, &Typography::default(), &mut usage, 0)?;
                (vec![IrPage::from_node(node, self.options.default_page_size)], None)
            }
            _ => {
                let node = self.convert_element(&root, &Typography::default(), &mut usage, 0)?;
                let page = IrPage {
                    size: self.options.default_page_size,
                    margin: Edges::zero(),
                    style: Style::new(),
                    children: vec![node],
                };
                (vec![page], None)
            }
        };

        let (fonts, images) = usage.finish();
        log::debug!(
            "converted {} page(s), {} font famil(ies), {} image(s)",
            pages.len(),
            fonts.len(),
            images.len()
        );

        Ok(IrDocument {
            fonts,
            images,
            metadata,
            ..IrDocument::new(pages)
        })
    }

    fn convert_document(
        &self,
        root: &Element,
        usage: &mut UsageCollector,
    ) -> Result<Vec<IrPage>, FolioError> {
        let style = merged_style(root);
        let (typography, declares) = Typography::default().apply(&style);
        if declares {
            usage.record_font(&typography);
        }

        let mut pages = Vec::new();
        for child in flatten_children(&root.children) {
            let Flat::Node(node) = child else {
                log::warn!("dropping text outside of a page");
                continue;
            };
            let element = self.expand(node)?;
            if NodeKind::from_tag(&element.tag) != NodeKind::Page {
                log::warn!("dropping non-page child <{}> of document", element.tag);
                continue;
            }
            let node = self.convert_element(&element, &typography, usage, 1)?;
            pages.push(IrPage::from_node(node, self.options.default_page_size));
        }

        if pages.is_empty() {
            return Err(FolioError::new(ErrorCode::NoPages, "Document has no pages")
                .with_suggestion("add at least one page as a direct child of the document"));
        }
        Ok(pages)
    }

    /// Expand composites until a primitive is reached.
    fn expand<'a>(&self, node: &'a Node) -> Result<Cow<'a, Element>, FolioError> {
        let composite = match node {
            Node::Primitive(element) => return Ok(Cow::Borrowed(element)),
            Node::Composite(composite) => composite,
        };

        let mut next = composite.expand();
        let mut expansions = 1;
        loop {
            match next {
                Node::Primitive(element) => return Ok(Cow::Owned(element)),
                Node::Composite(inner) => {
                    if expansions >= self.options.max_composite_depth {
                        return Err(FolioError::new(
                            ErrorCode::ComponentDepthExceeded,
                            format!(
                                "Component <{}> did not reach a primitive after {} expansions",
                                composite.name, expansions
                            ),
                        )
                        .with_context("component", composite.name.as_str())
                        .with_context("last", inner.name.as_str())
                        .with_context("limit", self.options.max_composite_depth)
                        .with_suggestion("check for a component that renders itself"));
                    }
                    next = inner.expand();
                    expansions += 1;
                }
            }
        }
    }

    fn convert_node(
        &self,
        node: &Node,
        inherited: &Typography,
        usage: &mut UsageCollector,
        depth: usize,
    ) -> Result<IrNode, FolioError> {
        let element = self.expand(node)?;
        self.convert_element(&element, inherited, usage, depth)
    }

    fn convert_element(
        &self,
        element: &Element,
        inherited: &Typography,
        usage: &mut UsageCollector,
        depth: usize,
    ) -> Result<IrNode, FolioError> {
        if depth > self.options.max_tree_depth {
            return Err(FolioError::new(
                ErrorCode::ComponentDepthExceeded,
                format!("Tree nested deeper than {} levels", self.options.max_tree_depth),
            )
            .with_context("tag", element.tag.as_str())
            .with_context("limit", self.options.max_tree_depth));
        }

        let kind = NodeKind::from_tag(&element.tag);
        let mut ir = IrNode::new(kind);
        ir.style = merged_style(element);

        let (typography, declares) = inherited.apply(&ir.style);
        if declares {
            usage.record_font(&typography);
        }

        match kind {
            NodeKind::Page => {
                ir.props.size = Some(self.page_size(element)?);
                ir.props.margin = Some(match &element.props.margin {
                    Some(margin) => margin.to_edges()?,
                    None => Edges::zero(),
                });
            }
            NodeKind::Image => {
                let source = element.props.src.as_ref().ok_or_else(|| {
                    FolioError::new(ErrorCode::InvalidImageSource, "Image node has no src")
                        .with_suggestion("set src to a URL, a data URI, bytes or a deferred source")
                })?;
                ir.props.image_id = Some(usage.record_image(source));
            }
            NodeKind::Link => ir.props.href = element.props.href.clone(),
            _ => {}
        }

        let children = flatten_children(&element.children);

        // Text made only of strings collapses into its content.
        if kind == NodeKind::Text && children.iter().all(|c| matches!(c, Flat::Text(_))) {
            let content: String = children
                .into_iter()
                .filter_map(|c| match c {
                    Flat::Text(text) => Some(text),
                    Flat::Node(_) => None,
                })
                .collect();
            ir.props.content = Some(content);
            return Ok(ir);
        }

        for child in children {
            let converted = match child {
                Flat::Text(text) => IrNode::text(text),
                Flat::Node(node) => self.convert_node(node, &typography, usage, depth + 1)?,
            };
            ir.children.push(converted);
        }
        Ok(ir)
    }

    fn page_size(&self, element: &Element) -> Result<PageDimensions, FolioError> {
        let size = match &element.props.size {
            Some(size) => size.resolve()?,
            None => self.options.default_page_size,
        };
        Ok(match element.props.orientation {
            Some(Orientation::Landscape) => size.landscape(),
            Some(Orientation::Portrait) => size.portrait(),
            None => size,
        })
    }
}

/// Class-derived style with the explicit style map on top.
fn merged_style(element: &Element) -> Style {
    let classes = element
        .props
        .class
        .as_deref()
        .map(style::resolve_classes)
        .unwrap_or_default();
    style::merge(&classes, &element.props.style)
}

/// Flatten nested child lists in order, without recursion.
fn flatten_children(children: &[Child]) -> Vec<Flat<'_>> {
    let mut out = Vec::with_capacity(children.len());
    let mut stack = vec![children.iter()];
    while let Some(iter) = stack.last_mut() {
        let Some(child) = iter.next() else {
            stack.pop();
            continue;
        };
        match child {
            Child::Node(node) => out.push(Flat::Node(node)),
            Child::Text(text) => out.push(Flat::Text(text.clone())),
            Child::Number(n) => out.push(Flat::Text(format_number(*n))),
            Child::List(items) => stack.push(items.iter()),
            Child::Bool(_) | Child::Null => {}
        }
    }
    out
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn metadata_from(root: &Element) -> Metadata {
    let props = &root.props;
    Metadata {
        title: props.title.clone(),
        author: props.author.clone(),
        subject: props.subject.clone(),
        keywords: props.keywords.clone(),
        creator: Some(props.creator.clone().unwrap_or_else(|| "folio".to_string())),
        producer: props.producer.clone(),
        creation_date: Some(chrono::Utc::now()),
    }
}
