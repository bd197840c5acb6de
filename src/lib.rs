//! # Folio - Declarative Documents to Engine-Ready IR
//!
//! Folio takes a declarative tree of document components (documents,
//! pages, containers, text, images, links) and produces a normalized,
//! engine-agnostic intermediate representation with every font and image
//! it references resolved to bytes. It provides:
//!
//! - **Utility-class styling**: `"p-4 text-lg font-bold"` → style maps
//! - **Tree conversion**: composite expansion, style merging, page extraction
//! - **Asset resolution**: cached, concurrent font and image loading
//! - **Engine handoff**: a pluggable [`render::RenderEngine`] contract
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{
//!     assets::AssetContext,
//!     config::FolioConfig,
//!     document::{document, page, text, view},
//!     render::DocumentAssembler,
//! };
//!
//! # async fn run() -> Result<(), folio::FolioError> {
//! let config = FolioConfig::default();
//! let assets = AssetContext::http(config.assets.clone())?;
//! let assembler = DocumentAssembler::new(assets, config.convert.clone());
//!
//! let tree = document()
//!     .title("Invoice")
//!     .child(page().size("A4").margin(36.0).child(
//!         view().class("p-4 font-sans").child(text("Hello").class("text-2xl font-bold")),
//!     ));
//!
//! let ctx = assembler.assemble(&tree.into()).await?;
//! assert_eq!(ctx.document.pages.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Component tree, builders, JSON input |
//! | [`style`] | Utility-class resolver and style merging |
//! | [`convert`] | Component tree → IR |
//! | [`ir`] | IR types and page geometry |
//! | [`assets`] | Font and image resolution, caches, HTTP |
//! | [`render`] | Document assembly and engine registry |
//! | [`config`] | Configuration |
//! | [`error`] | Error types |

pub mod assets;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod ir;
pub mod render;
pub mod style;

// Re-exports for convenience
pub use config::FolioConfig;
pub use error::{ErrorCode, FolioError};
pub use ir::IrDocument;
pub use render::{DocumentAssembler, RenderContext, RenderEngine, Renderer};
