//! # Rendering Module
//!
//! Hands assembled documents to a rendering engine.
//!
//! ## Modules
//!
//! - [`assemble`]: conversion plus concurrent font/image loading
//! - [`context`]: the [`RenderContext`] an engine receives
//!
//! ## Usage Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use folio::render::{EngineError, RenderContext, RenderEngine, Renderer};
//! use folio::document::{document, page, text};
//!
//! struct PageCount;
//!
//! #[async_trait]
//! impl RenderEngine for PageCount {
//!     fn name(&self) -> &str {
//!         "pages"
//!     }
//!
//!     async fn render(&self, ctx: &RenderContext) -> Result<Vec<u8>, EngineError> {
//!         Ok(ctx.document.pages.len().to_string().into_bytes())
//!     }
//! }
//!
//! # async fn run() -> Result<(), folio::FolioError> {
//! let renderer = Renderer::from_config(&Default::default())?.with_engine(PageCount);
//! let bytes = renderer
//!     .render(&document().child(page().child(text("Hi"))).into(), "pages")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod context;

pub use assemble::DocumentAssembler;
pub use context::RenderContext;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assets::AssetContext;
use crate::config::{ConvertOptions, FolioConfig};
use crate::document::Node;
use crate::error::{ErrorCode, FolioError};

/// Failure type returned by engines. Normalized with [`FolioError::wrap`].
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

/// A backend that turns a [`RenderContext`] into document bytes (e.g. PDF).
#[async_trait]
pub trait RenderEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn render(&self, ctx: &RenderContext) -> Result<Vec<u8>, EngineError>;
}

/// Named engines over one shared asset context.
#[derive(Clone)]
pub struct Renderer {
    assembler: DocumentAssembler,
    assets: AssetContext,
    engines: BTreeMap<String, Arc<dyn RenderEngine>>,
}

impl Renderer {
    pub fn new(assets: AssetContext, options: ConvertOptions) -> Self {
        Self {
            assembler: DocumentAssembler::new(assets.clone(), options),
            assets,
            engines: BTreeMap::new(),
        }
    }

    /// Renderer with an HTTP-backed asset context.
    pub fn from_config(config: &FolioConfig) -> Result<Self, FolioError> {
        let assets = AssetContext::http(config.assets.clone())?;
        Ok(Self::new(assets, config.convert.clone()))
    }

    /// Register an engine under its own name, replacing any previous one.
    pub fn register_engine(&mut self, engine: impl RenderEngine + 'static) {
        let name = engine.name().to_string();
        log::debug!("registered render engine {:?}", name);
        self.engines.insert(name, Arc::new(engine));
    }

    pub fn with_engine(mut self, engine: impl RenderEngine + 'static) -> Self {
        self.register_engine(engine);
        self
    }

    /// Names of the registered engines, sorted.
    pub fn engines(&self) -> Vec<&str> {
        self.engines.keys().map(String::as_str).collect()
    }

    pub fn assets(&self) -> &AssetContext {
        &self.assets
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }

    /// Convert and resolve assets without rendering.
    pub async fn prepare(&self, root: &Node) -> Result<RenderContext, FolioError> {
        self.assembler.assemble(root).await
    }

    /// Full pipeline: convert, resolve assets, render with the named engine.
    pub async fn render(&self, root: &Node, engine: &str) -> Result<Vec<u8>, FolioError> {
        let backend = self.engines.get(engine).cloned().ok_or_else(|| {
            FolioError::new(ErrorCode::UnknownEngine, format!("Unknown engine {:?}", engine))
                .with_context("engine", engine)
                .with_context("available", self.engines())
                .with_suggestion("register the engine with Renderer::register_engine")
        })?;

        let ctx = self.prepare(root).await?;
        let bytes = backend.render(&ctx).await.map_err(FolioError::wrap)?;
        log::info!("engine {:?} produced {} bytes", engine, bytes.len());
        Ok(bytes)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("assets", &self.assets)
            .field("engines", &self.engines())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::StaticFetcher;
    use crate::assets::{FontSource, FontStyle};
    use crate::config::AssetOptions;
    use crate::document::{document, image, page, text};

    struct Echo;

    #[async_trait]
    impl RenderEngine for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn render(&self, ctx: &RenderContext) -> Result<Vec<u8>, EngineError> {
            Ok(ctx
                .document
                .pages
                .iter()
                .map(|p| p.children.iter().map(|c| c.text_content()).collect::<String>())
                .collect::<Vec<_>>()
                .join("|")
                .into_bytes())
        }
    }

    struct Broken;

    #[async_trait]
    impl RenderEngine for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn render(&self, _: &RenderContext) -> Result<Vec<u8>, EngineError> {
            Err("glyph table exploded".into())
        }
    }

    async fn renderer(fetcher: StaticFetcher) -> (Renderer, Arc<StaticFetcher>) {
        let fetcher = Arc::new(fetcher);
        let assets = AssetContext::new(fetcher.clone(), AssetOptions::default());
        let renderer = Renderer::new(assets, ConvertOptions::default())
            .with_engine(Echo)
            .with_engine(Broken);
        renderer
            .assembler()
            .fonts()
            .register("Inter", 400, FontStyle::Normal, FontSource::Data(Arc::from(&b"INTER"[..])))
            .await;
        (renderer, fetcher)
    }

    #[tokio::test]
    async fn test_render_with_engine() {
        let (renderer, _) = renderer(StaticFetcher::new()).await;
        let root: Node = document()
            .child(page().child(text("one")))
            .child(page().child(text("two")))
            .into();
        let bytes = renderer.render(&root, "echo").await.unwrap();
        assert_eq!(bytes, b"one|two");
        assert_eq!(renderer.engines(), vec!["broken", "echo"]);
    }

    #[tokio::test]
    async fn test_unknown_engine_fails_before_fetching() {
        let (renderer, fetcher) = renderer(StaticFetcher::new()).await;
        let root: Node = page().child(image("https://cdn.test/a.png")).into();
        let err = renderer.render(&root, "pdf").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownEngine);
        assert_eq!(err.context["available"], serde_json::json!(["broken", "echo"]));
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_engine_failure_is_wrapped() {
        let (renderer, _) = renderer(StaticFetcher::new()).await;
        let err = renderer
            .render(&page().child(text("x")).into(), "broken")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RenderFailed);
        assert!(err.message.contains("glyph table exploded"));
    }

    #[tokio::test]
    async fn test_structural_error_skips_asset_loading() {
        let (renderer, fetcher) = renderer(StaticFetcher::new()).await;
        let err = renderer
            .prepare(&document().child(image("https://cdn.test/a.png")).into())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoPages);
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_prepare_reports_missing_images() {
        let (renderer, _) = renderer(StaticFetcher::new()).await;
        let ctx = renderer
            .prepare(&page().child(image("https://cdn.test/gone.png")).into())
            .await
            .unwrap();
        assert_eq!(ctx.fonts.len(), 1);
        assert_eq!(ctx.missing_images().len(), 1);
        assert!(ctx.font("Inter", 400, FontStyle::Normal).is_some());
    }
}
