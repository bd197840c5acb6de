//! Asset context: shared resources for font and image resolution.
//!
//! Constructed once per process and cloned into every resolver. Resolvers
//! reach into it for the fetcher, the caches and the font registry, so
//! callers stay unaware of what happens behind the scenes.

use std::sync::Arc;

use super::cache::AssetCache;
use super::fetch::{Fetch, HttpFetcher};
use super::fonts::{FontKey, FontRegistry, ResolvedFont};
use super::images::ResolvedImage;
use crate::config::AssetOptions;
use crate::error::FolioError;

#[derive(Clone)]
pub struct AssetContext {
    /// HTTP access for remote assets.
    pub fetcher: Arc<dyn Fetch>,
    /// Resolved fonts by (family, weight, style).
    pub font_cache: AssetCache<FontKey, ResolvedFont>,
    /// Resolved remote images by URL.
    pub image_cache: AssetCache<String, ResolvedImage>,
    /// Explicitly registered font files.
    pub font_registry: FontRegistry,
    pub options: AssetOptions,
}

impl AssetContext {
    /// Create a context with empty caches around the given fetcher.
    pub fn new(fetcher: Arc<dyn Fetch>, options: AssetOptions) -> Self {
        Self {
            fetcher,
            font_cache: AssetCache::new(),
            image_cache: AssetCache::new(),
            font_registry: FontRegistry::new(),
            options,
        }
    }

    /// Create a context that fetches over HTTP with `reqwest`.
    pub fn http(options: AssetOptions) -> Result<Self, FolioError> {
        let fetcher = HttpFetcher::new(&options.user_agent)?;
        Ok(Self::new(Arc::new(fetcher), options))
    }

    /// Drop every cached font and image. Registered fonts stay registered.
    pub async fn clear_caches(&self) {
        self.font_cache.clear().await;
        self.image_cache.clear().await;
        log::debug!("asset caches cleared");
    }
}

impl std::fmt::Debug for AssetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
