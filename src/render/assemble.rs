//! Document assembly: convert, then resolve fonts and images side by side.

use crate::assets::{AssetContext, FontResolver, ImageResolver};
use crate::config::ConvertOptions;
use crate::convert::TreeConverter;
use crate::document::Node;
use crate::error::FolioError;

use super::RenderContext;

/// Turns a component tree into a [`RenderContext`].
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    converter: TreeConverter,
    fonts: FontResolver,
    images: ImageResolver,
}

impl DocumentAssembler {
    pub fn new(assets: AssetContext, options: ConvertOptions) -> Self {
        Self {
            converter: TreeConverter::new(options),
            fonts: FontResolver::new(assets.clone()),
            images: ImageResolver::new(assets),
        }
    }

    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    /// Convert the tree, then load its fonts and images concurrently.
    ///
    /// Structural errors abort before any asset is requested. Font loading
    /// fails only if no face at all resolved; image failures are dropped.
    pub async fn assemble(&self, root: &Node) -> Result<RenderContext, FolioError> {
        let document = self.converter.convert(root)?;

        let (fonts, images) = tokio::join!(
            self.fonts.load_fonts_for_document(&document.fonts),
            self.images.load_images(&document.images),
        );
        let fonts = fonts?;

        log::info!(
            "assembled {} page(s) with {} font face(s) and {}/{} image(s)",
            document.pages.len(),
            fonts.len(),
            images.len(),
            document.images.len()
        );
        Ok(RenderContext::new(document, fonts, images))
    }
}
