//! Render context: everything an engine receives for one render.
//!
//! Built by the [`DocumentAssembler`](super::DocumentAssembler) once the
//! document is converted and its assets resolved. Engines only read it.

use std::collections::HashMap;

use crate::assets::fonts::normalize_family;
use crate::assets::{FontStyle, ResolvedFont, ResolvedImage};
use crate::ir::IrDocument;

/// A converted document plus its resolved assets.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The frozen IR.
    pub document: IrDocument,
    /// Never empty: at least the default family is present.
    pub fonts: Vec<ResolvedFont>,
    /// Resolved images by id. Images that failed to resolve are absent.
    pub images: HashMap<String, ResolvedImage>,
}

impl RenderContext {
    pub fn new(
        document: IrDocument,
        fonts: Vec<ResolvedFont>,
        images: HashMap<String, ResolvedImage>,
    ) -> Self {
        Self {
            document,
            fonts,
            images,
        }
    }

    pub fn image(&self, id: &str) -> Option<&ResolvedImage> {
        self.images.get(id)
    }

    /// First resolved face of a family, preferring the exact weight/style.
    pub fn font(&self, family: &str, weight: u16, style: FontStyle) -> Option<&ResolvedFont> {
        let family = normalize_family(family);
        self.fonts
            .iter()
            .find(|f| f.family == family && f.weight == weight && f.style == style)
            .or_else(|| self.fonts.iter().find(|f| f.family == family))
    }

    /// Ids referenced by the document that did not resolve.
    pub fn missing_images(&self) -> Vec<&str> {
        self.document
            .images
            .iter()
            .filter(|usage| !self.images.contains_key(&usage.id))
            .map(|usage| usage.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageSource;
    use crate::ir::ImageUsage;
    use std::sync::Arc;

    fn face(family: &str, weight: u16, style: FontStyle, data: &[u8]) -> ResolvedFont {
        ResolvedFont {
            family: normalize_family(family),
            weight,
            style,
            data: Arc::from(data),
            url: None,
        }
    }

    #[test]
    fn test_font_prefers_exact_face_then_family() {
        let fonts = vec![
            face("Open Sans", 400, FontStyle::Normal, b"REGULAR"),
            face("Open Sans", 700, FontStyle::Italic, b"BOLD_ITALIC"),
        ];
        let ctx = RenderContext::new(IrDocument::new(Vec::new()), fonts, HashMap::new());

        let exact = ctx.font("'Open Sans', sans-serif", 700, FontStyle::Italic).unwrap();
        assert_eq!(&*exact.data, b"BOLD_ITALIC");
        let fallback = ctx.font("open sans", 300, FontStyle::Normal).unwrap();
        assert_eq!(&*fallback.data, b"REGULAR");
        assert!(ctx.font("Roboto", 400, FontStyle::Normal).is_none());
    }

    #[test]
    fn test_missing_images() {
        let mut document = IrDocument::new(Vec::new());
        document.images = vec![ImageUsage::new(ImageSource::from("https://cdn.test/a.png"))];
        let ctx = RenderContext::new(document, Vec::new(), HashMap::new());
        assert_eq!(ctx.missing_images().len(), 1);
        assert!(ctx.image(ctx.missing_images()[0]).is_none());
    }
}
