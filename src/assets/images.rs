//! Image resolution: any [`ImageSource`] → bytes plus a detected format.
//!
//! | Source       | Handling                                                    |
//! |--------------|-------------------------------------------------------------|
//! | `Url`        | http(s) only, cached by URL, fetched preferring cached copies |
//! | `DataUri`    | `data:image/<fmt>;base64,<payload>`, decoded in place        |
//! | `Bytes`      | format sniffed from magic bytes                              |
//! | `Deferred`   | producer awaited, its result resolved in turn               |
//!
//! Local paths and `file:` URLs are rejected.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::Arc;

use super::context::AssetContext;
use super::fetch::CacheMode;
use crate::error::{ErrorCode, FolioError};
use crate::ir::ImageUsage;

/// Producer behind a deferred image source.
pub type DeferredFn =
    dyn Fn() -> BoxFuture<'static, Result<ImageSource, FolioError>> + Send + Sync;

/// Where an image comes from.
#[derive(Clone)]
pub enum ImageSource {
    Url(String),
    DataUri(String),
    Bytes(Arc<[u8]>),
    /// Produced on demand; may itself yield another source.
    Deferred(Arc<DeferredFn>),
}

impl ImageSource {
    /// Wrap an async producer as a deferred source.
    pub fn deferred<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ImageSource, FolioError>> + Send + 'static,
    {
        let producer: Arc<DeferredFn> = Arc::new(move || producer().boxed());
        ImageSource::Deferred(producer)
    }

    /// Stable identifier for deduplication.
    ///
    /// Equal URLs, data URIs and byte payloads share an id. Deferred sources
    /// are identified by their producer, so two clones of one source share
    /// an id but two separately constructed producers do not.
    pub fn identity(&self) -> String {
        let mut hasher = Sha256::new();
        match self {
            ImageSource::Url(url) => {
                hasher.update(b"url:");
                hasher.update(url.as_bytes());
            }
            ImageSource::DataUri(uri) => {
                hasher.update(b"uri:");
                hasher.update(uri.as_bytes());
            }
            ImageSource::Bytes(bytes) => {
                hasher.update(b"bytes:");
                hasher.update(bytes);
            }
            ImageSource::Deferred(producer) => {
                hasher.update(b"deferred:");
                let addr = Arc::as_ptr(producer) as *const () as usize;
                hasher.update(addr.to_le_bytes());
            }
        }
        let digest = hasher.finalize();
        let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
        format!("img_{}", hex)
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ImageSource::DataUri(uri) => {
                let head: String = uri.chars().take(32).collect();
                f.debug_tuple("DataUri").field(&format!("{}…", head)).finish()
            }
            ImageSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            ImageSource::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        ImageSource::from(value.to_string())
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        if value.starts_with("data:") {
            ImageSource::DataUri(value)
        } else {
            ImageSource::Url(value)
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(Arc::from(bytes))
    }
}

impl From<&[u8]> for ImageSource {
    fn from(bytes: &[u8]) -> Self {
        ImageSource::Bytes(Arc::from(bytes))
    }
}

impl Serialize for ImageSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ImageSource::Url(s) | ImageSource::DataUri(s) => serializer.serialize_str(s),
            ImageSource::Bytes(bytes) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("bytes", &bytes.len())?;
                map.end()
            }
            ImageSource::Deferred(_) => serializer.serialize_str("deferred"),
        }
    }
}

/// Accepts a string (URL or data URI) or an array of bytes.
impl<'de> Deserialize<'de> for ImageSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SourceVisitor;

        impl<'de> Visitor<'de> for SourceVisitor {
            type Value = ImageSource;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a URL, a data URI, or an array of bytes")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ImageSource, E> {
                Ok(ImageSource::from(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<ImageSource, E> {
                Ok(ImageSource::from(value))
            }

            fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<ImageSource, E> {
                Ok(ImageSource::from(value))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ImageSource, A::Error> {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                Ok(ImageSource::from(bytes))
            }
        }

        deserializer.deserialize_any(SourceVisitor)
    }
}

// ============================================================================
// FORMAT DETECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
    Svg,
}

impl ImageFormat {
    /// Sniff the format from leading bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(ImageFormat::Webp);
        }
        if bytes.starts_with(b"GIF8") {
            return Some(ImageFormat::Gif);
        }
        if looks_like_svg(bytes) {
            return Some(ImageFormat::Svg);
        }
        None
    }

    /// Format named by a MIME subtype (`png`, `jpeg`, `svg+xml`, ...).
    pub fn from_mime_subtype(subtype: &str) -> Option<Self> {
        match subtype.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::Webp),
            "gif" => Some(ImageFormat::Gif),
            "svg" | "svg+xml" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// A decoded, engine-ready image.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub id: String,
    pub format: ImageFormat,
    pub data: Arc<[u8]>,
    /// Pixel dimensions, when the raster header could be read.
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ResolvedImage {
    fn new(id: &str, format: ImageFormat, data: Arc<[u8]>) -> Self {
        let (width, height) = match format {
            ImageFormat::Svg => (None, None),
            _ => match raster_dimensions(&data) {
                Some((w, h)) => (Some(w), Some(h)),
                None => (None, None),
            },
        };
        Self {
            id: id.to_string(),
            format,
            data,
            width,
            height,
        }
    }
}

fn raster_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

// ============================================================================
// RESOLVER
// ============================================================================

static DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/([A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=\s]*)$")
        .expect("data uri pattern is valid")
});

/// Resolves image sources through the shared [`AssetContext`].
#[derive(Debug, Clone)]
pub struct ImageResolver {
    ctx: AssetContext,
}

impl ImageResolver {
    pub fn new(ctx: AssetContext) -> Self {
        Self { ctx }
    }

    /// Resolve a source, identified by its own [`ImageSource::identity`].
    pub async fn resolve(&self, source: &ImageSource) -> Result<ResolvedImage, FolioError> {
        self.resolve_with_id(&source.identity(), source).await
    }

    /// Resolve a source under a caller-chosen id.
    pub async fn resolve_with_id(
        &self,
        id: &str,
        source: &ImageSource,
    ) -> Result<ResolvedImage, FolioError> {
        self.resolve_inner(id.to_string(), source.clone(), 0).await
    }

    /// Resolve every image a document references, concurrently.
    ///
    /// Failures are logged and dropped; the map holds what resolved.
    pub async fn load_images(&self, usages: &[ImageUsage]) -> HashMap<String, ResolvedImage> {
        let results = join_all(
            usages
                .iter()
                .map(|usage| self.resolve_with_id(&usage.id, &usage.source)),
        )
        .await;

        let mut images = HashMap::with_capacity(results.len());
        for (usage, result) in usages.iter().zip(results) {
            match result {
                Ok(image) => {
                    images.insert(usage.id.clone(), image);
                }
                Err(err) => log::warn!("image {} dropped: {}", usage.id, err),
            }
        }
        images
    }

    // Boxed so deferred sources can recurse.
    fn resolve_inner(
        &self,
        id: String,
        source: ImageSource,
        depth: usize,
    ) -> Pin<Box<dyn Future<Output = Result<ResolvedImage, FolioError>> + Send + '_>> {
        Box::pin(async move {
            match source {
                ImageSource::Url(url) => self.resolve_url(&id, &url).await,
                ImageSource::DataUri(uri) => decode_data_uri(&id, &uri),
                ImageSource::Bytes(bytes) => {
                    let format = ImageFormat::detect(&bytes).ok_or_else(|| {
                        FolioError::new(
                            ErrorCode::UnknownImageFormat,
                            "Unrecognized image format in byte source",
                        )
                        .with_context("id", id.as_str())
                        .with_suggestion("supported formats: png, jpeg, webp, gif, svg")
                    })?;
                    Ok(ResolvedImage::new(&id, format, bytes))
                }
                ImageSource::Deferred(producer) => {
                    if depth >= self.ctx.options.max_deferred_depth {
                        return Err(FolioError::new(
                            ErrorCode::InvalidImageSource,
                            format!("Deferred image source nested more than {} levels", depth),
                        )
                        .with_context("id", id.as_str()));
                    }
                    let next = producer().await?;
                    self.resolve_inner(id, next, depth + 1).await
                }
            }
        })
    }

    async fn resolve_url(&self, id: &str, url: &str) -> Result<ResolvedImage, FolioError> {
        if !is_remote(url) {
            return Err(FolioError::new(
                ErrorCode::LocalFileNotSupported,
                format!("Local image paths are not supported: {}", url),
            )
            .with_context("src", url)
            .with_suggestion("host the image at an http(s) URL or embed it as a data URI"));
        }

        if let Some(hit) = self.ctx.image_cache.get(&url.to_string()).await {
            log::debug!("image cache hit: {}", url);
            return Ok(ResolvedImage {
                id: id.to_string(),
                ..hit
            });
        }

        log::debug!("fetching image {}", url);
        let response = self
            .ctx
            .fetcher
            .get(url, CacheMode::PreferCache)
            .await
            .map_err(|e| {
                FolioError::new(
                    ErrorCode::ImageLoadFailed,
                    format!("Failed to load image {}: {}", url, e.message),
                )
                .with_context("url", url)
            })?;

        if !response.is_success() {
            return Err(FolioError::new(
                ErrorCode::ImageFetchError,
                format!("Failed to fetch image {}: HTTP {}", url, response.status),
            )
            .with_context("url", url)
            .with_context("status", response.status));
        }

        let format = ImageFormat::detect(&response.body).ok_or_else(|| {
            FolioError::new(
                ErrorCode::UnknownImageFormat,
                format!("Unrecognized image format at {}", url),
            )
            .with_context("url", url)
        })?;

        let image = ResolvedImage::new(id, format, Arc::from(response.body));
        let stored = self.ctx.image_cache.put(url.to_string(), image).await;
        Ok(ResolvedImage {
            id: id.to_string(),
            ..stored
        })
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn decode_data_uri(id: &str, uri: &str) -> Result<ResolvedImage, FolioError> {
    let invalid = |detail: &str| {
        FolioError::new(
            ErrorCode::InvalidBase64Image,
            format!("Invalid base64 image: {}", detail),
        )
        .with_context("id", id)
        .with_suggestion("use the form data:image/<format>;base64,<payload>")
    };

    let caps = DATA_URI
        .captures(uri)
        .ok_or_else(|| invalid("malformed data URI"))?;
    let subtype = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let payload: String = caps
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let format = ImageFormat::from_mime_subtype(subtype).ok_or_else(|| {
        FolioError::new(
            ErrorCode::UnknownImageFormat,
            format!("Unsupported data URI image type image/{}", subtype),
        )
        .with_context("id", id)
        .with_context("mime", format!("image/{}", subtype))
    })?;

    let data = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| invalid(&e.to_string()))?;
    if data.is_empty() {
        return Err(invalid("empty payload"));
    }

    Ok(ResolvedImage::new(id, format, Arc::from(data)))
}
