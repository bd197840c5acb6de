//! Font resolution: (family, weight, style) → font file bytes.
//!
//! Lookup order for a key:
//!
//! 1. the font cache
//! 2. the custom registry: exact weight/style match, else any entry for the family
//! 3. the public catalog: fetch the family's stylesheet, take the first font
//!    file URL in it, fetch that file
//!
//! Whatever is found is cached under the requested key.

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::context::AssetContext;
use super::fetch::CacheMode;
use crate::error::{ErrorCode, FolioError};
use crate::ir::FontUsage;
use crate::style::StyleValue;

pub const DEFAULT_WEIGHT: u16 = 400;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// `oblique` is treated as italic.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(FontStyle::Normal),
            "italic" | "oblique" => Some(FontStyle::Italic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a family name for use as a key.
///
/// Takes the first entry of a font stack, strips quotes, lowercases and
/// joins whitespace runs with hyphens: `"'Open  Sans', serif"` → `open-sans`.
pub fn normalize_family(raw: &str) -> String {
    let first = raw.split(',').next().unwrap_or("");
    first
        .replace(['"', '\''], "")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Family name as written, for catalog lookup.
///
/// Takes the first entry of a font stack, strips quotes and collapses
/// whitespace but keeps case: `"'EB  Garamond', serif"` → `EB Garamond`.
pub fn display_family(raw: &str) -> String {
    let first = raw.split(',').next().unwrap_or("");
    first
        .replace(['"', '\''], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a `fontWeight` style value into a numeric weight.
pub fn parse_weight(value: &StyleValue) -> Option<u16> {
    match value {
        StyleValue::Number(n) if (1.0..=1000.0).contains(n) => Some(n.round() as u16),
        StyleValue::Number(_) => None,
        StyleValue::Text(s) => {
            let s = s.trim().to_ascii_lowercase();
            let weight = match s.as_str() {
                "thin" | "hairline" => 100,
                "extralight" | "ultralight" => 200,
                "light" => 300,
                "normal" | "regular" => 400,
                "medium" => 500,
                "semibold" | "demibold" => 600,
                "bold" => 700,
                "extrabold" | "ultrabold" => 800,
                "black" | "heavy" => 900,
                other => return other.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)),
            };
            Some(weight)
        }
    }
}

/// Cache key for a font face.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontKey {
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
}

impl FontKey {
    /// Build a key, normalizing the family name.
    pub fn new(family: &str, weight: u16, style: FontStyle) -> Self {
        Self {
            family: normalize_family(family),
            weight,
            style,
        }
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.weight, self.style)
    }
}

/// A font face ready for the engine.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
    pub data: Arc<[u8]>,
    /// Where the bytes came from; `None` for inline registered data.
    pub url: Option<String>,
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone)]
pub enum FontSource {
    Data(Arc<[u8]>),
    Url(String),
}

#[derive(Debug, Clone)]
pub struct FontDescriptor {
    pub weight: u16,
    pub style: FontStyle,
    pub source: FontSource,
}

/// Explicitly registered fonts, keyed by normalized family.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    entries: Arc<RwLock<HashMap<String, Vec<FontDescriptor>>>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, family: &str, descriptor: FontDescriptor) {
        let family = normalize_family(family);
        log::debug!(
            "registered font {} {} {}",
            family,
            descriptor.weight,
            descriptor.style
        );
        self.entries
            .write()
            .await
            .entry(family)
            .or_default()
            .push(descriptor);
    }

    /// Exact weight/style match, else the first entry registered for the family.
    pub async fn lookup(&self, key: &FontKey) -> Option<FontDescriptor> {
        let entries = self.entries.read().await;
        let descriptors = entries.get(&key.family)?;
        descriptors
            .iter()
            .find(|d| d.weight == key.weight && d.style == key.style)
            .or_else(|| descriptors.first())
            .cloned()
    }

    pub async fn contains(&self, family: &str) -> bool {
        self.entries.read().await.contains_key(&normalize_family(family))
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Normalized family → catalog family name.
const CATALOG: &[(&str, &str)] = &[
    ("inter", "Inter"),
    ("roboto", "Roboto"),
    ("roboto-mono", "Roboto Mono"),
    ("open-sans", "Open Sans"),
    ("lato", "Lato"),
    ("montserrat", "Montserrat"),
    ("poppins", "Poppins"),
    ("raleway", "Raleway"),
    ("nunito", "Nunito"),
    ("merriweather", "Merriweather"),
    ("playfair-display", "Playfair Display"),
    ("source-sans-pro", "Source Sans 3"),
    ("source-serif-pro", "Source Serif 4"),
    ("fira-code", "Fira Code"),
    ("jetbrains-mono", "JetBrains Mono"),
    ("ibm-plex-sans", "IBM Plex Sans"),
    ("ibm-plex-mono", "IBM Plex Mono"),
    ("noto-sans", "Noto Sans"),
    ("noto-serif", "Noto Serif"),
    ("pt-sans", "PT Sans"),
    ("dm-sans", "DM Sans"),
    // Metric-compatible stand-ins for the classic PDF base fonts.
    ("helvetica", "Arimo"),
    ("arial", "Arimo"),
    ("times", "Tinos"),
    ("times-new-roman", "Tinos"),
    ("courier", "Cousine"),
    ("courier-new", "Cousine"),
    ("sans-serif", "Inter"),
    ("serif", "Merriweather"),
    ("monospace", "Roboto Mono"),
];

/// Catalog family name for a family as written.
///
/// Known families map through the table. Anything else keeps its own
/// spelling; only all-lowercase words are capitalized, so `EB Garamond`
/// stays intact and `fira-sans-condensed` becomes `Fira Sans Condensed`.
pub fn catalog_name(family: &str) -> String {
    let key = normalize_family(family);
    if let Some((_, name)) = CATALOG.iter().find(|(known, _)| *known == key) {
        return (*name).to_string();
    }
    display_family(family)
        .split([' ', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.chars().any(char::is_uppercase) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stylesheet URL for one face of a catalog family.
pub fn stylesheet_url(base: &str, name: &str, weight: u16, style: FontStyle) -> String {
    let ital = match style {
        FontStyle::Normal => 0,
        FontStyle::Italic => 1,
    };
    format!(
        "{}?family={}:ital,wght@{},{}",
        base,
        name.replace(' ', "+"),
        ital,
        weight
    )
}

static FONT_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"url\(\s*['"]?([^'")\s]+\.(?:ttf|otf|woff2?)(?:\?[^'")\s]*)?)['"]?\s*\)"#)
        .expect("font url pattern is valid")
});

/// First font file URL referenced by a stylesheet.
pub fn first_font_url(css: &str) -> Option<String> {
    FONT_URL
        .captures(css)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves font faces through cache → registry → catalog.
#[derive(Debug, Clone)]
pub struct FontResolver {
    ctx: AssetContext,
}

impl FontResolver {
    pub fn new(ctx: AssetContext) -> Self {
        Self { ctx }
    }

    /// Register a font file for a family.
    pub async fn register(&self, family: &str, weight: u16, style: FontStyle, source: FontSource) {
        self.ctx
            .font_registry
            .register(family, FontDescriptor { weight, style, source })
            .await;
    }

    /// Resolve one face. Use [`DEFAULT_WEIGHT`] and `FontStyle::Normal` for the regular face.
    pub async fn resolve(
        &self,
        family: &str,
        weight: u16,
        style: FontStyle,
    ) -> Result<ResolvedFont, FolioError> {
        let key = FontKey::new(family, weight, style);

        if let Some(hit) = self.ctx.font_cache.get(&key).await {
            log::debug!("font cache hit: {}", key);
            return Ok(hit);
        }

        let resolved = match self.ctx.font_registry.lookup(&key).await {
            Some(descriptor) => self.load_registered(&key, descriptor).await?,
            None => self.load_from_catalog(family, &key).await?,
        };

        Ok(self.ctx.font_cache.put(key, resolved).await)
    }

    /// Resolve every face a document needs, concurrently.
    ///
    /// Succeeds with whatever subset resolved; fails with the first error only
    /// when nothing did. An empty usage list resolves the default family so
    /// the result is never empty.
    pub async fn load_fonts_for_document(
        &self,
        usages: &[FontUsage],
    ) -> Result<Vec<ResolvedFont>, FolioError> {
        let mut requests: Vec<(&str, FontKey)> = usages
            .iter()
            .flat_map(|usage| usage.faces().into_iter().map(move |key| (usage.name.as_str(), key)))
            .collect();
        if requests.is_empty() {
            let family = self.ctx.options.default_font_family.as_str();
            requests.push((family, FontKey::new(family, DEFAULT_WEIGHT, FontStyle::Normal)));
        }

        let results = join_all(
            requests
                .iter()
                .map(|(name, key)| self.resolve(name, key.weight, key.style)),
        )
        .await;

        let mut fonts = Vec::with_capacity(results.len());
        let mut first_error = None;
        for ((_, key), result) in requests.iter().zip(results) {
            match result {
                Ok(font) => fonts.push(font),
                Err(err) => {
                    log::warn!("font {} failed: {}", key, err);
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) if fonts.is_empty() => Err(err),
            _ => Ok(fonts),
        }
    }

    async fn load_registered(
        &self,
        key: &FontKey,
        descriptor: FontDescriptor,
    ) -> Result<ResolvedFont, FolioError> {
        let (data, url) = match descriptor.source {
            FontSource::Data(data) => (data, None),
            FontSource::Url(url) => {
                let bytes = self.fetch(key, &url).await?;
                (Arc::from(bytes), Some(url))
            }
        };
        if data.is_empty() {
            return Err(font_error(ErrorCode::FontLoadFailed, key, url.as_deref(), "registered font is empty"));
        }
        Ok(ResolvedFont {
            family: key.family.clone(),
            weight: key.weight,
            style: key.style,
            data,
            url,
        })
    }

    async fn load_from_catalog(&self, family: &str, key: &FontKey) -> Result<ResolvedFont, FolioError> {
        let name = catalog_name(family);
        let css_url = stylesheet_url(&self.ctx.options.font_catalog_url, &name, key.weight, key.style);
        let css = self.fetch(key, &css_url).await?;
        let css = String::from_utf8_lossy(&css);

        let font_url = first_font_url(&css).ok_or_else(|| {
            font_error(
                ErrorCode::FontLoadFailed,
                key,
                Some(&css_url),
                &format!("no font file found in stylesheet for {:?}", name),
            )
            .with_suggestion("register the font explicitly or check the family name")
        })?;

        let data = self.fetch(key, &font_url).await?;
        if data.is_empty() {
            return Err(font_error(ErrorCode::FontLoadFailed, key, Some(&font_url), "font file is empty"));
        }

        Ok(ResolvedFont {
            family: key.family.clone(),
            weight: key.weight,
            style: key.style,
            data: Arc::from(data),
            url: Some(font_url),
        })
    }

    async fn fetch(&self, key: &FontKey, url: &str) -> Result<Vec<u8>, FolioError> {
        log::debug!("fetching font {} from {}", key, url);
        let response = self
            .ctx
            .fetcher
            .get(url, CacheMode::Default)
            .await
            .map_err(|e| font_error(ErrorCode::FontFetchError, key, Some(url), &e.message))?;
        if !response.is_success() {
            return Err(font_error(
                ErrorCode::FontFetchError,
                key,
                Some(url),
                &format!("HTTP {}", response.status),
            )
            .with_context("status", response.status));
        }
        Ok(response.body)
    }
}

fn font_error(code: ErrorCode, key: &FontKey, url: Option<&str>, detail: &str) -> FolioError {
    let err = FolioError::new(
        code,
        format!("Failed to load font {} ({} {}): {}", key.family, key.weight, key.style, detail),
    )
    .with_context("family", key.family.as_str())
    .with_context("weight", key.weight)
    .with_context("style", key.style.as_str());
    match url {
        Some(url) => err.with_context("url", url),
        None => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::StaticFetcher;
    use crate::config::AssetOptions;
    use std::collections::BTreeSet;

    const CATALOG_BASE: &str = "https://fonts.googleapis.com/css2";

    fn css_for(font_url: &str) -> String {
        format!(
            "@font-face {{\n  font-family: 'X';\n  src: url({}) format('truetype');\n}}\n",
            font_url
        )
    }

    fn resolver(fetcher: StaticFetcher) -> (FontResolver, Arc<StaticFetcher>) {
        let fetcher = Arc::new(fetcher);
        let ctx = AssetContext::new(fetcher.clone(), AssetOptions::default());
        (FontResolver::new(ctx), fetcher)
    }

    fn catalog_fetcher(name: &str, weight: u16, style: FontStyle, file: &str, body: &[u8]) -> StaticFetcher {
        StaticFetcher::new()
            .route(&stylesheet_url(CATALOG_BASE, name, weight, style), 200, css_for(file))
            .route(file, 200, body.to_vec())
    }

    #[test]
    fn test_normalize_family() {
        assert_eq!(normalize_family("Open Sans"), "open-sans");
        assert_eq!(normalize_family("  'Fira   Code' "), "fira-code");
        assert_eq!(normalize_family("\"Inter\", sans-serif"), "inter");
        assert_eq!(normalize_family("ROBOTO"), "roboto");
    }

    #[test]
    fn test_display_family_keeps_case() {
        assert_eq!(display_family("'EB  Garamond', serif"), "EB Garamond");
        assert_eq!(display_family("  \"Open Sans\" "), "Open Sans");
        assert_eq!(display_family("roboto"), "roboto");
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(&StyleValue::Number(700.0)), Some(700));
        assert_eq!(parse_weight(&StyleValue::from("bold")), Some(700));
        assert_eq!(parse_weight(&StyleValue::from("600")), Some(600));
        assert_eq!(parse_weight(&StyleValue::from("heavy")), Some(900));
        assert_eq!(parse_weight(&StyleValue::from("wide")), None);
        assert_eq!(parse_weight(&StyleValue::Number(0.0)), None);
    }

    #[test]
    fn test_catalog_name() {
        assert_eq!(catalog_name("open-sans"), "Open Sans");
        assert_eq!(catalog_name("helvetica"), "Arimo");
        assert_eq!(catalog_name("fira-sans-condensed"), "Fira Sans Condensed");
        assert_eq!(catalog_name("Open Sans"), "Open Sans");
        assert_eq!(catalog_name("JETBRAINS MONO"), "JetBrains Mono");
        assert_eq!(catalog_name("EB Garamond"), "EB Garamond");
        assert_eq!(catalog_name("'PT Serif', serif"), "PT Serif");
        assert_eq!(catalog_name("DM Serif Display"), "DM Serif Display");
        assert_eq!(catalog_name("eb garamond"), "Eb Garamond");
    }

    #[tokio::test]
    async fn test_mixed_case_family_outside_table_keeps_spelling() {
        let file = "https://fonts.gstatic.com/s/ebgaramond/g.ttf";
        let (fonts, fetcher) =
            resolver(catalog_fetcher("EB Garamond", 400, FontStyle::Normal, file, b"GARAMOND"));

        let font = fonts.resolve("EB Garamond", 400, FontStyle::Normal).await.unwrap();
        assert_eq!(&*font.data, b"GARAMOND");
        assert_eq!(font.family, "eb-garamond");
        assert_eq!(
            fetcher.calls("https://fonts.googleapis.com/css2?family=EB+Garamond:ital,wght@0,400"),
            1
        );
    }

    #[tokio::test]
    async fn test_bulk_load_uses_family_as_written() {
        let file = "https://fonts.gstatic.com/s/ptserif/p.ttf";
        let (fonts, _) = resolver(catalog_fetcher("PT Serif", 700, FontStyle::Normal, file, b"PT"));
        let usages = vec![FontUsage::new(
            "'PT Serif', serif",
            BTreeSet::from([700]),
            BTreeSet::from([FontStyle::Normal]),
        )];

        let loaded = fonts.load_fonts_for_document(&usages).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].family, "pt-serif");
        assert_eq!(&*loaded[0].data, b"PT");
    }

    #[test]
    fn test_stylesheet_url() {
        assert_eq!(
            stylesheet_url(CATALOG_BASE, "Open Sans", 700, FontStyle::Italic),
            "https://fonts.googleapis.com/css2?family=Open+Sans:ital,wght@1,700"
        );
    }

    #[test]
    fn test_first_font_url() {
        let css = "src: url(https://fonts.gstatic.com/s/inter/v1/a.ttf) format('truetype');\n\
                   src: url('https://fonts.gstatic.com/s/inter/v1/b.ttf');";
        assert_eq!(
            first_font_url(css).as_deref(),
            Some("https://fonts.gstatic.com/s/inter/v1/a.ttf")
        );
        assert_eq!(first_font_url("src: url(data.png);"), None);
        assert_eq!(first_font_url(""), None);
    }

    #[tokio::test]
    async fn test_resolve_caches_after_first_fetch() {
        let file = "https://fonts.gstatic.com/s/roboto/r.ttf";
        let (fonts, fetcher) = resolver(catalog_fetcher("Roboto", 400, FontStyle::Normal, file, b"ROBOTO"));

        let first = fonts.resolve("Roboto", 400, FontStyle::Normal).await.unwrap();
        let second = fonts.resolve("roboto", 400, FontStyle::Normal).await.unwrap();

        assert_eq!(&*first.data, b"ROBOTO");
        assert_eq!(first.data, second.data);
        assert_eq!(fetcher.calls(file), 1);
        assert_eq!(fetcher.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_cache_entry() {
        let file = "https://fonts.gstatic.com/s/roboto/r.ttf";
        let fetcher = Arc::new(catalog_fetcher("Roboto", 400, FontStyle::Normal, file, b"ROBOTO"));
        let ctx = AssetContext::new(fetcher.clone(), AssetOptions::default());
        let fonts = FontResolver::new(ctx.clone());

        let (a, b) = tokio::join!(
            fonts.resolve("Roboto", 400, FontStyle::Normal),
            fonts.resolve("roboto", 400, FontStyle::Normal),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.data, b.data);
        assert_eq!(&*a.data, b"ROBOTO");
        assert_eq!(ctx.font_cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_registry_exact_match_before_catalog() {
        let (fonts, fetcher) = resolver(StaticFetcher::new());
        fonts
            .register("Brand Sans", 400, FontStyle::Normal, FontSource::Data(Arc::from(&b"REG"[..])))
            .await;
        fonts
            .register("Brand Sans", 700, FontStyle::Normal, FontSource::Data(Arc::from(&b"BOLD"[..])))
            .await;

        let bold = fonts.resolve("brand sans", 700, FontStyle::Normal).await.unwrap();
        assert_eq!(&*bold.data, b"BOLD");
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_registry_falls_back_to_any_face() {
        let (fonts, _) = resolver(StaticFetcher::new());
        fonts
            .register("Brand", 400, FontStyle::Normal, FontSource::Data(Arc::from(&b"REG"[..])))
            .await;

        let italic = fonts.resolve("Brand", 300, FontStyle::Italic).await.unwrap();
        assert_eq!(&*italic.data, b"REG");
        assert_eq!(italic.weight, 300);
        assert_eq!(italic.style, FontStyle::Italic);
    }

    #[tokio::test]
    async fn test_registry_url_source() {
        let url = "https://cdn.example.com/brand.otf";
        let (fonts, fetcher) = resolver(StaticFetcher::new().route(url, 200, b"OTF".to_vec()));
        fonts
            .register("Brand", 400, FontStyle::Normal, FontSource::Url(url.into()))
            .await;

        let font = fonts.resolve("Brand", 400, FontStyle::Normal).await.unwrap();
        assert_eq!(font.url.as_deref(), Some(url));
        assert_eq!(fetcher.calls(url), 1);
    }

    #[tokio::test]
    async fn test_network_failure_is_fetch_error_with_context() {
        let (fonts, _) = resolver(StaticFetcher::new());
        let err = fonts.resolve("Nonexistent", 500, FontStyle::Italic).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FontFetchError);
        assert_eq!(err.context["family"], "nonexistent");
        assert_eq!(err.context["weight"], 500);
        assert_eq!(err.context["style"], "italic");
        assert!(err.context["url"].as_str().unwrap().contains("family=Nonexistent"));
    }

    #[tokio::test]
    async fn test_http_error_status_is_fetch_error() {
        let css_url = stylesheet_url(CATALOG_BASE, "Inter", 400, FontStyle::Normal);
        let (fonts, _) = resolver(StaticFetcher::new().route(&css_url, 400, "bad request"));
        let err = fonts.resolve("Inter", 400, FontStyle::Normal).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FontFetchError);
        assert_eq!(err.context["status"], 400);
    }

    #[tokio::test]
    async fn test_stylesheet_without_font_is_load_failed() {
        let css_url = stylesheet_url(CATALOG_BASE, "Inter", 400, FontStyle::Normal);
        let (fonts, _) = resolver(StaticFetcher::new().route(&css_url, 200, "/* empty */"));
        let err = fonts.resolve("Inter", 400, FontStyle::Normal).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FontLoadFailed);
    }

    #[tokio::test]
    async fn test_bulk_partial_success() {
        let file = "https://fonts.gstatic.com/s/inter/i.ttf";
        let (fonts, _) = resolver(catalog_fetcher("Inter", 400, FontStyle::Normal, file, b"INTER"));
        let usages = vec![
            FontUsage::new("inter", BTreeSet::from([400]), BTreeSet::from([FontStyle::Normal])),
            FontUsage::new("missing", BTreeSet::from([400]), BTreeSet::from([FontStyle::Normal])),
        ];

        let loaded = fonts.load_fonts_for_document(&usages).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].family, "inter");
    }

    #[tokio::test]
    async fn test_bulk_total_failure_propagates() {
        let (fonts, _) = resolver(StaticFetcher::new());
        let usages = vec![FontUsage::new(
            "missing",
            BTreeSet::from([400, 700]),
            BTreeSet::from([FontStyle::Normal]),
        )];
        let err = fonts.load_fonts_for_document(&usages).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FontFetchError);
    }

    #[tokio::test]
    async fn test_bulk_empty_loads_default_family() {
        let file = "https://fonts.gstatic.com/s/inter/i.ttf";
        let (fonts, _) = resolver(catalog_fetcher("Inter", 400, FontStyle::Normal, file, b"INTER"));
        let loaded = fonts.load_fonts_for_document(&[]).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].family, "inter");
        assert_eq!(loaded[0].weight, DEFAULT_WEIGHT);
    }
}
