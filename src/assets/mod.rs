//! # Asset Resolution
//!
//! Turns the font and image references recorded in an IR document into bytes.
//!
//! ```text
//! ┌──────────────┐     ┌───────────┐     ┌────────────┐     ┌──────────────┐
//! │ FontUsage /  │ ──► │   cache   │ ──► │  registry  │ ──► │ remote fetch │
//! │ ImageUsage   │     │ (per key) │     │ (fonts)    │     │  (Fetch)     │
//! └──────────────┘     └───────────┘     └────────────┘     └──────────────┘
//! ```
//!
//! All shared state lives in an [`AssetContext`]: construct one per process
//! and hand clones to [`FontResolver`] and [`ImageResolver`]. Caches are
//! write-once per key and persist until [`AssetContext::clear_caches`].

mod cache;
mod context;
mod fetch;
pub mod fonts;
pub mod images;

pub use cache::AssetCache;
pub use context::AssetContext;
pub use fetch::{CacheMode, Fetch, FetchError, FetchResponse, HttpFetcher};
pub use fonts::{
    FontDescriptor, FontKey, FontRegistry, FontResolver, FontSource, FontStyle, ResolvedFont,
};
pub use images::{ImageFormat, ImageResolver, ImageSource, ResolvedImage};

#[cfg(test)]
pub(crate) use fetch::testing;
