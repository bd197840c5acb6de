//! # Configuration
//!
//! Tunables for conversion and asset resolution. Every field has a default,
//! so a config file only needs the keys it changes:
//!
//! ```
//! use folio::config::FolioConfig;
//!
//! let config = FolioConfig::from_json(r#"{"assets": {"default_font_family": "Roboto"}}"#).unwrap();
//! assert_eq!(config.assets.default_font_family, "Roboto");
//! assert_eq!(config.convert.max_composite_depth, 64);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::ir::page::PageDimensions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub convert: ConvertOptions,
    pub assets: AssetOptions,
}

impl FolioConfig {
    pub fn from_json(input: &str) -> Result<Self, FolioError> {
        serde_json::from_str(input)
            .map_err(|e| FolioError::invalid_document(format!("invalid configuration: {}", e)))
    }
}

/// Tree conversion limits and defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Maximum composite expansions for a single node before giving up.
    pub max_composite_depth: usize,
    /// Maximum primitive nesting depth. The walk is recursive, so this also
    /// bounds stack use.
    pub max_tree_depth: usize,
    /// Size of the page synthesized when the root is neither document nor page.
    pub default_page_size: PageDimensions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_composite_depth: 64,
            max_tree_depth: 128,
            default_page_size: PageDimensions::A4,
        }
    }
}

/// Asset resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetOptions {
    pub user_agent: String,
    /// Stylesheet endpoint of the public font catalog.
    pub font_catalog_url: String,
    /// Family resolved when a document declares no fonts at all.
    pub default_font_family: String,
    /// Maximum chain of deferred image producers returning deferred producers.
    pub max_deferred_depth: usize,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            user_agent: "folio/0.1".into(),
            font_catalog_url: "https://fonts.googleapis.com/css2".into(),
            default_font_family: "Inter".into(),
            max_deferred_depth: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FolioConfig::from_json("{}").unwrap();
        assert_eq!(config.convert.max_tree_depth, 128);
        assert_eq!(config.convert.default_page_size, PageDimensions::A4);
        assert_eq!(config.assets.user_agent, "folio/0.1");
        assert_eq!(config.assets.max_deferred_depth, 8);
    }

    #[test]
    fn test_partial_override() {
        let config = FolioConfig::from_json(
            r#"{"convert": {"max_composite_depth": 8, "default_page_size": {"width": 612, "height": 792}}}"#,
        )
        .unwrap();
        assert_eq!(config.convert.max_composite_depth, 8);
        assert_eq!(config.convert.default_page_size, PageDimensions::LETTER);
        assert_eq!(config.convert.max_tree_depth, 128);
    }

    #[test]
    fn test_invalid_config() {
        assert!(FolioConfig::from_json(r#"{"convert": {"max_tree_depth": "deep"}}"#).is_err());
    }
}
