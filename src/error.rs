//! # Error Types
//!
//! Every failure that leaves this crate is a [`FolioError`]: a machine-readable
//! [`ErrorCode`], a message, a free-form context bag and an optional hint for
//! the caller. Callers branch on the code, never on the message text.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Closed set of error codes surfaced by folio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Assets
    FontLoadFailed,
    FontFetchError,
    ImageLoadFailed,
    ImageFetchError,
    InvalidImageSource,
    UnknownImageFormat,
    InvalidBase64Image,
    LocalFileNotSupported,
    // Structure
    NoPages,
    InvalidDocument,
    UnknownEngine,
    ComponentDepthExceeded,
    // Catch-all
    RenderFailed,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::FontLoadFailed => "FONT_LOAD_FAILED",
            ErrorCode::FontFetchError => "FONT_FETCH_ERROR",
            ErrorCode::ImageLoadFailed => "IMAGE_LOAD_FAILED",
            ErrorCode::ImageFetchError => "IMAGE_FETCH_ERROR",
            ErrorCode::InvalidImageSource => "INVALID_IMAGE_SOURCE",
            ErrorCode::UnknownImageFormat => "UNKNOWN_IMAGE_FORMAT",
            ErrorCode::InvalidBase64Image => "INVALID_BASE64_IMAGE",
            ErrorCode::LocalFileNotSupported => "LOCAL_FILE_NOT_SUPPORTED",
            ErrorCode::NoPages => "NO_PAGES",
            ErrorCode::InvalidDocument => "INVALID_DOCUMENT",
            ErrorCode::UnknownEngine => "UNKNOWN_ENGINE",
            ErrorCode::ComponentDepthExceeded => "COMPONENT_DEPTH_EXCEEDED",
            ErrorCode::RenderFailed => "RENDER_FAILED",
        }
    }

    /// True for codes raised by font or image resolution.
    pub fn is_asset_error(self) -> bool {
        matches!(
            self,
            ErrorCode::FontLoadFailed
                | ErrorCode::FontFetchError
                | ErrorCode::ImageLoadFailed
                | ErrorCode::ImageFetchError
                | ErrorCode::InvalidImageSource
                | ErrorCode::UnknownImageFormat
                | ErrorCode::InvalidBase64Image
                | ErrorCode::LocalFileNotSupported
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for folio operations.
#[derive(Debug, Clone, Error, Serialize)]
#[error("[{code}] {message}")]
pub struct FolioError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FolioError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: BTreeMap::new(),
            suggestion: None,
        }
    }

    /// Attach a context entry. Later entries with the same key replace earlier ones.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Normalize an arbitrary failure into a `FolioError`.
    ///
    /// A `FolioError` passes through untouched; anything else becomes
    /// `RENDER_FAILED` with the original message preserved.
    pub fn wrap(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<FolioError>() {
            Ok(folio) => *folio,
            Err(other) => FolioError::new(
                ErrorCode::RenderFailed,
                format!("Render failed: {}", other),
            )
            .with_context("cause", other.to_string()),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        FolioError::new(ErrorCode::InvalidDocument, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = FolioError::new(ErrorCode::NoPages, "document has no pages");
        assert_eq!(err.to_string(), "[NO_PAGES] document has no pages");
    }

    #[test]
    fn test_context_and_suggestion() {
        let err = FolioError::new(ErrorCode::FontFetchError, "boom")
            .with_context("family", "inter")
            .with_context("weight", 700)
            .with_suggestion("check the network");
        assert_eq!(err.context["family"], "inter");
        assert_eq!(err.context["weight"], 700);
        assert_eq!(err.suggestion.as_deref(), Some("check the network"));
    }

    #[test]
    fn test_wrap_passes_folio_errors_through() {
        let original = FolioError::new(ErrorCode::UnknownEngine, "nope");
        let wrapped = FolioError::wrap(Box::new(original));
        assert_eq!(wrapped.code, ErrorCode::UnknownEngine);
    }

    #[test]
    fn test_wrap_foreign_error_is_render_failed() {
        let io = std::io::Error::other("disk on fire");
        let wrapped = FolioError::wrap(Box::new(io));
        assert_eq!(wrapped.code, ErrorCode::RenderFailed);
        assert!(wrapped.message.contains("disk on fire"));
    }

    #[test]
    fn test_serializes_code_as_screaming_snake() {
        let err = FolioError::new(ErrorCode::LocalFileNotSupported, "x");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "LOCAL_FILE_NOT_SUPPORTED");
        assert!(json.get("suggestion").is_none());
    }
}
