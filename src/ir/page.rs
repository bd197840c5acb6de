//! Page geometry: named size presets and margin normalization.
//!
//! All values are PDF points (1/72 inch).
//!
//! | Preset | Width | Height |
//! |--------|-------|--------|
//! | A3 | 841.89 | 1190.55 |
//! | A4 | 595.28 | 841.89 |
//! | A5 | 419.53 | 595.28 |
//! | A6 | 297.64 | 419.53 |
//! | B4 | 708.66 | 1000.63 |
//! | B5 | 498.90 | 708.66 |
//! | LETTER | 612 | 792 |
//! | LEGAL | 612 | 1008 |
//! | TABLOID | 792 | 1224 |
//! | EXECUTIVE | 521.86 | 756 |

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Page size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub const A3: PageDimensions = PageDimensions { width: 841.89, height: 1190.55 };
    pub const A4: PageDimensions = PageDimensions { width: 595.28, height: 841.89 };
    pub const A5: PageDimensions = PageDimensions { width: 419.53, height: 595.28 };
    pub const A6: PageDimensions = PageDimensions { width: 297.64, height: 419.53 };
    pub const B4: PageDimensions = PageDimensions { width: 708.66, height: 1000.63 };
    pub const B5: PageDimensions = PageDimensions { width: 498.90, height: 708.66 };
    pub const LETTER: PageDimensions = PageDimensions { width: 612.0, height: 792.0 };
    pub const LEGAL: PageDimensions = PageDimensions { width: 612.0, height: 1008.0 };
    pub const TABLOID: PageDimensions = PageDimensions { width: 792.0, height: 1224.0 };
    pub const EXECUTIVE: PageDimensions = PageDimensions { width: 521.86, height: 756.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Look up a named preset, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let size = match name.trim().to_ascii_uppercase().as_str() {
            "A3" => Self::A3,
            "A4" => Self::A4,
            "A5" => Self::A5,
            "A6" => Self::A6,
            "B4" => Self::B4,
            "B5" => Self::B5,
            "LETTER" => Self::LETTER,
            "LEGAL" => Self::LEGAL,
            "TABLOID" => Self::TABLOID,
            "EXECUTIVE" => Self::EXECUTIVE,
            _ => return None,
        };
        Some(size)
    }

    /// Long edge horizontal.
    pub fn landscape(self) -> Self {
        if self.width >= self.height {
            self
        } else {
            Self::new(self.height, self.width)
        }
    }

    /// Long edge vertical.
    pub fn portrait(self) -> Self {
        if self.height >= self.width {
            self
        } else {
            Self::new(self.height, self.width)
        }
    }
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self::A4
    }
}

/// Four fully populated edges (margins), in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Partial per-edge input; missing edges are zero.
    pub fn from_partial(
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
        left: Option<f64>,
    ) -> Self {
        Self::new(
            top.unwrap_or(0.0),
            right.unwrap_or(0.0),
            bottom.unwrap_or(0.0),
            left.unwrap_or(0.0),
        )
    }

    /// Parse CSS-style margin shorthand.
    ///
    /// - `"10"` → all edges
    /// - `"10 20"` → vertical, horizontal
    /// - `"10 20 30"` → top, horizontal, bottom
    /// - `"10 20 30 40"` → top, right, bottom, left
    ///
    /// Values may carry a `pt` suffix.
    pub fn parse_shorthand(input: &str) -> Result<Self, FolioError> {
        let values = input
            .split_whitespace()
            .map(|token| parse_points(token).ok_or_else(|| invalid_margin(input, token)))
            .collect::<Result<Vec<f64>, FolioError>>()?;

        match values.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [v, h] => Ok(Self::new(*v, *h, *v, *h)),
            [t, h, b] => Ok(Self::new(*t, *h, *b, *h)),
            [t, r, b, l] => Ok(Self::new(*t, *r, *b, *l)),
            _ => Err(FolioError::invalid_document(format!(
                "margin shorthand must have 1 to 4 values, got {:?}",
                input
            ))
            .with_context("margin", input)),
        }
    }
}

fn parse_points(token: &str) -> Option<f64> {
    let trimmed = token.strip_suffix("pt").unwrap_or(token);
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn invalid_margin(input: &str, token: &str) -> FolioError {
    FolioError::invalid_document(format!("invalid margin value {:?} in {:?}", token, input))
        .with_context("margin", input)
        .with_suggestion("use numbers in points, e.g. \"10 20\" or \"10 20 30 40\"")
}
