//! Font and image manifests collected during the tree walk.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::assets::fonts::{DEFAULT_WEIGHT, display_family, normalize_family, parse_weight};
use crate::assets::{FontStyle, ImageSource};
use crate::ir::{FontUsage, ImageUsage};
use crate::style::Style;

/// Font settings in effect at a node, inherited down the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Typography {
    /// Family as written, quotes and fallbacks stripped.
    pub family: Option<String>,
    pub weight: u16,
    pub style: FontStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: None,
            weight: DEFAULT_WEIGHT,
            style: FontStyle::Normal,
        }
    }
}

impl Typography {
    /// Apply a node's merged style on top of the inherited settings.
    ///
    /// Returns the new settings and whether the node asked for a face: it
    /// declared a family, or a weight/style while a family is inherited.
    pub fn apply(&self, style: &Style) -> (Typography, bool) {
        let mut next = self.clone();
        let mut declares = false;

        if let Some(family) = style.get("fontFamily").and_then(|v| v.as_str()) {
            let family = display_family(family);
            if !family.is_empty() {
                next.family = Some(family);
                declares = true;
            }
        }
        if let Some(weight) = style.get("fontWeight").and_then(parse_weight) {
            next.weight = weight;
            declares |= next.family.is_some();
        }
        if let Some(font_style) = style
            .get("fontStyle")
            .and_then(|v| v.as_str())
            .and_then(FontStyle::parse)
        {
            next.style = font_style;
            declares |= next.family.is_some();
        }

        (next, declares)
    }
}

/// Deduplicating collector for the document's font and image usage.
///
/// Both manifests keep first-seen order.
#[derive(Debug, Default)]
pub(crate) struct UsageCollector {
    fonts: Vec<FontUsage>,
    font_index: HashMap<String, usize>,
    images: Vec<ImageUsage>,
    image_ids: HashSet<String>,
}

impl UsageCollector {
    pub fn record_font(&mut self, typography: &Typography) {
        let Some(name) = typography.family.as_deref() else {
            return;
        };
        let family = normalize_family(name);
        let index = match self.font_index.get(&family) {
            Some(&index) => index,
            None => {
                self.fonts.push(FontUsage {
                    family: family.clone(),
                    name: name.to_string(),
                    weights: BTreeSet::new(),
                    styles: BTreeSet::new(),
                });
                self.font_index.insert(family, self.fonts.len() - 1);
                self.fonts.len() - 1
            }
        };
        let usage = &mut self.fonts[index];
        usage.weights.insert(typography.weight);
        usage.styles.insert(typography.style);
    }

    /// Record an image source; returns its id.
    pub fn record_image(&mut self, source: &ImageSource) -> String {
        let usage = ImageUsage::new(source.clone());
        let id = usage.id.clone();
        if self.image_ids.insert(id.clone()) {
            self.images.push(usage);
        }
        id
    }

    pub fn finish(self) -> (Vec<FontUsage>, Vec<ImageUsage>) {
        (self.fonts, self.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_declaration_is_recorded() {
        let style = Style::new().with("fontFamily", "'Roboto Mono', monospace");
        let (typo, declares) = Typography::default().apply(&style);
        assert!(declares);
        assert_eq!(typo.family.as_deref(), Some("Roboto Mono"));
        assert_eq!(typo.weight, 400);
    }

    #[test]
    fn test_weight_under_inherited_family() {
        let (parent, _) = Typography::default().apply(&Style::new().with("fontFamily", "Roboto"));
        let (child, declares) = parent.apply(&Style::new().with("fontWeight", "bold"));
        assert!(declares);
        assert_eq!(child.family.as_deref(), Some("Roboto"));
        assert_eq!(child.weight, 700);
    }

    #[test]
    fn test_weight_without_family_is_not_a_request() {
        let (typo, declares) = Typography::default().apply(&Style::new().with("fontWeight", 700.0));
        assert!(!declares);
        assert_eq!(typo.weight, 700);
    }

    #[test]
    fn test_collector_merges_faces_per_family() {
        let mut usage = UsageCollector::default();
        let roboto = Typography {
            family: Some("Roboto".into()),
            ..Typography::default()
        };
        usage.record_font(&roboto);
        usage.record_font(&Typography {
            family: Some("roboto".into()),
            ..Typography::default()
        });
        usage.record_font(&Typography {
            weight: 700,
            style: FontStyle::Italic,
            ..roboto.clone()
        });
        usage.record_font(&Typography::default());

        let (fonts, images) = usage.finish();
        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts[0].family, "roboto");
        assert_eq!(fonts[0].name, "Roboto");
        assert_eq!(fonts[0].weights, BTreeSet::from([400, 700]));
        assert_eq!(fonts[0].styles, BTreeSet::from([FontStyle::Normal, FontStyle::Italic]));
        assert!(images.is_empty());
    }

    #[test]
    fn test_collector_dedups_images() {
        let mut usage = UsageCollector::default();
        let a = usage.record_image(&ImageSource::from("https://x.test/a.png"));
        let b = usage.record_image(&ImageSource::from("https://x.test/a.png"));
        let c = usage.record_image(&ImageSource::from("https://x.test/c.png"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(usage.finish().1.len(), 2);
    }
}
