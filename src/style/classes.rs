//! Utility-class resolution.
//!
//! Maps a whitespace-separated class string onto a [`Style`]. Each token is
//! matched against the category rules below; unmatched tokens are ignored.
//! When two tokens set the same property the later one wins, tokens setting
//! different properties never interact.
//!
//! | Category | Examples |
//! |----------|----------|
//! | Spacing | `p-4`, `px-2`, `-mt-1`, `m-auto`, `gap-x-3` |
//! | Color | `text-red-500`, `bg-white`, `border-slate-200`, `bg-[#336699]` |
//! | Typography | `text-lg`, `font-bold`, `font-mono`, `italic`, `leading-tight` |
//! | Flex | `flex`, `flex-col`, `justify-between`, `items-center`, `grow` |
//! | Border | `border`, `border-2`, `border-t-4`, `rounded-lg`, `border-dashed` |
//! | Position | `absolute`, `top-0`, `-left-2`, `inset-x-4` |
//! | Opacity | `opacity-50` |
//! | Sizing | `w-1/2`, `h-full`, `size-8`, `max-w-[300]` |
//!
//! Spacing units are 4pt, so `p-4` is 16pt of padding.

use super::palette::color;
use super::{Style, StyleValue};

/// Resolve a utility-class string into a style map.
///
/// Pure: the same input always yields the same output.
pub fn resolve_classes(classes: &str) -> Style {
    let mut style = Style::new();
    for token in classes.split_whitespace() {
        apply_token(token, &mut style);
    }
    style
}

// ============================================================================
// TOKEN DISPATCH
// ============================================================================

#[derive(Clone, Copy)]
enum V {
    N(f64),
    S(&'static str),
}

impl From<V> for StyleValue {
    fn from(value: V) -> Self {
        match value {
            V::N(n) => StyleValue::Number(n),
            V::S(s) => StyleValue::Text(s.to_string()),
        }
    }
}

/// Tokens that map to fixed declarations.
#[rustfmt::skip]
const KEYWORDS: &[(&str, &[(&str, V)])] = &[
    ("flex", &[("display", V::S("flex"))]),
    ("hidden", &[("display", V::S("none"))]),
    ("flex-row", &[("flexDirection", V::S("row"))]),
    ("flex-row-reverse", &[("flexDirection", V::S("row-reverse"))]),
    ("flex-col", &[("flexDirection", V::S("column"))]),
    ("flex-col-reverse", &[("flexDirection", V::S("column-reverse"))]),
    ("flex-wrap", &[("flexWrap", V::S("wrap"))]),
    ("flex-wrap-reverse", &[("flexWrap", V::S("wrap-reverse"))]),
    ("flex-nowrap", &[("flexWrap", V::S("nowrap"))]),
    ("flex-1", &[("flexGrow", V::N(1.0)), ("flexShrink", V::N(1.0)), ("flexBasis", V::S("0%"))]),
    ("flex-auto", &[("flexGrow", V::N(1.0)), ("flexShrink", V::N(1.0)), ("flexBasis", V::S("auto"))]),
    ("flex-initial", &[("flexGrow", V::N(0.0)), ("flexShrink", V::N(1.0)), ("flexBasis", V::S("auto"))]),
    ("flex-none", &[("flexGrow", V::N(0.0)), ("flexShrink", V::N(0.0)), ("flexBasis", V::S("auto"))]),
    ("grow", &[("flexGrow", V::N(1.0))]),
    ("grow-0", &[("flexGrow", V::N(0.0))]),
    ("shrink", &[("flexShrink", V::N(1.0))]),
    ("shrink-0", &[("flexShrink", V::N(0.0))]),
    ("justify-start", &[("justifyContent", V::S("flex-start"))]),
    ("justify-end", &[("justifyContent", V::S("flex-end"))]),
    ("justify-center", &[("justifyContent", V::S("center"))]),
    ("justify-between", &[("justifyContent", V::S("space-between"))]),
    ("justify-around", &[("justifyContent", V::S("space-around"))]),
    ("justify-evenly", &[("justifyContent", V::S("space-evenly"))]),
    ("items-start", &[("alignItems", V::S("flex-start"))]),
    ("items-end", &[("alignItems", V::S("flex-end"))]),
    ("items-center", &[("alignItems", V::S("center"))]),
    ("items-baseline", &[("alignItems", V::S("baseline"))]),
    ("items-stretch", &[("alignItems", V::S("stretch"))]),
    ("self-auto", &[("alignSelf", V::S("auto"))]),
    ("self-start", &[("alignSelf", V::S("flex-start"))]),
    ("self-end", &[("alignSelf", V::S("flex-end"))]),
    ("self-center", &[("alignSelf", V::S("center"))]),
    ("self-baseline", &[("alignSelf", V::S("baseline"))]),
    ("self-stretch", &[("alignSelf", V::S("stretch"))]),
    ("content-start", &[("alignContent", V::S("flex-start"))]),
    ("content-end", &[("alignContent", V::S("flex-end"))]),
    ("content-center", &[("alignContent", V::S("center"))]),
    ("content-between", &[("alignContent", V::S("space-between"))]),
    ("content-around", &[("alignContent", V::S("space-around"))]),
    ("content-stretch", &[("alignContent", V::S("stretch"))]),
    ("text-left", &[("textAlign", V::S("left"))]),
    ("text-center", &[("textAlign", V::S("center"))]),
    ("text-right", &[("textAlign", V::S("right"))]),
    ("text-justify", &[("textAlign", V::S("justify"))]),
    ("italic", &[("fontStyle", V::S("italic"))]),
    ("not-italic", &[("fontStyle", V::S("normal"))]),
    ("underline", &[("textDecoration", V::S("underline"))]),
    ("line-through", &[("textDecoration", V::S("line-through"))]),
    ("no-underline", &[("textDecoration", V::S("none"))]),
    ("uppercase", &[("textTransform", V::S("uppercase"))]),
    ("lowercase", &[("textTransform", V::S("lowercase"))]),
    ("capitalize", &[("textTransform", V::S("capitalize"))]),
    ("normal-case", &[("textTransform", V::S("none"))]),
    ("absolute", &[("position", V::S("absolute"))]),
    ("relative", &[("position", V::S("relative"))]),
    ("border", &[("borderWidth", V::N(1.0))]),
    ("border-solid", &[("borderStyle", V::S("solid"))]),
    ("border-dashed", &[("borderStyle", V::S("dashed"))]),
    ("border-dotted", &[("borderStyle", V::S("dotted"))]),
    ("rounded", &[("borderRadius", V::N(4.0))]),
    ("overflow-hidden", &[("overflow", V::S("hidden"))]),
    ("overflow-visible", &[("overflow", V::S("visible"))]),
    ("object-contain", &[("objectFit", V::S("contain"))]),
    ("object-cover", &[("objectFit", V::S("cover"))]),
    ("object-fill", &[("objectFit", V::S("fill"))]),
    ("object-none", &[("objectFit", V::S("none"))]),
    ("object-scale-down", &[("objectFit", V::S("scale-down"))]),
];

#[derive(Clone, Copy)]
enum Rule {
    /// Spacing scale only (padding, gap).
    Spacing(&'static [&'static str]),
    /// Spacing scale, `auto`, negatives.
    Margin(&'static [&'static str]),
    /// Spacing, fractions, `full`, `auto`, negatives.
    Offset(&'static [&'static str]),
    /// Spacing, fractions, `full`, `auto`.
    Size(&'static [&'static str]),
    Text,
    Font,
    Background,
    Border,
    Rounded,
    Opacity,
    Leading,
    ZIndex,
}

/// Prefix rules. Longer prefixes sharing a stem come first.
#[rustfmt::skip]
const PREFIXES: &[(&str, Rule)] = &[
    ("gap-x-", Rule::Spacing(&["columnGap"])),
    ("gap-y-", Rule::Spacing(&["rowGap"])),
    ("gap-", Rule::Spacing(&["gap"])),
    ("px-", Rule::Spacing(&["paddingLeft", "paddingRight"])),
    ("py-", Rule::Spacing(&["paddingTop", "paddingBottom"])),
    ("pt-", Rule::Spacing(&["paddingTop"])),
    ("pr-", Rule::Spacing(&["paddingRight"])),
    ("pb-", Rule::Spacing(&["paddingBottom"])),
    ("pl-", Rule::Spacing(&["paddingLeft"])),
    ("p-", Rule::Spacing(&["padding"])),
    ("mx-", Rule::Margin(&["marginLeft", "marginRight"])),
    ("my-", Rule::Margin(&["marginTop", "marginBottom"])),
    ("mt-", Rule::Margin(&["marginTop"])),
    ("mr-", Rule::Margin(&["marginRight"])),
    ("mb-", Rule::Margin(&["marginBottom"])),
    ("ml-", Rule::Margin(&["marginLeft"])),
    ("m-", Rule::Margin(&["margin"])),
    ("inset-x-", Rule::Offset(&["left", "right"])),
    ("inset-y-", Rule::Offset(&["top", "bottom"])),
    ("inset-", Rule::Offset(&["top", "right", "bottom", "left"])),
    ("top-", Rule::Offset(&["top"])),
    ("right-", Rule::Offset(&["right"])),
    ("bottom-", Rule::Offset(&["bottom"])),
    ("left-", Rule::Offset(&["left"])),
    ("min-w-", Rule::Size(&["minWidth"])),
    ("min-h-", Rule::Size(&["minHeight"])),
    ("max-w-", Rule::Size(&["maxWidth"])),
    ("max-h-", Rule::Size(&["maxHeight"])),
    ("size-", Rule::Size(&["width", "height"])),
    ("w-", Rule::Size(&["width"])),
    ("h-", Rule::Size(&["height"])),
    ("text-", Rule::Text),
    ("font-", Rule::Font),
    ("bg-", Rule::Background),
    ("border-", Rule::Border),
    ("rounded-", Rule::Rounded),
    ("opacity-", Rule::Opacity),
    ("leading-", Rule::Leading),
    ("z-", Rule::ZIndex),
];

fn apply_token(token: &str, style: &mut Style) {
    if let Some((_, decls)) = KEYWORDS.iter().find(|(name, _)| *name == token) {
        for (prop, value) in decls.iter() {
            style.set(*prop, *value);
        }
        return;
    }

    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    for (prefix, rule) in PREFIXES {
        if let Some(value) = body.strip_prefix(prefix)
            && apply_rule(*rule, value, negative, style)
        {
            return;
        }
    }
}

fn apply_rule(rule: Rule, value: &str, negative: bool, style: &mut Style) -> bool {
    let resolved: Vec<(&str, StyleValue)> = match rule {
        Rule::Spacing(props) => {
            if negative {
                return false;
            }
            match spacing(value) {
                Some(n) => assign(props, StyleValue::Number(n)),
                None => return false,
            }
        }
        Rule::Margin(props) => {
            let resolved = if value == "auto" && !negative {
                Some(StyleValue::from("auto"))
            } else {
                spacing(value).map(|n| StyleValue::Number(signed(n, negative)))
            };
            match resolved {
                Some(v) => assign(props, v),
                None => return false,
            }
        }
        Rule::Offset(props) => match length(value, negative) {
            Some(v) => assign(props, v),
            None => return false,
        },
        Rule::Size(props) => {
            if negative {
                return false;
            }
            match length(value, false) {
                Some(v) => assign(props, v),
                None => return false,
            }
        }
        Rule::Text if !negative => match text_value(value) {
            Some(decl) => vec![decl],
            None => return false,
        },
        Rule::Font if !negative => match font_value(value) {
            Some(decl) => vec![decl],
            None => return false,
        },
        Rule::Background if !negative => match color(value) {
            Some(c) => vec![("backgroundColor", StyleValue::Text(c))],
            None => return false,
        },
        Rule::Border if !negative => match border_value(value) {
            Some(decls) => decls,
            None => return false,
        },
        Rule::Rounded if !negative => match radius(value) {
            Some(n) => vec![("borderRadius", StyleValue::Number(n))],
            None => return false,
        },
        Rule::Opacity if !negative => match value.parse::<u8>() {
            Ok(n) if n <= 100 && n % 5 == 0 => {
                vec![("opacity", StyleValue::Number(f64::from(n) / 100.0))]
            }
            _ => return false,
        },
        Rule::Leading if !negative => match line_height(value) {
            Some(n) => vec![("lineHeight", StyleValue::Number(n))],
            None => return false,
        },
        Rule::ZIndex => match value {
            "auto" if !negative => vec![("zIndex", StyleValue::from("auto"))],
            "0" | "10" | "20" | "30" | "40" | "50" => {
                let n: f64 = value.parse().unwrap_or(0.0);
                vec![("zIndex", StyleValue::Number(signed(n, negative)))]
            }
            _ => return false,
        },
        _ => return false,
    };

    for (prop, value) in resolved {
        style.set(prop, value);
    }
    true
}

fn assign(props: &'static [&'static str], value: StyleValue) -> Vec<(&'static str, StyleValue)> {
    props.iter().map(|p| (*p, value.clone())).collect()
}

fn signed(n: f64, negative: bool) -> f64 {
    if negative && n != 0.0 { -n } else { n }
}

// ============================================================================
// VALUE SCALES
// ============================================================================

const SPACING_SCALE: &[f64] = &[
    0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 14.0,
    16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 52.0, 56.0, 60.0, 64.0, 72.0, 80.0, 96.0,
];

const FONT_SIZES: &[(&str, f64)] = &[
    ("xs", 12.0),
    ("sm", 14.0),
    ("base", 16.0),
    ("lg", 18.0),
    ("xl", 20.0),
    ("2xl", 24.0),
    ("3xl", 30.0),
    ("4xl", 36.0),
    ("5xl", 48.0),
    ("6xl", 60.0),
    ("7xl", 72.0),
    ("8xl", 96.0),
    ("9xl", 128.0),
];

const FONT_WEIGHTS: &[(&str, f64)] = &[
    ("thin", 100.0),
    ("extralight", 200.0),
    ("light", 300.0),
    ("normal", 400.0),
    ("medium", 500.0),
    ("semibold", 600.0),
    ("bold", 700.0),
    ("extrabold", 800.0),
    ("black", 900.0),
];

const FONT_FAMILIES: &[(&str, &str)] = &[
    ("sans", "Inter"),
    ("serif", "Merriweather"),
    ("mono", "Roboto Mono"),
];

const RADII: &[(&str, f64)] = &[
    ("none", 0.0),
    ("sm", 2.0),
    ("md", 6.0),
    ("lg", 8.0),
    ("xl", 12.0),
    ("2xl", 16.0),
    ("3xl", 24.0),
    ("full", 9999.0),
];

const LINE_HEIGHTS: &[(&str, f64)] = &[
    ("none", 1.0),
    ("tight", 1.25),
    ("snug", 1.375),
    ("normal", 1.5),
    ("relaxed", 1.625),
    ("loose", 2.0),
];

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(name, _)| *name == key).map(|(_, v)| *v)
}

/// Spacing scale value in points: `4` → 16, `px` → 1, `[10]` → 10.
fn spacing(value: &str) -> Option<f64> {
    if value == "px" {
        return Some(1.0);
    }
    if let Some(n) = arbitrary_number(value) {
        return Some(n);
    }
    let n: f64 = value.parse().ok()?;
    SPACING_SCALE.contains(&n).then_some(n * 4.0)
}

/// Bracketed number with an optional `px`/`pt` unit: `[12]`, `[12px]`.
fn arbitrary_number(value: &str) -> Option<f64> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    let inner = inner
        .strip_suffix("px")
        .or_else(|| inner.strip_suffix("pt"))
        .unwrap_or(inner);
    inner.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Tailwind fraction (`1/2`, `2/3`, `5/12`) as a percentage.
fn fraction(value: &str) -> Option<StyleValue> {
    let (num, den) = value.split_once('/')?;
    let num: u8 = num.parse().ok()?;
    let den: u8 = den.parse().ok()?;
    if !matches!(den, 2 | 3 | 4 | 5 | 6 | 12) || num == 0 || num >= den {
        return None;
    }
    Some(StyleValue::percent(f64::from(num) / f64::from(den) * 100.0))
}

/// Width/height/offset value.
fn length(value: &str, negative: bool) -> Option<StyleValue> {
    match value {
        "full" if !negative => return Some(StyleValue::from("100%")),
        "auto" if !negative => return Some(StyleValue::from("auto")),
        _ => {}
    }
    if !negative {
        if let Some(pct) = fraction(value) {
            return Some(pct);
        }
        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']'))
            && let Some(pct) = inner.strip_suffix('%')
            && let Ok(n) = pct.parse::<f64>()
        {
            return Some(StyleValue::percent(n));
        }
    }
    spacing(value).map(|n| StyleValue::Number(signed(n, negative)))
}

fn text_value(value: &str) -> Option<(&'static str, StyleValue)> {
    if let Some(size) = lookup(FONT_SIZES, value).or_else(|| arbitrary_number(value)) {
        return Some(("fontSize", StyleValue::Number(size)));
    }
    color(value).map(|c| ("color", StyleValue::Text(c)))
}

fn font_value(value: &str) -> Option<(&'static str, StyleValue)> {
    if let Some(weight) = lookup(FONT_WEIGHTS, value) {
        return Some(("fontWeight", StyleValue::Number(weight)));
    }
    if let Some((_, family)) = FONT_FAMILIES.iter().find(|(name, _)| *name == value) {
        return Some(("fontFamily", StyleValue::from(*family)));
    }
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(("fontFamily", StyleValue::Text(inner.replace('_', " "))))
}

fn border_width(value: &str) -> Option<f64> {
    match value {
        "0" => Some(0.0),
        "2" => Some(2.0),
        "4" => Some(4.0),
        "8" => Some(8.0),
        _ => arbitrary_number(value),
    }
}

fn border_value(value: &str) -> Option<Vec<(&'static str, StyleValue)>> {
    if let Some(width) = border_width(value) {
        return Some(vec![("borderWidth", StyleValue::Number(width))]);
    }

    let (side, width) = match value.split_once('-') {
        Some((side, rest)) => (side, Some(rest)),
        None => (value, None),
    };
    let props: &'static [&'static str] = match side {
        "t" => &["borderTopWidth"],
        "r" => &["borderRightWidth"],
        "b" => &["borderBottomWidth"],
        "l" => &["borderLeftWidth"],
        "x" => &["borderLeftWidth", "borderRightWidth"],
        "y" => &["borderTopWidth", "borderBottomWidth"],
        _ => {
            return color(value).map(|c| vec![("borderColor", StyleValue::Text(c))]);
        }
    };
    let width = match width {
        None => 1.0,
        Some(w) => border_width(w)?,
    };
    Some(assign(props, StyleValue::Number(width)))
}

fn radius(value: &str) -> Option<f64> {
    lookup(RADII, value).or_else(|| arbitrary_number(value))
}

fn line_height(value: &str) -> Option<f64> {
    if let Some(ratio) = lookup(LINE_HEIGHTS, value) {
        return Some(ratio);
    }
    match value.parse::<u8>() {
        Ok(n) if (3..=10).contains(&n) => Some(f64::from(n) * 4.0),
        _ => arbitrary_number(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(style: &Style, key: &str) -> Option<f64> {
        style.get(key).and_then(|v| v.as_f64())
    }

    fn text(style: &Style, key: &str) -> Option<String> {
        style.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(resolve_classes("").is_empty());
        assert!(resolve_classes("   \t\n ").is_empty());
    }

    #[test]
    fn test_spacing_scale() {
        let style = resolve_classes("p-4 mt-2 gap-0.5 pl-px");
        assert_eq!(num(&style, "padding"), Some(16.0));
        assert_eq!(num(&style, "marginTop"), Some(8.0));
        assert_eq!(num(&style, "gap"), Some(2.0));
        assert_eq!(num(&style, "paddingLeft"), Some(1.0));
    }

    #[test]
    fn test_axis_spacing_sets_both_edges() {
        let style = resolve_classes("px-2 my-3");
        assert_eq!(num(&style, "paddingLeft"), Some(8.0));
        assert_eq!(num(&style, "paddingRight"), Some(8.0));
        assert_eq!(num(&style, "marginTop"), Some(12.0));
        assert_eq!(num(&style, "marginBottom"), Some(12.0));
        assert!(!style.contains("padding"));
    }

    #[test]
    fn test_negative_margin_and_offset() {
        let style = resolve_classes("-mt-2 -left-4");
        assert_eq!(num(&style, "marginTop"), Some(-8.0));
        assert_eq!(num(&style, "left"), Some(-16.0));
    }

    #[test]
    fn test_negative_padding_ignored() {
        assert!(resolve_classes("-p-4").is_empty());
    }

    #[test]
    fn test_margin_auto() {
        assert_eq!(text(&resolve_classes("mx-auto"), "marginLeft").as_deref(), Some("auto"));
    }

    #[test]
    fn test_later_token_wins() {
        let style = resolve_classes("p-4 p-2");
        assert_eq!(num(&style, "padding"), Some(8.0));
        let style = resolve_classes("text-red-500 text-blue-500");
        assert_eq!(text(&style, "color").as_deref(), Some("#3b82f6"));
    }

    #[test]
    fn test_different_properties_do_not_interact() {
        let style = resolve_classes("p-4 px-2");
        assert_eq!(num(&style, "padding"), Some(16.0));
        assert_eq!(num(&style, "paddingLeft"), Some(8.0));
    }

    #[test]
    fn test_colors() {
        let style = resolve_classes("text-red-500 bg-white border-slate-200");
        assert_eq!(text(&style, "color").as_deref(), Some("#ef4444"));
        assert_eq!(text(&style, "backgroundColor").as_deref(), Some("#ffffff"));
        assert_eq!(text(&style, "borderColor").as_deref(), Some("#e2e8f0"));
    }

    #[test]
    fn test_font_size_and_weight() {
        let style = resolve_classes("text-2xl font-semibold");
        assert_eq!(num(&style, "fontSize"), Some(24.0));
        assert_eq!(num(&style, "fontWeight"), Some(600.0));
    }

    #[test]
    fn test_font_family() {
        assert_eq!(text(&resolve_classes("font-mono"), "fontFamily").as_deref(), Some("Roboto Mono"));
        assert_eq!(
            text(&resolve_classes("font-[Open_Sans]"), "fontFamily").as_deref(),
            Some("Open Sans")
        );
    }

    #[test]
    fn test_text_alignment_is_not_a_color() {
        let style = resolve_classes("text-center");
        assert_eq!(text(&style, "textAlign").as_deref(), Some("center"));
        assert!(!style.contains("color"));
    }

    #[test]
    fn test_flex_keywords() {
        let style = resolve_classes("flex flex-col justify-between items-center flex-1");
        assert_eq!(text(&style, "display").as_deref(), Some("flex"));
        assert_eq!(text(&style, "flexDirection").as_deref(), Some("column"));
        assert_eq!(text(&style, "justifyContent").as_deref(), Some("space-between"));
        assert_eq!(text(&style, "alignItems").as_deref(), Some("center"));
        assert_eq!(num(&style, "flexGrow"), Some(1.0));
        assert_eq!(text(&style, "flexBasis").as_deref(), Some("0%"));
    }

    #[test]
    fn test_borders() {
        let style = resolve_classes("border border-dashed rounded-lg border-t-4");
        assert_eq!(num(&style, "borderWidth"), Some(1.0));
        assert_eq!(text(&style, "borderStyle").as_deref(), Some("dashed"));
        assert_eq!(num(&style, "borderRadius"), Some(8.0));
        assert_eq!(num(&style, "borderTopWidth"), Some(4.0));
        assert_eq!(num(&resolve_classes("border-b"), "borderBottomWidth"), Some(1.0));
        assert_eq!(num(&resolve_classes("border-2"), "borderWidth"), Some(2.0));
    }

    #[test]
    fn test_position() {
        let style = resolve_classes("absolute top-0 right-4 inset-x-2");
        assert_eq!(text(&style, "position").as_deref(), Some("absolute"));
        assert_eq!(num(&style, "top"), Some(0.0));
        assert_eq!(num(&style, "right"), Some(8.0));
        assert_eq!(num(&style, "left"), Some(8.0));
    }

    #[test]
    fn test_opacity() {
        assert_eq!(num(&resolve_classes("opacity-50"), "opacity"), Some(0.5));
        assert_eq!(num(&resolve_classes("opacity-0"), "opacity"), Some(0.0));
        assert!(resolve_classes("opacity-42").is_empty());
    }

    #[test]
    fn test_fractional_sizes() {
        let style = resolve_classes("w-1/2 h-full");
        assert_eq!(text(&style, "width").as_deref(), Some("50%"));
        assert_eq!(text(&style, "height").as_deref(), Some("100%"));
        assert_eq!(
            text(&resolve_classes("w-1/3"), "width").as_deref(),
            Some("33.333333%")
        );
        assert!(resolve_classes("w-3/2").is_empty());
    }

    #[test]
    fn test_fixed_sizes_and_arbitrary() {
        let style = resolve_classes("w-12 max-w-[300] size-8 min-h-[25%]");
        assert_eq!(num(&style, "width"), Some(32.0));
        assert_eq!(num(&style, "height"), Some(32.0));
        assert_eq!(num(&style, "maxWidth"), Some(300.0));
        assert_eq!(text(&style, "minHeight").as_deref(), Some("25%"));
    }

    #[test]
    fn test_typography_keywords() {
        let style = resolve_classes("italic underline uppercase leading-tight");
        assert_eq!(text(&style, "fontStyle").as_deref(), Some("italic"));
        assert_eq!(text(&style, "textDecoration").as_deref(), Some("underline"));
        assert_eq!(text(&style, "textTransform").as_deref(), Some("uppercase"));
        assert_eq!(num(&style, "lineHeight"), Some(1.25));
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let style = resolve_classes("p-4 hover:bg-red-500 sparkly text-red-550 w-13");
        assert_eq!(style.len(), 1);
        assert_eq!(num(&style, "padding"), Some(16.0));
    }

    #[test]
    fn test_deterministic() {
        let input = "flex p-4 text-lg bg-blue-100 w-1/4 -mx-2";
        assert_eq!(resolve_classes(input), resolve_classes(input));
    }
}
