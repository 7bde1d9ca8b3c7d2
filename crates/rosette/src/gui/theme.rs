use crate::document::PresetColors;
use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

/// Resolved colors for one preset. Hex strings from the document are parsed
/// once per state rebuild; malformed entries fall back to the defaults so a
/// hand-edited document never blanks the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPalette {
    pub inner: Srgba<f64>,
    pub inner_highlight: Srgba<f64>,
    pub inner_line: Srgba<f64>,
    pub child: Srgba<f64>,
    pub child_line: Srgba<f64>,
    pub child_text: Srgba<f64>,
    pub child_text_outline: Srgba<f64>,
    pub child_outline_thickness: f64,
}

impl MenuPalette {
    pub fn from_colors(colors: &PresetColors) -> Self {
        let fallback = PresetColors::default();
        let pick = |raw: &str, def: &str| {
            parse_hex(raw)
                .or_else(|| parse_hex(def))
                .unwrap_or(Srgba::new(0.5, 0.5, 0.5, 1.0))
        };
        Self {
            inner: pick(&colors.inner, &fallback.inner),
            inner_highlight: pick(&colors.inner_highlight, &fallback.inner_highlight),
            inner_line: pick(&colors.inner_line, &fallback.inner_line),
            child: pick(&colors.child, &fallback.child),
            child_line: pick(&colors.child_line, &fallback.child_line),
            child_text: pick(&colors.child_text, &fallback.child_text),
            child_text_outline: pick(&colors.child_text_outline, &fallback.child_text_outline),
            child_outline_thickness: if colors.child_outline_thickness.is_finite()
                && colors.child_outline_thickness >= 0.0
            {
                colors.child_outline_thickness
            } else {
                fallback.child_outline_thickness
            },
        }
    }
}

/// Accepts `#RRGGBB` and `#RRGGBBAA`, case-insensitive.
pub fn parse_hex(raw: &str) -> Option<Srgba<f64>> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(hex.get(i..i + 2)?, 16)
            .ok()
            .map(|v| v as f64 / 255.0)
    };
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some(Srgba::new(r, g, b, a))
}

/// Mixes a color toward white, preserving alpha.
pub fn lighten(color: Srgba<f64>, amount: f64) -> Srgba<f64> {
    let mix = |c: f64| c + (1.0 - c) * amount;
    Srgba::new(mix(color.red), mix(color.green), mix(color.blue), color.alpha)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.rosette-window, .rosette-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = parse_hex("#FFFFFF").unwrap();
        assert_eq!(c, Srgba::new(1.0, 1.0, 1.0, 1.0));
        let c = parse_hex("#000000").unwrap();
        assert_eq!(c, Srgba::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn parses_eight_digit_hex_alpha() {
        let c = parse_hex("#ff000080").unwrap();
        assert_eq!(c.red, 1.0);
        assert_eq!(c.green, 0.0);
        assert!((c.alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("FFFFFF"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(parse_hex("#FFFFFFF"), None);
    }

    #[test]
    fn malformed_document_colors_fall_back() {
        let mut colors = PresetColors::default();
        colors.inner = "not-a-color".into();
        let palette = MenuPalette::from_colors(&colors);
        let default_palette = MenuPalette::from_colors(&PresetColors::default());
        assert_eq!(palette.inner, default_palette.inner);
    }

    #[test]
    fn lighten_moves_toward_white() {
        let c = lighten(Srgba::new(0.0, 0.5, 1.0, 0.7), 0.2);
        assert!((c.red - 0.2).abs() < 1e-9);
        assert!((c.green - 0.6).abs() < 1e-9);
        assert_eq!(c.blue, 1.0);
        assert_eq!(c.alpha, 0.7);
    }
}
