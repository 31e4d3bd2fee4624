use ratatui::style::Color;
use tickruler_core::RulerConfig;

/// Resolved colours for one ruler
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub bg: Color,
    pub major: Color,
    pub minor: Color,
    pub matched: Color,
    pub label: Color,
    pub indicator: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg: Color::Rgb(0x28, 0x28, 0x28),
            major: Color::Rgb(0xd4, 0xbe, 0x98),
            minor: Color::Rgb(0x7c, 0x6f, 0x64),
            matched: Color::Rgb(0xa9, 0xb6, 0x65),
            label: Color::Rgb(0xa8, 0x99, 0x84),
            indicator: Color::Rgb(0xea, 0x69, 0x62),
            status_fg: Color::Rgb(0xd4, 0xbe, 0x98),
            status_bg: Color::Rgb(0x45, 0x40, 0x3d),
            hint: Color::Rgb(0xa8, 0x99, 0x84),
        }
    }
}

impl Theme {
    /// Apply the hex colours from the ruler config, keeping defaults for bad input
    pub fn from_config(config: &RulerConfig) -> Self {
        let defaults = Self::default();
        let resolve = |hex: &str, fallback: Color| {
            parse_hex_color(hex).unwrap_or_else(|| {
                tracing::warn!("Invalid color '{}', using default", hex);
                fallback
            })
        };

        Self {
            major: resolve(&config.tick_style.major_color, defaults.major),
            minor: resolve(&config.tick_style.minor_color, defaults.minor),
            matched: resolve(&config.tick_style.matched_color, defaults.matched),
            label: resolve(&config.label_style.color, defaults.label),
            ..defaults
        }
    }

    /// Colour for a descriptor's hex string, falling back to `fallback`
    pub fn color_or(&self, hex: &str, fallback: Color) -> Color {
        parse_hex_color(hex).unwrap_or(fallback)
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}
