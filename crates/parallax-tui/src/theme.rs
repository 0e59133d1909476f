use ratatui::style::Color;

/// Runtime theme for the demo page
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub blue: Color,
    pub cyan: Color,

    // Semantic colors
    pub accent: Color,
    pub active: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Slate and blue, matching the site
        Self {
            bg0: Color::Rgb(0x0f, 0x17, 0x2a),
            bg1: Color::Rgb(0x1e, 0x29, 0x3b),
            bg2: Color::Rgb(0x33, 0x41, 0x55),
            fg0: Color::Rgb(0xf1, 0xf5, 0xf9),
            fg1: Color::Rgb(0xcb, 0xd5, 0xe1),
            grey0: Color::Rgb(0x64, 0x74, 0x8b),
            grey1: Color::Rgb(0x94, 0xa3, 0xb8),
            blue: Color::Rgb(0x3b, 0x82, 0xf6),
            cyan: Color::Rgb(0x22, 0xd3, 0xee),
            accent: Color::Rgb(0x60, 0xa5, 0xfa),
            active: Color::Rgb(0x3b, 0x82, 0xf6),
            success: Color::Rgb(0x22, 0xc5, 0x5e),
            error: Color::Rgb(0xef, 0x44, 0x44),
        }
    }
}

impl Theme {
    /// `color` at the given opacity over the page background
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        blend(self.bg0, color, opacity)
    }
}

/// Linear mix of two RGB colors; non-RGB colors snap at half opacity
pub fn blend(background: Color, foreground: Color, opacity: f64) -> Color {
    let t = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    match (background, foreground) {
        (Color::Rgb(br, bg, bb), Color::Rgb(fr, fg, fb)) => {
            let mix = |b: u8, f: u8| (b as f64 + (f as f64 - b as f64) * t).round() as u8;
            Color::Rgb(mix(br, fr), mix(bg, fg), mix(bb, fb))
        }
        _ if t >= 0.5 => foreground,
        _ => background,
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
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}
