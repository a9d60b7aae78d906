pub mod colors;

pub use colors::Color;

use fuel_config::ThemeConfig;
use fuel_core::Rgba;

/// Compiled chart theme derived from [`ThemeConfig`].
///
/// Colours are pre-parsed and pre-composited into opaque pixels.
/// Invalid colour strings fall back to the built-in palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    /// Marker lines, drawn at half strength over the background.
    pub grid:       Rgba,
    pub curve:      Rgba,
    pub average:    Rgba,
    pub line_width: u32,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let background = Color::from_hex(&cfg.background).unwrap_or(Color::BLACK);
        let grid = Color::from_hex(&cfg.grid).unwrap_or(Color::GREY);

        Self {
            background: background.with_alpha(1.0).to_rgba(),
            grid:       grid.with_alpha(0.5).over(background).to_rgba(),
            curve:      Color::from_hex(&cfg.curve).unwrap_or(Color::YELLOW).to_rgba(),
            average:    Color::from_hex(&cfg.average).unwrap_or(Color::ORANGE).to_rgba(),
            line_width: cfg.line_width.clamp(1, 8),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_colours_fall_back() {
        let cfg = ThemeConfig {
            curve: "not a colour".into(),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&cfg).curve, Color::YELLOW.to_rgba());
    }

    #[test]
    fn grid_is_dimmer_than_configured() {
        let theme = Theme::default();
        let full = Color::GREY.to_rgba();
        assert!(theme.grid.0[0] < full.0[0]);
        assert_eq!(theme.grid.0[3], 255);
    }
}
