use fuel_core::Rgba;

/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK:  Self = Self { r: 0.082, g: 0.082, b: 0.082, a: 1.0 }; // #151515
    pub const GREY:   Self = Self { r: 0.451, g: 0.451, b: 0.451, a: 1.0 }; // #737373
    pub const YELLOW: Self = Self { r: 1.0,   g: 0.788, b: 0.0,   a: 1.0 }; // #ffc900
    pub const ORANGE: Self = Self { r: 1.0,   g: 0.353, b: 0.212, a: 1.0 }; // #ff5a36

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<f32> { u8::from_str_radix(s, 16).ok().map(|b| b as f32 / 255.0) };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
                a: byte(&hex[6..8])?,
            }),
            _ => None,
        }
    }

    /// Convert to an 8-bit pixel for the rasteriser.
    #[inline]
    pub fn to_rgba(self) -> Rgba {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Composite `self` over an opaque `background`; the result is opaque.
    #[must_use]
    pub fn over(self, background: Color) -> Self {
        let mix = |fg: f32, bg: f32| fg * self.a + bg * (1.0 - self.a);
        Self {
            r: mix(self.r, background.r),
            g: mix(self.g, background.g),
            b: mix(self.b, background.b),
            a: 1.0,
        }
    }
}
