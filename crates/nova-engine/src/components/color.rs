/// RGBA color. Channels are 0–255, alpha is kept inside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };

    /// Const constructor; `a` must already be inside `[0, 1]`.
    pub const fn rgba_const(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        let mut color = Self { r, g, b, a: 1.0 };
        color.set_alpha(a);
        color
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` (leading `#` optional). Returns None for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// Set alpha; values outside `[0, 1]` are clamped, NaN becomes 0.
    pub fn set_alpha(&mut self, a: f32) {
        self.a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.set_alpha(a);
        self
    }

    /// CSS `rgba(r, g, b, a)` string.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// `#rrggbbaa` with alpha scaled to 0–255.
    pub fn to_hex(&self) -> String {
        let a = (self.a * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
