use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32, // Red component (0.0 - 1.0)
    pub g: f32, // Green component (0.0 - 1.0)
    pub b: f32, // Blue component (0.0 - 1.0)
}

impl Color {
    /// Create a new color with RGB components normalized.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8 bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Lowercase "rrggbb", without the leading '#'.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("{:02x}{:02x}{:02x}", r, g, b)
    }

    const fn hex_char_to_u8(c: char) -> u8 {
        match c {
            '0'..='9' => (c as u8) - b'0',
            'a'..='f' => (c as u8) - b'a' + 10,
            'A'..='F' => (c as u8) - b'A' + 10,
            _ => 0,
        }
    }

    /// Convert two hex characters to a single byte (u8).
    const fn hex_pair_to_u8(high: char, low: char) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Only for the constants below, input is trusted.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        let r =
            Self::hex_pair_to_u8(bytes[offset] as char, bytes[offset + 1] as char) as f32 / 255.0;
        let g = Self::hex_pair_to_u8(bytes[offset + 2] as char, bytes[offset + 3] as char) as f32
            / 255.0;
        let b = Self::hex_pair_to_u8(bytes[offset + 4] as char, bytes[offset + 5] as char) as f32
            / 255.0;

        Self { r, g, b }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Packs into minifb's 0x00RRGGBB layout.
    pub fn to_u32(&self) -> u32 {
        let [r, g, b] = self.to_rgb8();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    pub fn lerp(&self, end: &Color, t: f32) -> Color {
        Color {
            r: self.r + (end.r - self.r) * t,
            g: self.g + (end.g - self.g) * t,
            b: self.b + (end.b - self.b) * t,
        }
    }

    pub fn scale(&self, factor: f32) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn clamped(&self) -> Color {
        Color::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

/// Component-wise modulation, used to tint a surface color by incoming light.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const GRAY: Color = Color::hex("808080");
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const RED: Color = Color::hex("FF0000");
    pub const GREEN: Color = Color::hex("00FF00");
    pub const BLUE: Color = Color::hex("0000FF");
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_survives_to_hex() {
        let c = Color::from_rgb8(255, 128, 0);
        assert_eq!(c.to_rgb8(), [255, 128, 0]);
        assert_eq!(c.to_hex(), "ff8000");
        assert_eq!(Color::from_rgb8(1, 2, 3).to_hex(), "010203");
    }

    #[test]
    fn palette_matches_rgb8() {
        assert_eq!(Color::RED, Color::from_rgb8(255, 0, 0));
        assert_eq!(Color::WHITE, Color::from_rgb8(255, 255, 255));
    }

    #[test]
    fn to_u32_packs_rgb() {
        assert_eq!(Color::RED.to_u32(), 0x00FF_0000);
        assert_eq!(Color::WHITE.to_u32(), 0x00FF_FFFF);
        // Over-bright light is clamped rather than wrapping around.
        assert_eq!(Color::new(2.0, 0.0, 0.0).to_u32(), 0x00FF_0000);
    }

    #[test]
    fn modulate_and_scale() {
        let lit = Color::new(0.5, 1.0, 0.25) * Color::WHITE.scale(2.0);
        assert_eq!(lit, Color::new(1.0, 2.0, 0.5));
        assert_eq!(lit.clamped(), Color::new(1.0, 1.0, 0.5));
    }
}
