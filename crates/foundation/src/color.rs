use std::fmt;

/// Opaque 8-bit sRGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a packed `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// CSS hex notation, e.g. `#3B0066`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_literal_round_trips_to_css() {
        let c = Color::from_hex(0x3B0066);
        assert_eq!(c, Color::rgb(0x3B, 0x00, 0x66));
        assert_eq!(c.css(), "#3B0066");
    }

    #[test]
    fn css_pads_small_channels() {
        assert_eq!(Color::rgb(9, 8, 8).css(), "#090808");
    }
}
