//! Colours

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A colour in linear RGB space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Interpret `0xRRGGBB` as an sRGB colour and convert it to linear space
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Parse `#rrggbb`, `rrggbb` or `0xrrggbb`
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text
            .trim()
            .trim_start_matches('#')
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// RGB plus a fourth component, for packing into GPU uniforms
    pub fn with_w(self, w: f32) -> [f32; 4] {
        [self.r, self.g, self.b, w]
    }

    /// Opaque clear colour in the layout wgpu expects
    pub fn to_clear_rgba(self) -> [f64; 4] {
        [self.r as f64, self.g as f64, self.b as f64, 1.0]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// sRGB electro-optical transfer function
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(u32),
            Text(String),
            Rgb([f32; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(hex) => Ok(Color::from_hex(hex)),
            Repr::Text(text) => Color::parse(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid colour {:?}", text))),
            Repr::Rgb([r, g, b]) => Ok(Color::new(r, g, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_hex_linearises() {
        let c = Color::from_hex(0x808080);
        // sRGB mid grey is roughly 21.6% linear
        assert_relative_eq!(c.r, 0.2158, epsilon = 1e-3);
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn test_parse_forms_agree() {
        let a = Color::parse("#000a0b").unwrap();
        let b = Color::parse("0x000a0b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Color::from_hex(0x000a0b));
        assert!(Color::parse("#12345").is_none());
    }
}
