//! Colors and palettes for particle fields.
//!
//! Colors are straight (non-premultiplied) RGBA with each channel in
//! `0.0..=1.0`. In config files they are written as hex strings:
//!
//! ```json
//! { "palette": ["#fa9c1e", "#218ffe", "#ffffff", "#ff5252"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb8(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb8(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Color from float channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with a different alpha, clamped to `0.0..=1.0`.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16).ok_or_else(err)? as u8;
                    channels[i] = v * 17;
                }
                Ok(Rgba::rgb8(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Rgba::rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::rgb8(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f32 / 255.0)),
            _ => Err(err()),
        }
    }

    /// Hex form. Alpha is included only when the color is not opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::parse_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Preset particle palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Warm orange, electric blue, white and red.
    #[default]
    Ember,

    /// Cool blues and violets.
    Circuit,

    /// Plain white points.
    Starlight,
}

impl Palette {
    /// The colors particles are drawn from, uniformly.
    pub fn colors(&self) -> Vec<Rgba> {
        match self {
            Palette::Ember => vec![
                Rgba::rgb8(0xfa, 0x9c, 0x1e), // Orange
                Rgba::rgb8(0x21, 0x8f, 0xfe), // Blue
                Rgba::rgb8(0xff, 0xff, 0xff), // White
                Rgba::rgb8(0xff, 0x52, 0x52), // Red
            ],
            Palette::Circuit => vec![
                Rgba::rgb8(0x3b, 0x82, 0xf6),
                Rgba::rgb8(0x8b, 0x5c, 0xf6),
                Rgba::rgb8(0x06, 0xb6, 0xd4),
                Rgba::rgb8(0xe0, 0xe7, 0xff),
            ],
            Palette::Starlight => vec![Rgba::WHITE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let c = Rgba::parse_hex("#fa9c1e").unwrap();
        assert_eq!(c.to_rgba8(), [0xfa, 0x9c, 0x1e, 255]);
    }

    #[test]
    fn test_parse_short_hex() {
        let c = Rgba::parse_hex("#fff").unwrap();
        assert_eq!(c, Rgba::WHITE);
    }

    #[test]
    fn test_parse_with_alpha() {
        let c = Rgba::parse_hex("000000800").err();
        assert!(c.is_some());

        let c = Rgba::parse_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.to_hex(), "#00000080");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse_hex("#12345").is_err());
        assert!(Rgba::parse_hex("#gggggg").is_err());
        assert!(Rgba::parse_hex("").is_err());
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(2.0).a, 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(-1.0).a, 0.0);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgba::rgb8(0x21, 0x8f, 0xfe)).unwrap();
        assert_eq!(json, "\"#218ffe\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgba8(), [0x21, 0x8f, 0xfe, 255]);
    }

    #[test]
    fn test_ember_palette() {
        let colors = Palette::Ember.colors();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0].to_hex(), "#fa9c1e");
    }
}
