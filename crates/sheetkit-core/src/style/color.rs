//! Color representation

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BRIGHT_GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const PINK: Self = Self::rgb(255, 0, 255);
    pub const TURQUOISE: Self = Self::rgb(0, 255, 255);
    pub const DARK_RED: Self = Self::rgb(128, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const DARK_BLUE: Self = Self::rgb(0, 0, 128);
    pub const DARK_YELLOW: Self = Self::rgb(128, 128, 0);
    pub const VIOLET: Self = Self::rgb(128, 0, 128);
    pub const TEAL: Self = Self::rgb(0, 128, 128);
    pub const GRAY25: Self = Self::rgb(192, 192, 192);
    pub const GRAY40: Self = Self::rgb(150, 150, 150);
    pub const GRAY50: Self = Self::rgb(136, 136, 136);
    pub const GRAY80: Self = Self::rgb(51, 51, 51);
    pub const MEDIUM_PURPLE: Self = Self::rgb(153, 153, 255);
    pub const PLUM: Self = Self::rgb(153, 51, 102);
    pub const LIGHT_YELLOW: Self = Self::rgb(255, 255, 153);
    pub const LIGHT_TURQUOISE: Self = Self::rgb(204, 255, 255);
    pub const DARK_PURPLE: Self = Self::rgb(102, 0, 102);
    pub const SALMON: Self = Self::rgb(255, 128, 128);
    pub const BLUE_GRAY: Self = Self::rgb(102, 102, 153);
    pub const LIGHT_PURPLE: Self = Self::rgb(204, 204, 255);
    pub const SKY_BLUE: Self = Self::rgb(0, 204, 255);
    pub const LIGHT_GREEN: Self = Self::rgb(204, 255, 204);
    pub const PALE_BLUE: Self = Self::rgb(153, 204, 255);
    pub const ROSE: Self = Self::rgb(255, 153, 204);
    pub const LAVENDER: Self = Self::rgb(204, 153, 255);
    pub const TAN: Self = Self::rgb(255, 204, 153);
    pub const AQUA: Self = Self::rgb(51, 204, 204);
    pub const LIME: Self = Self::rgb(153, 204, 0);
    pub const GOLD: Self = Self::rgb(255, 204, 0);
    pub const LIGHT_ORANGE: Self = Self::rgb(255, 153, 0);
    pub const ORANGE: Self = Self::rgb(255, 102, 0);
    pub const DARK_TEAL: Self = Self::rgb(0, 51, 102);
    pub const SEA_GREEN: Self = Self::rgb(51, 153, 102);
    pub const DARK_GREEN: Self = Self::rgb(0, 51, 0);
    pub const OLIVE_GREEN: Self = Self::rgb(51, 51, 0);
    pub const BROWN: Self = Self::rgb(153, 51, 0);
    pub const INDIGO: Self = Self::rgb(51, 51, 153);

    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or 8-digit ARGB (`FFRRGGBB`, alpha ignored)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let hex = match hex.len() {
            6 => hex,
            8 => &hex[2..],
            _ => return None,
        };
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Squared euclidean distance in RGB space
    pub fn distance_squared(&self, other: &Color) -> u32 {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2) as u32;
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s).ok_or_else(|| Error::ColorNotFound(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::BRIGHT_GREEN));
        assert_eq!(Color::from_hex("FF0000FF"), Some(Color::BLUE));
        assert_eq!(Color::from_hex("#80336699"), Some(Color::rgb(0x33, 0x66, 0x99)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::from_hex("+F0000"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(0x12, 0xAB, 0x0F).to_hex(), "#12AB0F");
        assert_eq!(Color::WHITE.to_string(), "#FFFFFF");
    }

    #[test]
    fn test_distance() {
        assert_eq!(Color::BLACK.distance_squared(&Color::rgb(1, 2, 2)), 9);
        assert_eq!(Color::RED.distance_squared(&Color::RED), 0);
    }
}
