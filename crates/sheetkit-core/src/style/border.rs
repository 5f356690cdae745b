//! Border style types

use crate::error::{Error, Result};

/// A single border edge: line style plus palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    /// Line style
    pub style: BorderLineStyle,
    /// Palette index of the line color (7 bits)
    pub color: u8,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: u8) -> Self {
        Self { style, color }
    }

    /// Create a thin black border
    pub fn thin() -> Self {
        Self::new(BorderLineStyle::Thin, 0)
    }

    /// Check if the edge draws nothing
    pub fn is_none(&self) -> bool {
        self.style == BorderLineStyle::None
    }
}

/// Border line styles, numbered as style records store them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None = 0,
    Thin = 1,
    Medium = 2,
    Dashed = 3,
    Dotted = 4,
    Thick = 5,
    Double = 6,
    /// Hair line (very thin)
    Hair = 7,
    MediumDashed = 8,
    DashDot = 9,
    MediumDashDot = 10,
    DashDotDot = 11,
    MediumDashDotDot = 12,
    SlantDashDot = 13,
}

impl TryFrom<u8> for BorderLineStyle {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        use BorderLineStyle::*;
        const STYLES: [BorderLineStyle; 14] = [
            None,
            Thin,
            Medium,
            Dashed,
            Dotted,
            Thick,
            Double,
            Hair,
            MediumDashed,
            DashDot,
            MediumDashDot,
            DashDotDot,
            MediumDashDotDot,
            SlantDashDot,
        ];
        STYLES
            .get(code as usize)
            .copied()
            .ok_or_else(|| Error::InvalidRecord(format!("border line style {code}")))
    }
}

/// Which edge of a cell a border applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderSide {
    Left,
    Right,
    Top,
    Bottom,
    /// Top-left to bottom-right
    DiagonalDown,
    /// Bottom-left to top-right
    DiagonalUp,
}
