//! Text alignment types

use crate::error::{Error, Result};

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    #[default]
    General = 0,
    /// Left aligned
    Left = 1,
    /// Center aligned
    Center = 2,
    /// Right aligned
    Right = 3,
    /// Fill (repeat content to fill cell width)
    Fill = 4,
    /// Justify (stretch to fit width)
    Justify = 5,
    /// Center across selection
    CenterAcrossSelection = 6,
    /// Distributed (like justify, but for East Asian text)
    Distributed = 7,
}

impl TryFrom<u8> for HorizontalAlignment {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Ok(match code {
            0 => Self::General,
            1 => Self::Left,
            2 => Self::Center,
            3 => Self::Right,
            4 => Self::Fill,
            5 => Self::Justify,
            6 => Self::CenterAcrossSelection,
            7 => Self::Distributed,
            _ => {
                return Err(Error::InvalidRecord(format!(
                    "horizontal alignment code {code}"
                )))
            }
        })
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VerticalAlignment {
    /// Top aligned
    Top = 0,
    /// Center aligned
    Center = 1,
    /// Bottom aligned (default)
    #[default]
    Bottom = 2,
    /// Justify
    Justify = 3,
    /// Distributed
    Distributed = 4,
}

impl TryFrom<u8> for VerticalAlignment {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Ok(match code {
            0 => Self::Top,
            1 => Self::Center,
            2 => Self::Bottom,
            3 => Self::Justify,
            4 => Self::Distributed,
            _ => return Err(Error::InvalidRecord(format!("vertical alignment code {code}"))),
        })
    }
}

/// Reading order for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ReadingOrder {
    /// Context dependent
    #[default]
    ContextDependent = 0,
    /// Left to right
    LeftToRight = 1,
    /// Right to left
    RightToLeft = 2,
}

impl TryFrom<u8> for ReadingOrder {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Ok(match code {
            0 => Self::ContextDependent,
            1 => Self::LeftToRight,
            2 => Self::RightToLeft,
            _ => return Err(Error::InvalidRecord(format!("reading order code {code}"))),
        })
    }
}

/// Largest indent level a style record can hold
pub const MAX_INDENT: u8 = 15;

/// Rotation value meaning letters stacked top to bottom
pub const STACKED_ROTATION: u8 = 255;

/// Encode a rotation in degrees (-90 to 90) as the record stores it
///
/// 0-90 are counter-clockwise degrees, 91-180 are 1-90 degrees clockwise.
pub fn rotation_from_degrees(degrees: i16) -> u8 {
    let degrees = degrees.clamp(-90, 90);
    if degrees >= 0 {
        degrees as u8
    } else {
        (90 - degrees) as u8
    }
}
