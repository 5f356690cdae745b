//! Fill/background style types

use super::palette::{SYSTEM_BACKGROUND_INDEX, SYSTEM_FOREGROUND_INDEX};
use crate::error::{Error, Result};

/// Pattern fill of a cell
///
/// Colors are palette indices. A solid fill shows the foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fill {
    pub pattern: PatternType,
    pub foreground: u8,
    pub background: u8,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            pattern: PatternType::None,
            foreground: SYSTEM_FOREGROUND_INDEX as u8,
            background: SYSTEM_BACKGROUND_INDEX as u8,
        }
    }
}

impl Fill {
    /// Create a solid fill with the given palette color
    pub fn solid(color: u8) -> Self {
        Self {
            pattern: PatternType::Solid,
            foreground: color,
            ..Self::default()
        }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        self.pattern == PatternType::None
    }
}

/// Pattern fill types, numbered as style records store them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PatternType {
    /// No pattern
    #[default]
    None = 0,
    /// Solid (100% foreground)
    Solid = 1,
    /// 50% gray
    MediumGray = 2,
    /// 75% gray
    DarkGray = 3,
    /// 25% gray
    LightGray = 4,
    /// Horizontal stripe
    DarkHorizontal = 5,
    /// Vertical stripe
    DarkVertical = 6,
    /// Diagonal stripe (down)
    DarkDown = 7,
    /// Diagonal stripe (up)
    DarkUp = 8,
    /// Grid
    DarkGrid = 9,
    /// Trellis
    DarkTrellis = 10,
    /// Thin horizontal stripe
    LightHorizontal = 11,
    /// Thin vertical stripe
    LightVertical = 12,
    /// Thin diagonal stripe (down)
    LightDown = 13,
    /// Thin diagonal stripe (up)
    LightUp = 14,
    /// Thin grid
    LightGrid = 15,
    /// Thin trellis
    LightTrellis = 16,
    /// 12.5% gray
    Gray125 = 17,
    /// 6.25% gray
    Gray0625 = 18,
}

impl TryFrom<u8> for PatternType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        use PatternType::*;
        const PATTERNS: [PatternType; 19] = [
            None,
            Solid,
            MediumGray,
            DarkGray,
            LightGray,
            DarkHorizontal,
            DarkVertical,
            DarkDown,
            DarkUp,
            DarkGrid,
            DarkTrellis,
            LightHorizontal,
            LightVertical,
            LightDown,
            LightUp,
            LightGrid,
            LightTrellis,
            Gray125,
            Gray0625,
        ];
        PATTERNS
            .get(code as usize)
            .copied()
            .ok_or_else(|| Error::InvalidRecord(format!("fill pattern {code}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_fill_uses_system_colors() {
        let fill = Fill::default();
        assert!(fill.is_none());
        assert_eq!((fill.foreground, fill.background), (0x40, 0x41));
    }

    #[test]
    fn test_pattern_codes() {
        for code in 0..19 {
            assert_eq!(PatternType::try_from(code).unwrap() as u8, code);
        }
        assert!(PatternType::try_from(19).is_err());
        assert_eq!(Fill::solid(10).pattern, PatternType::Solid);
    }
}
