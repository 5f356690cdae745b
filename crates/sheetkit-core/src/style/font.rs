//! Font records

use std::fmt;

use super::palette::AUTOMATIC_FONT_INDEX;
use crate::error::{Error, Result};

/// Default font face
pub const DEFAULT_FONT_NAME: &str = "Arial";
/// Default height in twips (10pt)
pub const DEFAULT_FONT_HEIGHT: u16 = 200;
/// Weight of regular text
pub const NORMAL_WEIGHT: u16 = 400;
/// Weight of bold text
pub const BOLD_WEIGHT: u16 = 700;
/// Longest name a font record can hold, in UTF-16 units
pub const MAX_FONT_NAME_LEN: usize = 255;

/// Fixed part of a FONT record, before the name
const FIXED_LEN: usize = 14;

const ITALIC: u16 = 0x0002;
const STRIKEOUT: u16 = 0x0008;
const OUTLINE: u16 = 0x0010;
const SHADOW: u16 = 0x0020;

/// Font attributes as stored in a FONT record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontRecord {
    /// Height in twips (1/20 of a point)
    pub height: u16,
    pub italic: bool,
    pub strikeout: bool,
    pub outline: bool,
    pub shadow: bool,
    /// Palette index; 0x7FFF is automatic
    pub color: u16,
    /// 100-1000, 400 regular, 700 bold
    pub weight: u16,
    pub script: Script,
    pub underline: Underline,
    pub family: u8,
    pub charset: u8,
    /// Font family name (e.g., "Arial")
    pub name: String,
}

impl Default for FontRecord {
    fn default() -> Self {
        Self {
            height: DEFAULT_FONT_HEIGHT,
            italic: false,
            strikeout: false,
            outline: false,
            shadow: false,
            color: AUTOMATIC_FONT_INDEX,
            weight: NORMAL_WEIGHT,
            script: Script::None,
            underline: Underline::None,
            family: 0,
            charset: 0,
            name: DEFAULT_FONT_NAME.to_string(),
        }
    }
}

impl FontRecord {
    /// Create a new default font
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set height in twips
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.weight = if bold { BOLD_WEIGHT } else { NORMAL_WEIGHT };
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    /// Set strikeout
    pub fn with_strikeout(mut self, strikeout: bool) -> Self {
        self.strikeout = strikeout;
        self
    }

    /// Set palette color
    pub fn with_color(mut self, color: u16) -> Self {
        self.color = color;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= BOLD_WEIGHT
    }

    /// Height in points
    pub fn size(&self) -> f64 {
        self.height as f64 / 20.0
    }

    /// Serialize as a FONT record body
    ///
    /// The bytes double as the font's identity when fonts are deduplicated.
    /// Names longer than [`MAX_FONT_NAME_LEN`] are cut.
    pub fn to_bytes(&self) -> Vec<u8> {
        let units: Vec<u16> = self.name.encode_utf16().take(MAX_FONT_NAME_LEN).collect();
        let wide = units.iter().any(|&u| u > 0xFF);

        let mut out = Vec::with_capacity(FIXED_LEN + 2 + units.len() * 2);
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.flags().to_le_bytes());
        out.extend_from_slice(&self.color.to_le_bytes());
        out.extend_from_slice(&self.weight.to_le_bytes());
        out.extend_from_slice(&(self.script as u16).to_le_bytes());
        out.push(self.underline as u8);
        out.push(self.family);
        out.push(self.charset);
        out.push(0);

        out.push(units.len() as u8);
        out.push(wide as u8);
        for unit in units {
            if wide {
                out.extend_from_slice(&unit.to_le_bytes());
            } else {
                out.push(unit as u8);
            }
        }
        out
    }

    /// Parse a FONT record body
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FIXED_LEN + 2 {
            return Err(Error::InvalidRecord(format!(
                "font record of {} bytes",
                bytes.len()
            )));
        }
        let u16_at = |pos: usize| u16::from_le_bytes([bytes[pos], bytes[pos + 1]]);
        let flags = u16_at(2);

        let len = bytes[FIXED_LEN] as usize;
        let wide = bytes[FIXED_LEN + 1] & 0x01 != 0;
        let name_bytes = &bytes[FIXED_LEN + 2..];
        let needed = if wide { len * 2 } else { len };
        if name_bytes.len() < needed {
            return Err(Error::InvalidRecord(format!(
                "font name needs {needed} bytes, found {}",
                name_bytes.len()
            )));
        }
        let name = if wide {
            let units: Vec<u16> = name_bytes[..needed]
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16(&units)
                .map_err(|e| Error::InvalidRecord(format!("font name: {e}")))?
        } else {
            name_bytes[..needed].iter().map(|&b| b as char).collect()
        };

        Ok(Self {
            height: u16_at(0),
            italic: flags & ITALIC != 0,
            strikeout: flags & STRIKEOUT != 0,
            outline: flags & OUTLINE != 0,
            shadow: flags & SHADOW != 0,
            color: u16_at(4),
            weight: u16_at(6),
            script: Script::try_from(u16_at(8))?,
            underline: Underline::try_from(bytes[10])?,
            family: bytes[11],
            charset: bytes[12],
            name,
        })
    }

    fn flags(&self) -> u16 {
        let mut flags = 0;
        for (set, bit) in [
            (self.italic, ITALIC),
            (self.strikeout, STRIKEOUT),
            (self.outline, OUTLINE),
            (self.shadow, SHADOW),
        ] {
            if set {
                flags |= bit;
            }
        }
        flags
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Underline {
    /// No underline
    #[default]
    None = 0x00,
    /// Single underline
    Single = 0x01,
    /// Double underline
    Double = 0x02,
    /// Single accounting underline (extends to cell width)
    SingleAccounting = 0x21,
    /// Double accounting underline
    DoubleAccounting = 0x22,
}

impl TryFrom<u8> for Underline {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Ok(match code {
            0x00 => Self::None,
            0x01 => Self::Single,
            0x02 => Self::Double,
            0x21 => Self::SingleAccounting,
            0x22 => Self::DoubleAccounting,
            _ => return Err(Error::InvalidRecord(format!("underline code {code:#04x}"))),
        })
    }
}

/// Superscript/subscript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Script {
    /// Normal baseline
    #[default]
    None = 0,
    Superscript = 1,
    Subscript = 2,
}

impl TryFrom<u16> for Script {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        Ok(match code {
            0 => Self::None,
            1 => Self::Superscript,
            2 => Self::Subscript,
            _ => return Err(Error::InvalidRecord(format!("script code {code}"))),
        })
    }
}

/// Reference from a style record to a font
///
/// Font references skip 4: the first four fonts are 0-3, the fifth font is
/// referenced as 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontRef(pub u16);

impl FontRef {
    /// The reference number that is never assigned
    pub const SKIPPED: u16 = 4;

    /// Reference for the font at `position` in the font list
    pub fn from_position(position: usize) -> Self {
        if position < Self::SKIPPED as usize {
            FontRef(position as u16)
        } else {
            FontRef(position as u16 + 1)
        }
    }

    /// Position in the font list, `None` for the skipped reference
    pub fn position(self) -> Option<usize> {
        match self.0 {
            n if n < Self::SKIPPED => Some(n as usize),
            Self::SKIPPED => None,
            n => Some(n as usize - 1),
        }
    }
}

impl fmt::Display for FontRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_font() {
        let font = FontRecord::default();
        assert_eq!(font.name, "Arial");
        assert_eq!(font.size(), 10.0);
        assert!(!font.is_bold());
        assert!(font.clone().with_bold(true).is_bold());
    }

    #[test]
    fn test_bytes_layout() {
        let font = FontRecord::new()
            .with_italic(true)
            .with_underline(Underline::SingleAccounting)
            .with_color(10);
        let bytes = font.to_bytes();
        assert_eq!(bytes.len(), 16 + 5);
        assert_eq!(&bytes[0..2], &[200, 0]);
        assert_eq!(&bytes[2..4], &[0x02, 0]);
        assert_eq!(&bytes[4..6], &[10, 0]);
        assert_eq!(&bytes[6..8], &[0x90, 0x01]);
        assert_eq!(bytes[10], 0x21);
        assert_eq!(&bytes[14..16], &[5, 0]);
        assert_eq!(&bytes[16..], b"Arial");
    }

    #[test]
    fn test_from_bytes() {
        let font = FontRecord::new()
            .with_name("Meiryo 游ゴシック")
            .with_strikeout(true)
            .with_height(280);
        assert_eq!(FontRecord::from_bytes(&font.to_bytes()).unwrap(), font);

        assert!(FontRecord::from_bytes(&[0; 10]).is_err());
        let mut bad = FontRecord::new().to_bytes();
        bad[10] = 0x03;
        assert!(FontRecord::from_bytes(&bad).is_err());
    }

    #[test]
    fn test_font_ref_skips_four() {
        assert_eq!(FontRef::from_position(3), FontRef(3));
        assert_eq!(FontRef::from_position(4), FontRef(5));
        assert_eq!(FontRef(5).position(), Some(4));
        assert_eq!(FontRef(4).position(), None);
        assert_eq!(FontRef(0).position(), Some(0));
    }
}
