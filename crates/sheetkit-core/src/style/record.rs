//! Extended format (XF) records
//!
//! A [`StyleRecord`] is everything a cell's formatting slot holds apart from
//! the font itself. Its 20-byte serialization is also its identity: two
//! records are interchangeable exactly when [`StyleRecord::to_bytes`] agrees.

use std::fmt;

use super::alignment::{HorizontalAlignment, ReadingOrder, VerticalAlignment};
use super::border::{BorderEdge, BorderLineStyle, BorderSide};
use super::fill::{Fill, PatternType};
use super::font::FontRef;
use crate::error::{Error, Result};

/// Length of a serialized style record
pub const STYLE_RECORD_LEN: usize = 20;

/// Parent index stored in style XFs, which have no parent
pub const NO_PARENT: u16 = 0x0FFF;

/// Index of a slot in the style table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRef(pub u16);

impl SlotRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a record formats cells or defines a named style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XfKind {
    #[default]
    Cell,
    Style,
}

/// The full attribute set of one formatting slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleRecord {
    pub font: FontRef,
    pub number_format: u16,
    pub locked: bool,
    pub formula_hidden: bool,
    pub kind: XfKind,
    /// Text was entered with a leading apostrophe
    pub quote_prefix: bool,
    /// Style XF this record inherits from (12 bits)
    pub parent: u16,
    pub horizontal: HorizontalAlignment,
    pub wrap_text: bool,
    pub vertical: VerticalAlignment,
    /// Justify the last line of distributed text
    pub justify_last: bool,
    pub rotation: u8,
    /// 0-15
    pub indent: u8,
    pub shrink_to_fit: bool,
    pub reading_order: ReadingOrder,
    /// Used-attribute flags, bits 2-7
    pub used_attributes: u8,
    pub left: BorderEdge,
    pub right: BorderEdge,
    pub top: BorderEdge,
    pub bottom: BorderEdge,
    /// Line shared by both diagonals
    pub diagonal: BorderEdge,
    pub diagonal_down: bool,
    pub diagonal_up: bool,
    pub fill: Fill,
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self::cell()
    }
}

impl StyleRecord {
    /// A plain cell record: font 0, `General`, locked, parented to style 0
    pub fn cell() -> Self {
        Self {
            font: FontRef(0),
            number_format: 0,
            locked: true,
            formula_hidden: false,
            kind: XfKind::Cell,
            quote_prefix: false,
            parent: 0,
            horizontal: HorizontalAlignment::General,
            wrap_text: false,
            vertical: VerticalAlignment::Bottom,
            justify_last: false,
            rotation: 0,
            indent: 0,
            shrink_to_fit: false,
            reading_order: ReadingOrder::ContextDependent,
            used_attributes: 0,
            left: BorderEdge::default(),
            right: BorderEdge::default(),
            top: BorderEdge::default(),
            bottom: BorderEdge::default(),
            diagonal: BorderEdge::default(),
            diagonal_down: false,
            diagonal_up: false,
            fill: Fill::default(),
        }
    }

    /// A named-style record with no parent
    pub fn style() -> Self {
        Self {
            kind: XfKind::Style,
            parent: NO_PARENT,
            ..Self::cell()
        }
    }

    pub fn with_font(mut self, font: FontRef) -> Self {
        self.font = font;
        self
    }

    pub fn with_number_format(mut self, id: u16) -> Self {
        self.number_format = id;
        self
    }

    pub fn with_used_attributes(mut self, flags: u8) -> Self {
        self.used_attributes = flags;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_border(mut self, side: BorderSide, edge: BorderEdge) -> Self {
        self.set_border(side, edge);
        self
    }

    /// Border drawn on `side`
    ///
    /// A diagonal that is not switched on reads as no border.
    pub fn border(&self, side: BorderSide) -> BorderEdge {
        match side {
            BorderSide::Left => self.left,
            BorderSide::Right => self.right,
            BorderSide::Top => self.top,
            BorderSide::Bottom => self.bottom,
            BorderSide::DiagonalDown if self.diagonal_down => self.diagonal,
            BorderSide::DiagonalUp if self.diagonal_up => self.diagonal,
            BorderSide::DiagonalDown | BorderSide::DiagonalUp => BorderEdge::default(),
        }
    }

    /// Set the border on `side`
    ///
    /// Both diagonals share one line; setting either replaces it, and a
    /// `None` line switches that diagonal off.
    pub fn set_border(&mut self, side: BorderSide, edge: BorderEdge) {
        match side {
            BorderSide::Left => self.left = edge,
            BorderSide::Right => self.right = edge,
            BorderSide::Top => self.top = edge,
            BorderSide::Bottom => self.bottom = edge,
            BorderSide::DiagonalDown | BorderSide::DiagonalUp => {
                let on = !edge.is_none();
                if side == BorderSide::DiagonalDown {
                    self.diagonal_down = on;
                } else {
                    self.diagonal_up = on;
                }
                if on || !(self.diagonal_down || self.diagonal_up) {
                    self.diagonal = edge;
                }
            }
        }
    }

    /// Serialize as an XF record body
    pub fn to_bytes(&self) -> [u8; STYLE_RECORD_LEN] {
        let mut out = [0u8; STYLE_RECORD_LEN];
        out[0..2].copy_from_slice(&self.font.0.to_le_bytes());
        out[2..4].copy_from_slice(&self.number_format.to_le_bytes());

        let mut protection = (self.parent & NO_PARENT) << 4;
        if self.locked {
            protection |= 0x0001;
        }
        if self.formula_hidden {
            protection |= 0x0002;
        }
        if self.kind == XfKind::Style {
            protection |= 0x0004;
        }
        if self.quote_prefix {
            protection |= 0x0008;
        }
        out[4..6].copy_from_slice(&protection.to_le_bytes());

        out[6] = (self.horizontal as u8 & 0x07)
            | (u8::from(self.wrap_text) << 3)
            | ((self.vertical as u8 & 0x07) << 4)
            | (u8::from(self.justify_last) << 7);
        out[7] = self.rotation;
        out[8] = (self.indent & 0x0F)
            | (u8::from(self.shrink_to_fit) << 4)
            | ((self.reading_order as u8 & 0x03) << 6);
        out[9] = self.used_attributes & 0xFC;

        let border1 = u32::from(self.left.style as u8 & 0x0F)
            | u32::from(self.right.style as u8 & 0x0F) << 4
            | u32::from(self.top.style as u8 & 0x0F) << 8
            | u32::from(self.bottom.style as u8 & 0x0F) << 12
            | u32::from(self.left.color & 0x7F) << 16
            | u32::from(self.right.color & 0x7F) << 23
            | u32::from(self.diagonal_down) << 30
            | u32::from(self.diagonal_up) << 31;
        out[10..14].copy_from_slice(&border1.to_le_bytes());

        let border2 = u32::from(self.top.color & 0x7F)
            | u32::from(self.bottom.color & 0x7F) << 7
            | u32::from(self.diagonal.color & 0x7F) << 14
            | u32::from(self.diagonal.style as u8 & 0x0F) << 21
            | u32::from(self.fill.pattern as u8 & 0x3F) << 26;
        out[14..18].copy_from_slice(&border2.to_le_bytes());

        let colors = u16::from(self.fill.foreground & 0x7F) | u16::from(self.fill.background & 0x7F) << 7;
        out[18..20].copy_from_slice(&colors.to_le_bytes());
        out
    }

    /// Parse an XF record body
    ///
    /// Reserved bits are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != STYLE_RECORD_LEN {
            return Err(Error::InvalidRecord(format!(
                "style record of {} bytes (expected {STYLE_RECORD_LEN})",
                bytes.len()
            )));
        }
        let u16_at = |pos: usize| u16::from_le_bytes([bytes[pos], bytes[pos + 1]]);
        let u32_at =
            |pos: usize| u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]]);
        let line = |bits: u32| BorderLineStyle::try_from((bits & 0x0F) as u8);
        let color = |bits: u32| (bits & 0x7F) as u8;

        let protection = u16_at(4);
        let align = bytes[6];
        let indent = bytes[8];
        let border1 = u32_at(10);
        let border2 = u32_at(14);
        let colors = u32::from(u16_at(18));

        Ok(Self {
            font: FontRef(u16_at(0)),
            number_format: u16_at(2),
            locked: protection & 0x0001 != 0,
            formula_hidden: protection & 0x0002 != 0,
            kind: if protection & 0x0004 != 0 {
                XfKind::Style
            } else {
                XfKind::Cell
            },
            quote_prefix: protection & 0x0008 != 0,
            parent: protection >> 4,
            horizontal: HorizontalAlignment::try_from(align & 0x07)?,
            wrap_text: align & 0x08 != 0,
            vertical: VerticalAlignment::try_from((align >> 4) & 0x07)?,
            justify_last: align & 0x80 != 0,
            rotation: bytes[7],
            indent: indent & 0x0F,
            shrink_to_fit: indent & 0x10 != 0,
            reading_order: ReadingOrder::try_from((indent >> 6) & 0x03)?,
            used_attributes: bytes[9] & 0xFC,
            left: BorderEdge::new(line(border1)?, color(border1 >> 16)),
            right: BorderEdge::new(line(border1 >> 4)?, color(border1 >> 23)),
            top: BorderEdge::new(line(border1 >> 8)?, color(border2)),
            bottom: BorderEdge::new(line(border1 >> 12)?, color(border2 >> 7)),
            diagonal: BorderEdge::new(line(border2 >> 21)?, color(border2 >> 14)),
            diagonal_down: border1 & (1 << 30) != 0,
            diagonal_up: border1 & (1 << 31) != 0,
            fill: Fill {
                pattern: PatternType::try_from(((border2 >> 26) & 0x3F) as u8)?,
                foreground: color(colors),
                background: color(colors >> 7),
            },
        })
    }
}
