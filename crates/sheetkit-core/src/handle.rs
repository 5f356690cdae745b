//! Format handles
//!
//! A [`FormatHandle`] edits the formatting shared by a group of owners: one
//! or more cells, or a row or column default. Every setter interns the
//! edited record in the workbook's [`StyleTable`], so owners outside the
//! group keep their formatting.

use crate::error::Result;
use crate::workbook::sheet_not_found;
use crate::worksheet::validate_cell_position;
use crate::style::{
    channel_index, hex_to_index_approx, rotation_from_degrees, BorderEdge, BorderLineStyle,
    BorderSide, Color, ColorChannel, FontRecord, HorizontalAlignment, PatternType, Referrer,
    SlotRef, StyleRecord, StyleTable, Underline, VerticalAlignment, BOLD_WEIGHT, MAX_INDENT,
    NORMAL_WEIGHT,
};

/// Mutable view of one formatting slot and the owners that share it
///
/// Obtained from [`Workbook::cell_format`](crate::Workbook::cell_format),
/// [`row_format`](crate::Workbook::row_format) or
/// [`column_format`](crate::Workbook::column_format). The handle always has
/// a backing slot: unformatted owners are bound before the handle is made.
#[derive(Debug)]
pub struct FormatHandle<'a> {
    styles: &'a mut StyleTable,
    sheet_count: usize,
    owners: Vec<Referrer>,
    slot: SlotRef,
    record: StyleRecord,
    font: FontRecord,
}

impl<'a> FormatHandle<'a> {
    /// `owner` must already be bound to `slot`
    pub(crate) fn new(
        styles: &'a mut StyleTable,
        sheet_count: usize,
        owner: Referrer,
        slot: SlotRef,
    ) -> Result<Self> {
        let record = styles.record(slot)?.clone();
        let font = styles.font(record.font)?.clone();
        Ok(Self {
            styles,
            sheet_count,
            owners: vec![owner],
            slot,
            record,
            font,
        })
    }

    /// Slot currently shared by the owners
    pub fn slot(&self) -> SlotRef {
        self.slot
    }

    pub fn record(&self) -> &StyleRecord {
        &self.record
    }

    pub fn font(&self) -> &FontRecord {
        &self.font
    }

    pub fn owners(&self) -> &[Referrer] {
        &self.owners
    }

    /// Give another cell this handle's formatting and include it in later
    /// edits
    pub fn add_cell(&mut self, sheet: usize, row: u32, col: u16) -> Result<()> {
        if sheet >= self.sheet_count {
            return Err(sheet_not_found(sheet));
        }
        validate_cell_position(row, col)?;
        let cell = Referrer::cell(sheet, row, col);
        self.styles.bind(cell, self.slot)?;
        if !self.owners.contains(&cell) {
            self.owners.push(cell);
        }
        Ok(())
    }

    // === Font ===

    pub fn set_bold(&mut self, bold: bool) -> Result<()> {
        self.edit_font(|font| font.weight = if bold { BOLD_WEIGHT } else { NORMAL_WEIGHT })
    }

    pub fn set_italic(&mut self, italic: bool) -> Result<()> {
        self.edit_font(|font| font.italic = italic)
    }

    pub fn set_underline(&mut self, underline: Underline) -> Result<()> {
        self.edit_font(|font| font.underline = underline)
    }

    pub fn set_strikeout(&mut self, strikeout: bool) -> Result<()> {
        self.edit_font(|font| font.strikeout = strikeout)
    }

    pub fn set_font_name(&mut self, name: &str) -> Result<()> {
        self.edit_font(|font| font.name = name.to_string())
    }

    /// Set the font height in twips (1/20 of a point)
    pub fn set_font_height(&mut self, height: u16) -> Result<()> {
        self.edit_font(|font| font.height = height)
    }

    /// Set the font color to the nearest palette entry
    pub fn set_font_color(&mut self, color: Color) -> Result<()> {
        let index = channel_index(color, ColorChannel::Font);
        self.edit_font(|font| font.color = index)
    }

    /// Set the font color from `#RRGGBB` text
    ///
    /// Malformed text resolves to palette index 0.
    pub fn set_font_color_hex(&mut self, hex: &str) -> Result<()> {
        let index = hex_to_index_approx(hex, ColorChannel::Font);
        self.edit_font(|font| font.color = index)
    }

    // === Fill ===

    pub fn set_fill_pattern(&mut self, pattern: PatternType) -> Result<()> {
        self.edit(|record| record.fill.pattern = pattern)
    }

    pub fn set_foreground_color(&mut self, color: Color) -> Result<()> {
        let index = palette_byte(color, ColorChannel::Foreground);
        self.edit(|record| record.fill.foreground = index)
    }

    pub fn set_background_color(&mut self, color: Color) -> Result<()> {
        let index = palette_byte(color, ColorChannel::Background);
        self.edit(|record| record.fill.background = index)
    }

    // === Borders ===

    pub fn set_border(&mut self, side: BorderSide, style: BorderLineStyle, color: Color) -> Result<()> {
        let edge = BorderEdge::new(style, palette_byte(color, ColorChannel::Border));
        self.edit(|record| record.set_border(side, edge))
    }

    // === Alignment ===

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) -> Result<()> {
        self.edit(|record| record.horizontal = alignment)
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) -> Result<()> {
        self.edit(|record| record.vertical = alignment)
    }

    pub fn set_wrap_text(&mut self, wrap: bool) -> Result<()> {
        self.edit(|record| record.wrap_text = wrap)
    }

    pub fn set_shrink_to_fit(&mut self, shrink: bool) -> Result<()> {
        self.edit(|record| record.shrink_to_fit = shrink)
    }

    /// Set the text rotation in degrees, -90 to 90
    pub fn set_rotation(&mut self, degrees: i16) -> Result<()> {
        let rotation = rotation_from_degrees(degrees);
        self.edit(|record| record.rotation = rotation)
    }

    /// Set the indent level; levels above 15 are clamped
    pub fn set_indent(&mut self, indent: u8) -> Result<()> {
        self.edit(|record| record.indent = indent.min(MAX_INDENT))
    }

    // === Number format ===

    /// Set the number format pattern, registering it if it is not built in
    pub fn set_number_format(&mut self, pattern: &str) -> Result<()> {
        let id = self.styles.number_format_id(pattern)?;
        self.edit(|record| record.number_format = id)
    }

    /// Pattern of the current number format
    pub fn number_format(&self) -> &str {
        self.styles
            .number_format_pattern(self.record.number_format)
            .unwrap_or("General")
    }

    // === Protection ===

    pub fn set_locked(&mut self, locked: bool) -> Result<()> {
        self.edit(|record| record.locked = locked)
    }

    pub fn set_formula_hidden(&mut self, hidden: bool) -> Result<()> {
        self.edit(|record| record.formula_hidden = hidden)
    }

    fn edit<F: FnOnce(&mut StyleRecord)>(&mut self, edit: F) -> Result<()> {
        self.mutate(|record, _| edit(record))
    }

    fn edit_font<F: FnOnce(&mut FontRecord)>(&mut self, edit: F) -> Result<()> {
        self.mutate(|_, font| edit(font))
    }

    fn mutate<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut StyleRecord, &mut FontRecord),
    {
        let old = self.slot;
        let weight = self.owners.len() as u32;
        let new = self.styles.apply(old, weight, edit)?;
        if new != old {
            self.styles.propagate_to_referrers(old, new, &self.owners)?;
            self.slot = new;
        }
        self.record = self.styles.record(new)?.clone();
        self.font = self.styles.font(self.record.font)?.clone();
        Ok(())
    }
}

fn palette_byte(color: Color, channel: ColorChannel) -> u8 {
    channel_index(color, channel) as u8
}
