//! Cell styling
//!
//! This module contains:
//! - [`StyleRecord`] and [`FontRecord`] - the attribute sets of a formatting
//!   slot and of a font, with their binary record forms
//! - [`StyleTable`] - the hash-consed, copy-on-write slot table a workbook owns
//! - [`Color`] and the palette functions that map colors to palette indices
//! - [`NumberFormats`] - built-in and custom number format ids

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod palette;
mod record;
mod referrer;
mod table;

pub use alignment::{
    rotation_from_degrees, HorizontalAlignment, ReadingOrder, VerticalAlignment, MAX_INDENT,
    STACKED_ROTATION,
};
pub use border::{BorderEdge, BorderLineStyle, BorderSide};
pub use color::Color;
pub use fill::{Fill, PatternType};
pub use font::{
    FontRecord, FontRef, Script, Underline, BOLD_WEIGHT, DEFAULT_FONT_HEIGHT, DEFAULT_FONT_NAME,
    MAX_FONT_NAME_LEN, NORMAL_WEIGHT,
};
pub use number_format::NumberFormats;
pub use palette::{
    channel_index, color_name, color_to_index, hex_to_index_approx, hex_to_index_exact, index_to_color,
    resolve_special_index, ColorChannel, AUTOMATIC_FONT_INDEX, PALETTE_SIZE,
    SYSTEM_BACKGROUND_INDEX, SYSTEM_FOREGROUND_INDEX, WHITE_FONT_INDEX,
};
pub use record::{SlotRef, StyleRecord, XfKind, NO_PARENT, STYLE_RECORD_LEN};
pub use referrer::{Referrer, ReferrerIndex};
pub use table::{StyleTable, StyleTableConfig, DEFAULT_CELL_SLOT};
