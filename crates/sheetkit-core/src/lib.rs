//! # sheetkit-core
//!
//! Core data structures for the sheetkit spreadsheet library.
//!
//! This crate provides:
//! - [`CellAddress`] and [`CellRange`] - A1/R1C1 addressing and column letters
//! - [`format`] - display text for numbers, dates and text under number formats
//! - [`style`] - colors, fonts and the hash-consed [`StyleTable`]
//! - [`Workbook`], [`Worksheet`] and [`FormatHandle`] - the document model
//!
//! ## Example
//!
//! ```rust
//! use sheetkit_core::{Color, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_value("A1", 0.5).unwrap();
//!
//! let mut format = workbook.cell_format(0, "A1").unwrap();
//! format.set_bold(true).unwrap();
//! format.set_font_color(Color::RED).unwrap();
//! format.set_number_format("0%").unwrap();
//!
//! assert_eq!(workbook.display_text(0, "A1").unwrap(), "50%");
//! ```

pub mod cell;
pub mod error;
pub mod format;
pub mod handle;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    column_to_letters, letters_to_column, strip_sheet_qualifiers, CellAddress, CellRange,
    CellValue,
};
pub use error::{Error, Result};
pub use format::{
    format_notation, render_general, render_with_pattern, validate_pattern, FormatValue,
    Notation,
};
pub use handle::FormatHandle;
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::Worksheet;

// Re-export the style types most callers need
pub use style::{
    BorderLineStyle, BorderSide, Color, ColorChannel, FontRecord, HorizontalAlignment,
    PatternType, Referrer, SlotRef, StyleRecord, StyleTable, StyleTableConfig, Underline,
    VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
