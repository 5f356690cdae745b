//! # sheetkit
//!
//! Spreadsheet cell addressing, number-format rendering and BIFF8 style
//! interning.
//!
//! ## Features
//!
//! - A1 and R1C1 address parsing, with sheet and 3-D qualifiers
//! - `General` and pattern-based number rendering, dates included
//! - Nearest and exact palette lookup for colors
//! - A copy-on-write style table that shares identical formats between cells
//!
//! ## Example
//!
//! ```rust
//! use sheetkit::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_value("A1", 1234.5).unwrap();
//! sheet.set_value("A2", 1234.5).unwrap();
//!
//! workbook
//!     .cell_format(0, "A1")
//!     .unwrap()
//!     .set_number_format("#,##0.00")
//!     .unwrap();
//!
//! assert_eq!(workbook.display_text(0, "A1").unwrap(), "1,234.50");
//! assert_eq!(workbook.display_text(0, "A2").unwrap(), "1234.5");
//! ```

pub mod prelude;

// Module access for the less common items
pub use sheetkit_core::{cell, format, style};

// Re-export core types
pub use sheetkit_core::{
    // Addressing
    column_to_letters,
    letters_to_column,
    strip_sheet_qualifiers,
    CellAddress,
    CellRange,

    // Cell values
    CellValue,

    // Error types
    Error,
    Result,

    // Rendering
    format_notation,
    render_general,
    render_with_pattern,
    validate_pattern,
    FormatValue,
    Notation,

    // Style types
    BorderLineStyle,
    BorderSide,
    Color,
    ColorChannel,
    FontRecord,
    HorizontalAlignment,
    PatternType,
    Referrer,
    SlotRef,
    StyleRecord,
    StyleTable,
    StyleTableConfig,
    Underline,
    VerticalAlignment,

    // Main types
    FormatHandle,
    Workbook,
    WorkbookSettings,
    Worksheet,

    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

pub use sheetkit_core::style::{
    color_to_index, hex_to_index_approx, hex_to_index_exact, index_to_color,
    resolve_special_index,
};
