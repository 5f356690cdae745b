//! Prelude module - common imports for sheetkit users
//!
//! ```rust
//! use sheetkit::prelude::*;
//! ```

pub use crate::{
    // Style types
    BorderLineStyle,
    BorderSide,
    // Addressing
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    Color,
    ColorChannel,
    // Error types
    Error,
    FormatHandle,
    FormatValue,
    HorizontalAlignment,
    Notation,
    PatternType,
    Result,
    Underline,
    VerticalAlignment,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,
};
