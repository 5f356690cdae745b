//! Cell addressing and values
//!
//! This module contains:
//! - column letter conversion ([`column_to_letters`], [`letters_to_column`])
//! - [`CellAddress`] and [`CellRange`], with A1/R1C1 parsing and formatting
//! - sheet qualifier stripping ([`strip_sheet_qualifiers`])
//! - [`CellValue`] - The value stored in a cell

mod address;
mod column;
mod qualifier;
mod range;
mod value;

pub use address::{format_address, format_address_r1c1, CellAddress, WHOLE};
pub use column::{column_to_letters, letters_to_column, MAX_COLUMN_LETTERS};
pub use qualifier::{strip_sheet_qualifiers, SheetQualifiers};
pub use range::{
    format_range, is_after_range, is_before_range, is_in_range, range_contains,
    range_coordinates, ranges_intersect, CellRange, CellRangeIterator, RangeCoordinates,
};
pub use value::CellValue;
