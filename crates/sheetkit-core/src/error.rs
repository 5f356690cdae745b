//! Error types for sheetkit-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetkit-core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed single-cell address text
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Malformed range text
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Column letters longer than three characters, or an index past XFD
    #[error("Unsupported column: {0}")]
    UnsupportedColumn(String),

    /// No free style slot left for an allocation
    #[error("Style table exhausted ({capacity} slots)")]
    StyleTableExhausted { capacity: usize },

    /// No free font slot left for an allocation
    #[error("Font table exhausted ({capacity} slots)")]
    FontTableExhausted { capacity: usize },

    /// No palette entry matches the color exactly
    #[error("No palette entry for color {0}")]
    ColorNotFound(String),

    /// Unknown style or font slot
    #[error("Invalid style index: {0}")]
    InvalidStyleIndex(u32),

    /// Raw record bytes that cannot be decoded
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Number format pattern rejected by validation
    #[error("Invalid number format: {0}")]
    InvalidNumberFormat(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
