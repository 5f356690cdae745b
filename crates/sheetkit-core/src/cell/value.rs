//! Cell value types

use std::fmt;

use crate::format::FormatValue;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Numeric value (all numbers stored as f64, including dates)
    Number(f64),

    /// Text value
    Text(String),

    /// Boolean value (TRUE/FALSE)
    Bool(bool),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as number formats see it
    ///
    /// Numbers format as numbers; everything else formats as its text.
    /// Booleans keep their `TRUE`/`FALSE` text.
    pub fn format_value(&self) -> Option<FormatValue<'_>> {
        match self {
            CellValue::Empty | CellValue::Bool(_) => None,
            CellValue::Number(n) => Some(FormatValue::Number(*n)),
            CellValue::Text(s) => Some(FormatValue::Text(s)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from("x"), CellValue::text("x"));
        assert_eq!(CellValue::from(true), CellValue::Bool(true));
        assert_eq!(CellValue::from(true).as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Bool(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert!(CellValue::default().is_empty());
    }

    #[test]
    fn test_format_value() {
        assert!(matches!(
            CellValue::Number(2.5).format_value(),
            Some(FormatValue::Number(n)) if n == 2.5
        ));
        assert!(matches!(
            CellValue::text("abc").format_value(),
            Some(FormatValue::Text("abc"))
        ));
        assert!(CellValue::Bool(true).format_value().is_none());
    }
}
