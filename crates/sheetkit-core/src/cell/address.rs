//! Cell address parsing and formatting

use super::column::{column_to_letters, letters_to_column};
use super::qualifier::strip_sheet_qualifiers;
use crate::error::{Error, Result};
use crate::MAX_ROWS;
use lazy_regex::regex_captures;
use std::fmt;
use std::str::FromStr;

/// Coordinate value marking a whole-row or whole-column reference
pub const WHOLE: i32 = -1;

/// A cell address (e.g., "A1", "$B$2", "Sheet1!C3", "R7C3")
///
/// Rows and columns are 0-based. A row of [`WHOLE`] marks a whole-column
/// reference ("C" or "C:C"), a column of [`WHOLE`] marks a whole-row
/// reference ("5" or "5:5").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: i32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: i32,
    /// Whether the row reference is absolute ($)
    pub row_absolute: bool,
    /// Whether the column reference is absolute ($)
    pub col_absolute: bool,
    /// Qualifying sheet name
    pub sheet: Option<String>,
    /// Last sheet of a 3-D qualifier ("Sheet1:Sheet3!A1")
    pub sheet2: Option<String>,
}

impl CellAddress {
    /// Create a new cell address with relative references
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            row_absolute: false,
            col_absolute: false,
            sheet: None,
            sheet2: None,
        }
    }

    /// Create a new cell address with specified absolute/relative flags
    pub fn with_absolute(row: i32, col: i32, row_absolute: bool, col_absolute: bool) -> Self {
        Self {
            row_absolute,
            col_absolute,
            ..Self::new(row, col)
        }
    }

    /// Create an absolute cell address ($A$1 style)
    pub fn absolute(row: i32, col: i32) -> Self {
        Self::with_absolute(row, col, true, true)
    }

    /// A reference to every cell of a column
    pub fn whole_column(col: i32) -> Self {
        Self::new(WHOLE, col)
    }

    /// A reference to every cell of a row
    pub fn whole_row(row: i32) -> Self {
        Self::new(row, WHOLE)
    }

    /// Attach a sheet qualifier
    pub fn on_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// True for references like "C" that name a column without a row
    pub fn is_whole_column(&self) -> bool {
        self.row == WHOLE
    }

    /// True for references like "5" that name a row without a column
    pub fn is_whole_row(&self) -> bool {
        self.col == WHOLE
    }

    /// Row and column as a pair
    pub fn coordinates(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    /// Parse a single cell address in A1 or R1C1 form
    ///
    /// Sheet qualifiers are stripped and kept on the returned address.
    /// Ranges are rejected; use [`super::CellRange::parse`] for those.
    ///
    /// # Examples
    /// ```
    /// use sheetkit_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("$B$5").unwrap();
    /// assert_eq!((addr.row, addr.col), (4, 1));
    /// assert!(addr.row_absolute && addr.col_absolute);
    ///
    /// // R1C1 form names the same cell
    /// let r1c1 = CellAddress::parse("R5C2").unwrap();
    /// assert_eq!(r1c1.coordinates(), addr.coordinates());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.contains('!') {
            let q = strip_sheet_qualifiers(text);
            let mut addr = parse_unqualified(&q.body)?;
            addr.sheet = q.sheet1;
            addr.sheet2 = q.sheet2;
            return Ok(addr);
        }
        parse_unqualified(text)
    }

    /// Format as A1-style string, without any sheet qualifier
    pub fn to_a1_string(&self) -> Result<String> {
        format_address(self.row, self.col, !self.row_absolute, !self.col_absolute)
    }

    /// Format as R1C1-style string, without any sheet qualifier
    pub fn to_r1c1_string(&self) -> String {
        format_address_r1c1(self.row, self.col)
    }

    pub(crate) fn qualifier_prefix(&self) -> String {
        match (&self.sheet, &self.sheet2) {
            (Some(s1), Some(s2)) => format!("{}:{}!", s1, s2),
            (Some(s1), None) => format!("{}!", s1),
            (None, Some(s2)) => format!("{}!", s2),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.to_a1_string().map_err(|_| fmt::Error)?;
        write!(f, "{}{}", self.qualifier_prefix(), body)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_unqualified(text: &str) -> Result<CellAddress> {
    if text.is_empty() {
        return Err(Error::InvalidAddress("empty address".into()));
    }
    if text.contains(':') {
        return Err(Error::InvalidAddress(format!(
            "'{}' is a range, not a single cell",
            text
        )));
    }

    if let Some((_, row, col)) = regex_captures!(r"^\$?[Rr](\d+)[Cc](\d+)$", text) {
        return parse_r1c1(text, row, col);
    }

    let Some((_, col_mark, letters, row_mark, digits)) =
        regex_captures!(r"^(\$?)([A-Za-z]*)(\$?)([0-9]*)$", text)
    else {
        return Err(Error::InvalidAddress(format!(
            "'{}' is not an A1 or R1C1 address",
            text
        )));
    };

    if letters.is_empty() && digits.is_empty() {
        return Err(Error::InvalidAddress(format!("no coordinates in '{}'", text)));
    }

    let col = if letters.is_empty() {
        WHOLE
    } else {
        letters_to_column(letters)? as i32
    };

    let row = if digits.is_empty() {
        WHOLE
    } else {
        parse_row(text, digits)?
    };

    // "$5" names an absolute row; the marker lands in the first group.
    let (col_absolute, row_absolute) = if letters.is_empty() {
        (false, !col_mark.is_empty() || !row_mark.is_empty())
    } else {
        (!col_mark.is_empty(), !row_mark.is_empty())
    };

    Ok(CellAddress::with_absolute(row, col, row_absolute, col_absolute))
}

fn parse_row(text: &str, digits: &str) -> Result<i32> {
    let row: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", text)))?;
    if row < 1 {
        return Err(Error::InvalidAddress(format!(
            "row number must be >= 1 in '{}'",
            text
        )));
    }
    if row > MAX_ROWS {
        return Err(Error::InvalidAddress(format!(
            "row number {} exceeds {} in '{}'",
            row, MAX_ROWS, text
        )));
    }
    Ok(row as i32 - 1)
}

// R1C1 numbers are 1-based in both parts, so "R5C2" and "B5" name the same
// internal coordinates.
fn parse_r1c1(text: &str, row: &str, col: &str) -> Result<CellAddress> {
    let row = parse_row(text, row)?;
    let col: u32 = col
        .parse()
        .map_err(|_| Error::InvalidAddress(format!("invalid R1C1 column in '{}'", text)))?;
    if col < 1 {
        return Err(Error::InvalidAddress(format!(
            "column number must be >= 1 in '{}'",
            text
        )));
    }
    if col > crate::MAX_COLS as u32 {
        return Err(Error::UnsupportedColumn(format!(
            "column {} in '{}' is past the last column",
            col, text
        )));
    }
    Ok(CellAddress::absolute(row, col as i32 - 1))
}

/// Format a 0-based row/column pair in A1 form
///
/// A `$` marker precedes the column when `relative_col` is false and the row
/// when `relative_row` is false. A [`WHOLE`] coordinate is left out together
/// with its marker.
///
/// ```
/// use sheetkit_core::cell::format_address;
///
/// assert_eq!(format_address(4, 1, false, false).unwrap(), "$B$5");
/// assert_eq!(format_address(-1, 2, true, true).unwrap(), "C");
/// ```
pub fn format_address(row: i32, col: i32, relative_row: bool, relative_col: bool) -> Result<String> {
    let mut out = String::with_capacity(10);
    if col > WHOLE {
        let col = u16::try_from(col)
            .map_err(|_| Error::UnsupportedColumn(format!("column index {}", col)))?;
        if !relative_col {
            out.push('$');
        }
        out.push_str(&column_to_letters(col)?);
    }
    if row > WHOLE {
        if !relative_row {
            out.push('$');
        }
        out.push_str(&(row as i64 + 1).to_string());
    }
    Ok(out)
}

/// Format a 0-based row/column pair in R1C1 form
pub fn format_address_r1c1(row: i32, col: i32) -> String {
    let mut out = String::new();
    if row > WHOLE {
        out.push_str(&format!("R{}", row as i64 + 1));
    }
    if col > WHOLE {
        out.push_str(&format!("C{}", col as i64 + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_a1() {
        let addr = CellAddress::parse("A1").unwrap();
        assert_eq!(addr.coordinates(), (0, 0));
        assert!(!addr.row_absolute);
        assert!(!addr.col_absolute);

        let addr = CellAddress::parse("c7").unwrap();
        assert_eq!(addr.coordinates(), (6, 2));

        let addr = CellAddress::parse("XFD1048576").unwrap();
        assert_eq!(addr.coordinates(), (1_048_575, 16_383));
    }

    #[test]
    fn test_parse_absolute_markers() {
        let addr = CellAddress::parse("$B$5").unwrap();
        assert_eq!(addr.coordinates(), (4, 1));
        assert!(addr.row_absolute);
        assert!(addr.col_absolute);

        let addr = CellAddress::parse("$A1").unwrap();
        assert!(addr.col_absolute);
        assert!(!addr.row_absolute);

        let addr = CellAddress::parse("A$1").unwrap();
        assert!(!addr.col_absolute);
        assert!(addr.row_absolute);
    }

    #[test]
    fn test_parse_whole_references() {
        let col = CellAddress::parse("C").unwrap();
        assert_eq!(col.coordinates(), (WHOLE, 2));
        assert!(col.is_whole_column());

        let row = CellAddress::parse("$5").unwrap();
        assert_eq!(row.coordinates(), (4, WHOLE));
        assert!(row.is_whole_row());
        assert!(row.row_absolute);
    }

    #[test]
    fn test_parse_r1c1_matches_a1() {
        let r1c1 = CellAddress::parse("R5C2").unwrap();
        let a1 = CellAddress::parse("B5").unwrap();
        assert_eq!(r1c1.coordinates(), a1.coordinates());

        let lower = CellAddress::parse("r1c1").unwrap();
        assert_eq!(lower.coordinates(), (0, 0));
        assert_eq!(CellAddress::parse("$R5C2").unwrap().coordinates(), (4, 1));

        // and back again
        assert_eq!(r1c1.to_r1c1_string(), "R5C2");
        assert_eq!(CellAddress::parse(&a1.to_r1c1_string()).unwrap().coordinates(), (4, 1));
    }

    #[test]
    fn test_parse_qualified() {
        let addr = CellAddress::parse("Data!$C$3").unwrap();
        assert_eq!(addr.coordinates(), (2, 2));
        assert_eq!(addr.sheet.as_deref(), Some("Data"));
        assert_eq!(addr.to_string(), "Data!$C$3");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(CellAddress::parse(""), Err(Error::InvalidAddress(_))));
        assert!(matches!(CellAddress::parse("A0"), Err(Error::InvalidAddress(_))));
        assert!(matches!(
            CellAddress::parse("A1048577"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(CellAddress::parse("R0C1"), Err(Error::InvalidAddress(_))));
        assert!(matches!(CellAddress::parse("R1C0"), Err(Error::InvalidAddress(_))));
        assert!(matches!(CellAddress::parse("1A"), Err(Error::InvalidAddress(_))));
        assert!(matches!(CellAddress::parse("A1:B2"), Err(Error::InvalidAddress(_))));
        assert!(matches!(CellAddress::parse("$"), Err(Error::InvalidAddress(_))));
        assert!(matches!(
            CellAddress::parse("ABCD1"),
            Err(Error::UnsupportedColumn(_))
        ));
        assert!(matches!(
            CellAddress::parse("XFE1"),
            Err(Error::UnsupportedColumn(_))
        ));
    }

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(0, 0, true, true).unwrap(), "A1");
        assert_eq!(format_address(4, 1, false, false).unwrap(), "$B$5");
        assert_eq!(format_address(4, 1, true, false).unwrap(), "$B5");
        assert_eq!(format_address(4, 1, false, true).unwrap(), "B$5");
        assert_eq!(format_address(WHOLE, 2, true, false).unwrap(), "$C");
        assert_eq!(format_address(9, WHOLE, false, false).unwrap(), "$10");
        assert!(format_address(0, 16_384, true, true).is_err());
    }

    #[test]
    fn test_format_then_parse() {
        for &(row, col) in &[(0, 0), (4, 1), (99, 26), (65_535, 701), (1_048_575, 16_383)] {
            let text = format_address(row, col, true, true).unwrap();
            let addr = CellAddress::parse(&text).unwrap();
            assert_eq!(addr.coordinates(), (row, col), "{}", text);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!(CellAddress::absolute(0, 0).to_string(), "$A$1");
        assert_eq!(CellAddress::whole_column(3).to_string(), "D");
    }
}
