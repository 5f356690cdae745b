//! Cell ranges and coordinate predicates

use super::address::{format_address, CellAddress, WHOLE};
use super::qualifier::strip_sheet_qualifiers;
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A range of cells (e.g., "A1:B10", "Sheet1:Sheet3!C:C")
///
/// Ranges are kept as written: `first` may lie below or to the right of
/// `last` ("B1:A1"). Counts and membership use the normalized bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// First endpoint as written
    pub first: CellAddress,
    /// Last endpoint as written
    pub last: CellAddress,
}

impl CellRange {
    /// Create a range from two endpoints, without normalizing them
    pub fn new(first: CellAddress, last: CellAddress) -> Self {
        Self { first, last }
    }

    /// Create a range from row/column indices
    pub fn from_indices(first_row: i32, first_col: i32, last_row: i32, last_col: i32) -> Self {
        Self::new(
            CellAddress::new(first_row, first_col),
            CellAddress::new(last_row, last_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            first: addr.clone(),
            last: addr,
        }
    }

    /// Parse a range, sheet qualifiers included
    ///
    /// The text is split at its last `:`. Without one, both endpoints are the
    /// same single address.
    ///
    /// # Examples
    /// ```
    /// use sheetkit_core::CellRange;
    ///
    /// let range = CellRange::parse("A1:C3").unwrap();
    /// assert_eq!(range.first.coordinates(), (0, 0));
    /// assert_eq!(range.last.coordinates(), (2, 2));
    /// assert_eq!(range.cell_count(), 9);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let q = strip_sheet_qualifiers(text);
        if q.body.is_empty() {
            return Err(Error::InvalidRange(format!("no cells in '{}'", text)));
        }

        let mut range = match q.body.rfind(':') {
            None => Self::single(CellAddress::parse(&q.body)?),
            Some(colon) => {
                let first = CellAddress::parse(&q.body[..colon])
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", text, e)))?;
                let last = CellAddress::parse(&q.body[colon + 1..])
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", text, e)))?;
                Self::new(first, last)
            }
        };

        for end in [&mut range.first, &mut range.last] {
            end.sheet = q.sheet1.clone();
            end.sheet2 = q.sheet2.clone();
        }
        Ok(range)
    }

    /// The qualifying sheet, if any
    pub fn sheet(&self) -> Option<&str> {
        self.first.sheet.as_deref()
    }

    /// True when both endpoints name the same cell
    pub fn is_single_cell(&self) -> bool {
        self.first.coordinates() == self.last.coordinates()
    }

    /// Top-left and bottom-right coordinates, whole-row/column sentinels kept
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (
            self.first.row.min(self.last.row),
            self.first.col.min(self.last.col),
            self.first.row.max(self.last.row),
            self.first.col.max(self.last.col),
        )
    }

    /// Number of rows covered; a whole-column range covers every row
    pub fn row_count(&self) -> u32 {
        if self.first.row == WHOLE || self.last.row == WHOLE {
            return MAX_ROWS;
        }
        self.first.row.abs_diff(self.last.row) + 1
    }

    /// Number of columns covered; a whole-row range covers every column
    pub fn col_count(&self) -> u32 {
        if self.first.col == WHOLE || self.last.col == WHOLE {
            return MAX_COLS as u32;
        }
        self.first.col.abs_diff(self.last.col) + 1
    }

    /// Total number of cells, using absolute differences between endpoints
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Check if a cell lies within the range
    pub fn contains(&self, row: i32, col: i32) -> bool {
        let (r0, c0, r1, c1) = self.bounds();
        let rows = self.first.row == WHOLE || self.last.row == WHOLE || (row >= r0 && row <= r1);
        let cols = self.first.col == WHOLE || self.last.col == WHOLE || (col >= c0 && col <= c1);
        rows && cols
    }

    /// Iterate over every cell address in the range, row by row
    pub fn cells(&self) -> CellRangeIterator {
        let (r0, c0, r1, c1) = self.bounds();
        let r0 = r0.max(0);
        let c0 = c0.max(0);
        let r1 = if self.row_count() == MAX_ROWS { MAX_ROWS as i32 - 1 } else { r1 };
        let c1 = if self.col_count() == MAX_COLS as u32 { MAX_COLS as i32 - 1 } else { c1 };
        CellRangeIterator {
            first_col: c0,
            last_row: r1,
            last_col: c1,
            row: r0,
            col: c0,
        }
    }

    /// Format the range as A1 text with per-coordinate relative flags
    pub fn to_a1_string(&self, relative: [bool; 4]) -> Result<String> {
        format_range(self, relative)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relative = [
            !self.first.row_absolute,
            !self.first.col_absolute,
            !self.last.row_absolute,
            !self.last.col_absolute,
        ];
        let body = format_range(self, relative).map_err(|_| fmt::Error)?;
        write!(f, "{}{}", self.first.qualifier_prefix(), body)
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Format a range as A1 text
///
/// `relative` holds the flags for first row, first column, last row and last
/// column, in that order. A range whose endpoints name the same cell is
/// written in single-address form.
pub fn format_range(range: &CellRange, relative: [bool; 4]) -> Result<String> {
    let first = format_address(range.first.row, range.first.col, relative[0], relative[1])?;
    if range.is_single_cell() {
        return Ok(first);
    }
    let last = format_address(range.last.row, range.last.col, relative[2], relative[3])?;
    Ok(format!("{}:{}", first, last))
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    first_col: i32,
    last_row: i32,
    last_col: i32,
    row: i32,
    col: i32,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row > self.last_row {
            return None;
        }

        let addr = CellAddress::new(self.row, self.col);

        self.col += 1;
        if self.col > self.last_col {
            self.col = self.first_col;
            self.row += 1;
        }

        Some(addr)
    }
}

/// The five-number description of a range
///
/// Rows are 1-based here, columns 0-based. A whole-column endpoint has a row
/// of -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCoordinates {
    pub first_row: i32,
    pub first_col: i32,
    pub last_row: i32,
    pub last_col: i32,
    pub cell_count: u64,
}

/// Parse range text (sheet qualifiers allowed) into [`RangeCoordinates`]
pub fn range_coordinates(text: &str) -> Result<RangeCoordinates> {
    let range = CellRange::parse(text)?;
    let one_based = |row: i32| if row == WHOLE { WHOLE } else { row + 1 };
    Ok(RangeCoordinates {
        first_row: one_based(range.first.row),
        first_col: range.first.col,
        last_row: one_based(range.last.row),
        last_col: range.last.col,
        cell_count: range.cell_count(),
    })
}

/// True when the address lies within the given rows and columns (inclusive)
pub fn is_in_range(
    addr: &CellAddress,
    row_first: i32,
    row_last: i32,
    col_first: i32,
    col_last: i32,
) -> bool {
    addr.col >= col_first && addr.col <= col_last && addr.row >= row_first && addr.row <= row_last
}

/// True when the two ranges share at least one cell
pub fn ranges_intersect(a: &CellRange, b: &CellRange) -> bool {
    let (ar0, ac0, ar1, ac1) = a.bounds();
    let (br0, bc0, br1, bc1) = b.bounds();
    let rows = a.row_count() == MAX_ROWS || b.row_count() == MAX_ROWS || (ar0 <= br1 && br0 <= ar1);
    let cols = a.col_count() == MAX_COLS as u32
        || b.col_count() == MAX_COLS as u32
        || (ac0 <= bc1 && bc0 <= ac1);
    rows && cols
}

/// True when `inner` lies entirely within `outer`
pub fn range_contains(outer: &CellRange, inner: &CellRange) -> bool {
    let (or0, oc0, or1, oc1) = outer.bounds();
    let (ir0, ic0, ir1, ic1) = inner.bounds();
    let rows = outer.row_count() == MAX_ROWS || (ir0 >= or0 && ir1 <= or1 && ir0 != WHOLE);
    let cols = outer.col_count() == MAX_COLS as u32 || (ic0 >= oc0 && ic1 <= oc1 && ic0 != WHOLE);
    rows && cols
}

/// True when the address comes before the range's top-left cell in
/// row-major order
pub fn is_before_range(addr: &CellAddress, range: &CellRange) -> bool {
    let (r0, c0, _, _) = range.bounds();
    addr.row < r0 || (addr.row == r0 && addr.col < c0)
}

/// True when the address comes after the range's bottom-right cell in
/// row-major order
pub fn is_after_range(addr: &CellAddress, range: &CellRange) -> bool {
    let (_, _, r1, c1) = range.bounds();
    addr.row > r1 || (addr.row == r1 && addr.col > c1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_range() {
        let range = CellRange::parse("A1:C3").unwrap();
        assert_eq!(range.first.coordinates(), (0, 0));
        assert_eq!(range.last.coordinates(), (2, 2));
        assert_eq!(range.cell_count(), 9);
    }

    #[test]
    fn test_parse_single_cell_range() {
        let range = CellRange::parse("C3").unwrap();
        assert_eq!(range.first, range.last);
        assert!(range.is_single_cell());
        assert_eq!(range.cell_count(), 1);
    }

    #[test]
    fn test_unnormalized_range_counts() {
        let range = CellRange::parse("B1:A1").unwrap();
        assert_eq!(range.first.coordinates(), (0, 1));
        assert_eq!(range.last.coordinates(), (0, 0));
        assert_eq!(range.cell_count(), 2);
        assert!(range.contains(0, 0));
        assert_eq!(range.to_string(), "B1:A1");
    }

    #[test]
    fn test_whole_column_and_row_ranges() {
        let cols = CellRange::parse("C:D").unwrap();
        assert_eq!(cols.first.coordinates(), (WHOLE, 2));
        assert_eq!(cols.row_count(), MAX_ROWS);
        assert_eq!(cols.col_count(), 2);
        assert!(cols.contains(500_000, 3));
        assert!(!cols.contains(0, 4));

        let rows = CellRange::parse("$2:$4").unwrap();
        assert_eq!(rows.col_count(), MAX_COLS as u32);
        assert_eq!(rows.row_count(), 3);
        assert_eq!(rows.to_string(), "$2:$4");
    }

    #[test]
    fn test_parse_qualified_range() {
        let range = CellRange::parse("Sheet1:Sheet2!A1:B2").unwrap();
        assert_eq!(range.sheet(), Some("Sheet1"));
        assert_eq!(range.last.sheet2.as_deref(), Some("Sheet2"));
        assert_eq!(range.to_string(), "Sheet1:Sheet2!A1:B2");
    }

    #[test]
    fn test_parse_range_errors() {
        assert!(matches!(CellRange::parse("Sheet1!"), Err(Error::InvalidRange(_))));
        assert!(matches!(CellRange::parse("A1:B2:C3"), Err(Error::InvalidRange(_))));
        assert!(matches!(CellRange::parse("A1:"), Err(Error::InvalidRange(_))));
        assert!(matches!(CellRange::parse("A0"), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_format_range() {
        let range = CellRange::from_indices(0, 0, 2, 2);
        assert_eq!(format_range(&range, [true; 4]).unwrap(), "A1:C3");
        assert_eq!(
            format_range(&range, [false, false, true, true]).unwrap(),
            "$A$1:C3"
        );
        assert_eq!(
            format_range(&range, [true, false, false, true]).unwrap(),
            "$A1:C$3"
        );

        let single = CellRange::from_indices(4, 1, 4, 1);
        assert_eq!(format_range(&single, [false; 4]).unwrap(), "$B$5");
    }

    #[test]
    fn test_cells_iterator() {
        let range = CellRange::parse("B2:A1").unwrap();
        let cells: Vec<_> = range.cells().map(|a| a.coordinates()).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_range_coordinates() {
        let coords = range_coordinates("Sheet1!$B$2:D5").unwrap();
        assert_eq!(
            coords,
            RangeCoordinates {
                first_row: 2,
                first_col: 1,
                last_row: 5,
                last_col: 3,
                cell_count: 12,
            }
        );
    }

    #[test]
    fn test_predicates() {
        let range = CellRange::parse("B2:D4").unwrap();
        let c3 = CellAddress::new(2, 2);
        let a1 = CellAddress::new(0, 0);
        let a2 = CellAddress::new(1, 0);
        let e4 = CellAddress::new(3, 4);
        let a5 = CellAddress::new(4, 0);

        assert!(is_in_range(&c3, 1, 3, 1, 3));
        assert!(!is_in_range(&a1, 1, 3, 1, 3));

        assert!(is_before_range(&a1, &range));
        assert!(is_before_range(&a2, &range));
        assert!(!is_before_range(&c3, &range));

        assert!(is_after_range(&e4, &range));
        assert!(is_after_range(&a5, &range));
        assert!(!is_after_range(&c3, &range));
    }

    #[test]
    fn test_intersection_and_containment() {
        let a = CellRange::parse("A1:C3").unwrap();
        let b = CellRange::parse("C3:E5").unwrap();
        let c = CellRange::parse("D4:E5").unwrap();
        let inner = CellRange::parse("B2:C3").unwrap();

        assert!(ranges_intersect(&a, &b));
        assert!(!ranges_intersect(&a, &c));
        assert!(ranges_intersect(&CellRange::parse("B:B").unwrap(), &a));

        assert!(range_contains(&a, &inner));
        assert!(!range_contains(&a, &b));
        assert!(range_contains(&CellRange::parse("A:C").unwrap(), &inner));
    }
}
