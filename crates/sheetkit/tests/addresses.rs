//! End-to-end tests for column letters, addresses and ranges

use proptest::prelude::*;
use sheetkit::cell::{format_address, format_address_r1c1, range_coordinates, RangeCoordinates};
use sheetkit::prelude::*;
use sheetkit::{column_to_letters, letters_to_column, strip_sheet_qualifiers, MAX_COLS, MAX_ROWS};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn column_letters_round_trip(col in 0..MAX_COLS) {
        let letters = column_to_letters(col).unwrap();
        prop_assert!(letters.len() <= 3);
        prop_assert_eq!(letters_to_column(&letters).unwrap(), col);
        prop_assert_eq!(letters_to_column(&letters.to_lowercase()).unwrap(), col);
    }

    #[test]
    fn a1_round_trip(
        row in 0..MAX_ROWS as i32,
        col in 0..MAX_COLS as i32,
        relative_row: bool,
        relative_col: bool,
    ) {
        let text = format_address(row, col, relative_row, relative_col).unwrap();
        let addr = CellAddress::parse(&text).unwrap();
        prop_assert_eq!(addr.coordinates(), (row, col));
        prop_assert_eq!(addr.row_absolute, !relative_row);
        prop_assert_eq!(addr.col_absolute, !relative_col);
        prop_assert_eq!(addr.to_string(), text);
    }

    #[test]
    fn r1c1_names_the_same_cell(row in 0..MAX_ROWS as i32, col in 0..MAX_COLS as i32) {
        let r1c1 = CellAddress::parse(&format_address_r1c1(row, col)).unwrap();
        let a1 = CellAddress::parse(&format_address(row, col, true, true).unwrap()).unwrap();
        prop_assert_eq!(r1c1.coordinates(), a1.coordinates());
    }
}

#[test]
fn test_column_limits() {
    assert_eq!(column_to_letters(16_383).unwrap(), "XFD");
    assert!(matches!(column_to_letters(16_384), Err(Error::UnsupportedColumn(_))));
    assert!(matches!(letters_to_column("AAAA"), Err(Error::UnsupportedColumn(_))));
    assert!(matches!(letters_to_column("A1"), Err(Error::UnsupportedColumn(_))));
}

#[test]
fn test_r1c1_matches_a1() {
    let a1 = CellAddress::parse("B5").unwrap();
    let r1c1 = CellAddress::parse("R5C2").unwrap();
    let lower = CellAddress::parse("r5c2").unwrap();
    assert_eq!(a1.coordinates(), (4, 1));
    assert_eq!(r1c1.coordinates(), (4, 1));
    assert_eq!(lower.coordinates(), (4, 1));
    assert_eq!(r1c1.to_r1c1_string(), "R5C2");
}

#[test]
fn test_qualified_address() {
    let addr: CellAddress = "Sheet1!$C$7".parse().unwrap();
    assert_eq!(addr.sheet.as_deref(), Some("Sheet1"));
    assert_eq!(addr.coordinates(), (6, 2));
    assert_eq!(addr.to_string(), "Sheet1!$C$7");

    let q = strip_sheet_qualifiers("[1]Budget:[2]Actuals!B2");
    assert_eq!(q.sheet1.as_deref(), Some("Budget"));
    assert_eq!(q.sheet2.as_deref(), Some("Actuals"));
    assert_eq!(q.body, "B2");
}

#[test]
fn test_range_coordinates() {
    let coords = range_coordinates("Sheet1!A1:C3").unwrap();
    assert_eq!(
        coords,
        RangeCoordinates {
            first_row: 1,
            first_col: 0,
            last_row: 3,
            last_col: 2,
            cell_count: 9,
        }
    );
}

#[test]
fn test_reversed_range_counts_absolute_differences() {
    let range = CellRange::parse("B1:A1").unwrap();
    assert_eq!(range.cell_count(), 2);
    assert_eq!(range.cells().count(), 2);
    assert_eq!(range.to_string(), "B1:A1");
}

#[test]
fn test_bad_addresses() {
    assert!(CellAddress::parse("").is_err());
    assert!(CellAddress::parse("A0").is_err());
    assert!(CellAddress::parse("1A").is_err());
    assert!(CellRange::parse("A1:B2:C3").is_err());
}
