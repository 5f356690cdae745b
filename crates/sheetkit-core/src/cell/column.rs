//! Column letter conversion
//!
//! Column names are a bijective base-26 numeral: there is no zero digit, so
//! `Z` is followed by `AA` rather than `A0`. Column numbers are 0-based.

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Longest column name a worksheet can address (`XFD`)
pub const MAX_COLUMN_LETTERS: usize = 3;

/// Convert a 0-based column number to its letter name (0 = A, 25 = Z, 26 = AA)
///
/// # Examples
/// ```
/// use sheetkit_core::cell::column_to_letters;
///
/// assert_eq!(column_to_letters(0).unwrap(), "A");
/// assert_eq!(column_to_letters(701).unwrap(), "ZZ");
/// assert_eq!(column_to_letters(16383).unwrap(), "XFD");
/// ```
pub fn column_to_letters(col: u16) -> Result<String> {
    if col >= MAX_COLS {
        return Err(Error::UnsupportedColumn(format!(
            "column index {} exceeds {}",
            col,
            MAX_COLS - 1
        )));
    }

    let mut letters = [0u8; MAX_COLUMN_LETTERS];
    let mut start = MAX_COLUMN_LETTERS;
    let mut n = col as u32;
    loop {
        start -= 1;
        letters[start] = b'A' + (n % 26) as u8;
        // An exact division borrows one from the next digit.
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }

    Ok(letters[start..].iter().map(|&b| b as char).collect())
}

/// Convert a column letter name to its 0-based column number
///
/// Letters are case-insensitive. Names longer than three letters, names that
/// decode past `XFD`, and names containing anything but ASCII letters fail with
/// [`Error::UnsupportedColumn`].
pub fn letters_to_column(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::UnsupportedColumn("empty column letters".into()));
    }
    if letters.len() > MAX_COLUMN_LETTERS {
        return Err(Error::UnsupportedColumn(format!(
            "'{}' is longer than {} letters",
            letters, MAX_COLUMN_LETTERS
        )));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::UnsupportedColumn(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    let col = col - 1;
    if col >= MAX_COLS as u32 {
        return Err(Error::UnsupportedColumn(format!(
            "'{}' is past the last column",
            letters
        )));
    }

    Ok(col as u16)
}
