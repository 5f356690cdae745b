//! Worksheet implementation

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Only values live here. Formatting belongs to the workbook's style table,
/// which tracks cells by sheet index.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Row index → column map; empty cells are not stored
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "A1")
    pub fn value(&self, address: &str) -> Result<&CellValue> {
        let (row, col) = cell_position(&CellAddress::parse(address)?)?;
        Ok(self.value_at(row, col))
    }

    /// Get cell value by indices
    pub fn value_at(&self, row: u32, col: u16) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(&row)
            .and_then(|r| r.get(&col))
            .unwrap_or(EMPTY)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    ///
    /// Setting [`CellValue::Empty`] removes the cell.
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let (row, col) = cell_position(&CellAddress::parse(address)?)?;
        self.set_value_at(row, col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        validate_cell_position(row, col)?;
        let value = value.into();
        if value.is_empty() {
            self.clear_cell_at(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
        Ok(())
    }

    /// Remove a cell's value
    pub fn clear_cell_at(&mut self, row: u32, col: u16) -> Option<CellValue> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Smallest range holding every non-empty cell
    pub fn used_range(&self) -> Option<CellRange> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let first_col = self.rows.values().filter_map(|r| r.keys().next()).min()?;
        let last_col = self.rows.values().filter_map(|r| r.keys().next_back()).max()?;
        Some(CellRange::from_indices(
            first_row as i32,
            i32::from(*first_col),
            last_row as i32,
            i32::from(*last_col),
        ))
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over non-empty cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, value)| (row, col, value)))
    }
}

/// Row and column of an address naming one cell
pub(crate) fn cell_position(addr: &CellAddress) -> Result<(u32, u16)> {
    let invalid = || {
        Error::InvalidAddress(format!("row {}, column {} is not a single cell", addr.row, addr.col))
    };
    let row = u32::try_from(addr.row).map_err(|_| invalid())?;
    let col = u16::try_from(addr.col).map_err(|_| invalid())?;
    validate_cell_position(row, col)?;
    Ok((row, col))
}

pub(crate) fn validate_cell_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(Error::InvalidAddress(format!(
            "row {row}, column {col} is outside the sheet"
        )));
    }
    Ok(())
}
