//! Workbook type - the main document structure

use crate::cell::{CellAddress, CellRange, CellValue, WHOLE};
use crate::error::{Error, Result};
use crate::format::{render_general, render_with_options, RenderOptions};
use crate::handle::FormatHandle;
use crate::style::{Referrer, SlotRef, StyleTable, StyleTableConfig, DEFAULT_CELL_SLOT};
use crate::worksheet::{cell_position, validate_cell_position, Worksheet};
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// A workbook contains one or more worksheets and the style table their
/// cells format through.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Workbook settings
    settings: WorkbookSettings,
    /// Formatting slots shared by every sheet
    styles: StyleTable,
}

impl Workbook {
    /// Create a new workbook with one worksheet named "Sheet1"
    pub fn new() -> Self {
        Self::with_settings(WorkbookSettings::default())
    }

    /// Create a new workbook with one worksheet and the given settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            styles: StyleTable::new(settings.styles.clone()),
            settings,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with default name
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name, None)?;
        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    /// Rename a worksheet
    pub fn rename_worksheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(sheet_not_found(index));
        }
        self.validate_sheet_name(new_name, Some(index))?;
        self.worksheets[index].set_name(new_name);
        Ok(())
    }

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Get the style table
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Get the style table mutably, e.g. to load raw records
    pub fn styles_mut(&mut self) -> &mut StyleTable {
        &mut self.styles
    }

    // ==================== Formatting ====================

    /// Slot that formats a cell: its own, else its row's default, else its
    /// column's default, else [`DEFAULT_CELL_SLOT`]
    pub fn effective_slot(&self, sheet: usize, row: u32, col: u16) -> SlotRef {
        [
            Referrer::cell(sheet, row, col),
            Referrer::RowDefault { sheet, row },
            Referrer::ColumnDefault { sheet, col },
        ]
        .iter()
        .find_map(|referrer| self.styles.slot_of(referrer))
        .unwrap_or(DEFAULT_CELL_SLOT)
    }

    /// Text a cell shows under its number format
    ///
    /// # Example
    /// ```
    /// use sheetkit_core::Workbook;
    ///
    /// let mut wb = Workbook::new();
    /// wb.worksheet_mut(0).unwrap().set_value("A1", 1234.5).unwrap();
    /// assert_eq!(wb.display_text(0, "A1").unwrap(), "1234.5");
    ///
    /// wb.cell_format(0, "A1").unwrap().set_number_format("#,##0.00").unwrap();
    /// assert_eq!(wb.display_text(0, "A1").unwrap(), "1,234.50");
    /// ```
    pub fn display_text(&self, sheet: usize, address: &str) -> Result<String> {
        let worksheet = self.worksheets.get(sheet).ok_or_else(|| sheet_not_found(sheet))?;
        let (row, col) = cell_position(&CellAddress::parse(address)?)?;
        let record = self.styles.record(self.effective_slot(sheet, row, col))?;
        let pattern = self
            .styles
            .number_format_pattern(record.number_format)
            .unwrap_or("General");
        Ok(self.render_value(worksheet.value_at(row, col), pattern))
    }

    /// Handle on the formatting of one cell
    ///
    /// A cell without a format of its own starts from the format it
    /// currently shows.
    pub fn cell_format(&mut self, sheet: usize, address: &str) -> Result<FormatHandle<'_>> {
        let (row, col) = cell_position(&CellAddress::parse(address)?)?;
        self.cell_format_at(sheet, row, col)
    }

    /// Handle on the formatting of one cell by indices
    pub fn cell_format_at(&mut self, sheet: usize, row: u32, col: u16) -> Result<FormatHandle<'_>> {
        self.check_sheet(sheet)?;
        validate_cell_position(row, col)?;
        let fallback = self.effective_slot(sheet, row, col);
        self.handle(Referrer::cell(sheet, row, col), fallback)
    }

    /// Handle on the default format of a row
    pub fn row_format(&mut self, sheet: usize, row: u32) -> Result<FormatHandle<'_>> {
        self.check_sheet(sheet)?;
        validate_cell_position(row, 0)?;
        self.handle(Referrer::RowDefault { sheet, row }, DEFAULT_CELL_SLOT)
    }

    /// Handle on the default format of a column
    pub fn column_format(&mut self, sheet: usize, col: u16) -> Result<FormatHandle<'_>> {
        self.check_sheet(sheet)?;
        validate_cell_position(0, col)?;
        self.handle(Referrer::ColumnDefault { sheet, col }, DEFAULT_CELL_SLOT)
    }

    /// Apply `f` to the format of every cell in a range
    ///
    /// Each cell is interned on its own, so cells that started with
    /// different formats keep their differences. Whole columns (`A:C`) and
    /// whole rows (`2:4`) edit the column or row defaults instead of every
    /// cell. Stops at the first error.
    pub fn format_range<F>(&mut self, sheet: usize, range: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&mut FormatHandle<'_>) -> Result<()>,
    {
        self.check_sheet(sheet)?;
        let range = CellRange::parse(range)?;
        let (first_row, first_col, last_row, last_col) = range.bounds();

        if range.first.row == WHOLE || range.last.row == WHOLE {
            for col in first_col.max(0)..=last_col {
                let col = u16::try_from(col).map_err(|_| invalid_range(&range))?;
                f(&mut self.column_format(sheet, col)?)?;
            }
            return Ok(());
        }
        if range.first.col == WHOLE || range.last.col == WHOLE {
            for row in first_row.max(0)..=last_row {
                let row = u32::try_from(row).map_err(|_| invalid_range(&range))?;
                f(&mut self.row_format(sheet, row)?)?;
            }
            return Ok(());
        }

        for addr in range.cells() {
            let (row, col) = cell_position(&addr)?;
            let mut handle = self.cell_format_at(sheet, row, col)?;
            f(&mut handle)?;
        }
        Ok(())
    }

    fn handle(&mut self, owner: Referrer, fallback: SlotRef) -> Result<FormatHandle<'_>> {
        let slot = match self.styles.slot_of(&owner) {
            Some(slot) => slot,
            None => {
                self.styles.bind(owner, fallback)?;
                fallback
            }
        };
        FormatHandle::new(&mut self.styles, self.worksheets.len(), owner, slot)
    }

    fn render_value(&self, value: &CellValue, pattern: &str) -> String {
        let general = pattern.eq_ignore_ascii_case("General");
        match value {
            CellValue::Empty => String::new(),
            CellValue::Bool(_) => value.to_string(),
            CellValue::Number(n) if general => render_general(*n),
            CellValue::Text(text) if general => text.clone(),
            _ => match value.format_value() {
                Some(v) => render_with_options(
                    v,
                    pattern,
                    &RenderOptions {
                        date1904: self.settings.date1904,
                    },
                ),
                None => value.to_string(),
            },
        }
    }

    fn check_sheet(&self, sheet: usize) -> Result<()> {
        if sheet < self.worksheets.len() {
            Ok(())
        } else {
            Err(sheet_not_found(sheet))
        }
    }

    /// Validate a sheet name, optionally excluding a sheet from duplicate check
    fn validate_sheet_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Case-insensitive duplicates
        let name_lower = name.to_lowercase();
        for (i, ws) in self.worksheets.iter().enumerate() {
            if Some(i) != exclude_index && ws.name().to_lowercase() == name_lower {
                return Err(Error::InvalidSheetName(format!(
                    "A sheet named '{}' already exists",
                    ws.name()
                )));
            }
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name, None).is_ok() {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_range(range: &CellRange) -> Error {
    Error::InvalidRange(format!("row or column index out of range in {:?}", range))
}

pub(crate) fn sheet_not_found(index: usize) -> Error {
    Error::SheetNotFound(format!("no sheet at index {index}"))
}

/// Workbook-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkbookSettings {
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date1904: bool,
    /// Limits of the style table
    pub styles: StyleTableConfig,
}

impl WorkbookSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the 1904 date system
    pub fn with_date1904(mut self, date1904: bool) -> Self {
        self.date1904 = date1904;
        self
    }

    pub fn with_styles(mut self, styles: StyleTableConfig) -> Self {
        self.styles = styles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{HorizontalAlignment, PatternType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");
        assert_eq!(wb.styles().len(), 16);
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();

        let idx = wb.add_worksheet().unwrap();
        assert_eq!(idx, 1);
        assert_eq!(wb.worksheet(1).unwrap().name(), "Sheet2");

        let idx = wb.add_worksheet_with_name("Data").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(wb.sheet_index("Data"), Some(2));
        assert!(wb.worksheet_by_name("NonExistent").is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();

        // Case-insensitive duplicate check
        assert!(wb.add_worksheet_with_name("SHEET1").is_err());
        assert!(wb.add_worksheet_with_name("sheet1").is_err());
        wb.rename_worksheet(0, "SHEET1").unwrap();
        assert_eq!(wb.worksheet(0).unwrap().name(), "SHEET1");
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("Sheet/1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet:1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet[1]").is_err());

        // Too long
        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(matches!(
            wb.add_worksheet_with_name(&long_name),
            Err(Error::InvalidSheetName(_))
        ));
        assert!(matches!(wb.rename_worksheet(4, "X"), Err(Error::SheetNotFound(_))));
    }

    #[test]
    fn test_display_text_uses_cell_format() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_value("A1", 0.1 + 0.2).unwrap();
        ws.set_value("A2", 0.25).unwrap();
        ws.set_value("A3", "label").unwrap();
        ws.set_value("A4", false).unwrap();

        assert_eq!(wb.display_text(0, "A1").unwrap(), "0.3");
        assert_eq!(wb.display_text(0, "A3").unwrap(), "label");
        assert_eq!(wb.display_text(0, "A4").unwrap(), "FALSE");
        assert_eq!(wb.display_text(0, "A9").unwrap(), "");

        wb.cell_format(0, "A2").unwrap().set_number_format("0.0%").unwrap();
        assert_eq!(wb.display_text(0, "A2").unwrap(), "25.0%");
        assert!(wb.display_text(1, "A1").is_err());
    }

    #[test]
    fn test_date_system_setting() {
        let settings = WorkbookSettings::new().with_date1904(true);
        let mut wb = Workbook::with_settings(settings);
        wb.worksheet_mut(0).unwrap().set_value("A1", 0.0).unwrap();
        wb.cell_format(0, "A1").unwrap().set_number_format("yyyy-mm-dd").unwrap();
        assert_eq!(wb.display_text(0, "A1").unwrap(), "1904-01-01");
    }

    #[test]
    fn test_row_default_applies_to_unformatted_cells() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0).unwrap().set_value("C2", 3.0).unwrap();
        wb.row_format(0, 1).unwrap().set_number_format("0.00").unwrap();
        assert_eq!(wb.display_text(0, "C2").unwrap(), "3.00");

        // A cell handle starts from the row's format
        wb.cell_format(0, "C2")
            .unwrap()
            .set_horizontal_alignment(HorizontalAlignment::Right)
            .unwrap();
        assert_eq!(wb.display_text(0, "C2").unwrap(), "3.00");
        let row_slot = wb.styles().slot_of(&Referrer::RowDefault { sheet: 0, row: 1 });
        assert_ne!(Some(wb.effective_slot(0, 1, 2)), row_slot);
    }

    #[test]
    fn test_format_range_touches_every_cell() {
        let mut wb = Workbook::new();
        wb.format_range(0, "A1:B2", |h| h.set_fill_pattern(PatternType::Solid))
            .unwrap();
        let slot = wb.effective_slot(0, 1, 1);
        assert_eq!(wb.effective_slot(0, 0, 0), slot);
        assert_eq!(wb.styles().use_count(slot), 4);
        assert_eq!(wb.styles().len(), 17);
        assert!(wb.format_range(0, "A1:", |_| Ok(())).is_err());
    }

    #[test]
    fn test_format_range_whole_columns_sets_defaults() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0).unwrap().set_value("B500", 0.5).unwrap();
        wb.format_range(0, "A:B", |h| h.set_number_format("0%"))
            .unwrap();

        let slot = wb
            .styles()
            .slot_of(&Referrer::ColumnDefault { sheet: 0, col: 1 })
            .unwrap();
        assert_eq!(
            wb.styles().slot_of(&Referrer::ColumnDefault { sheet: 0, col: 0 }),
            Some(slot)
        );
        assert_eq!(wb.styles().use_count(slot), 2);
        assert_eq!(wb.styles().referrers_of(slot).count(), 2);
        assert_eq!(wb.display_text(0, "B500").unwrap(), "50%");
    }

    #[test]
    fn test_format_range_whole_rows_sets_defaults() {
        let mut wb = Workbook::new();
        wb.format_range(0, "2:2", |h| h.set_wrap_text(true)).unwrap();

        let slot = wb.effective_slot(0, 1, 700);
        assert_ne!(slot, DEFAULT_CELL_SLOT);
        assert_eq!(wb.styles().referrers_of(slot).count(), 1);
        assert_eq!(wb.effective_slot(0, 0, 700), DEFAULT_CELL_SLOT);
    }
}
