//! End-to-end tests for shared cell formatting through the workbook

use pretty_assertions::assert_eq;
use sheetkit::prelude::*;
use sheetkit::style::DEFAULT_CELL_SLOT;
use sheetkit::StyleTableConfig;

/// Two cells share a format until one of them is edited alone
#[test]
fn test_shared_format_copy_on_write() {
    let mut wb = Workbook::new();

    let mut a1 = wb.cell_format(0, "A1").unwrap();
    a1.add_cell(0, 1, 0).unwrap(); // A2
    a1.set_bold(true).unwrap();
    let shared = a1.slot();
    drop(a1);

    assert_eq!(wb.effective_slot(0, 1, 0), shared);
    assert_eq!(wb.styles().use_count(shared), 2);

    wb.cell_format(0, "A2").unwrap().set_italic(true).unwrap();
    let a2 = wb.effective_slot(0, 1, 0);
    assert_ne!(a2, shared);

    let styles = wb.styles();
    assert_eq!(styles.use_count(shared), 1);
    assert_eq!(styles.use_count(a2), 1);

    // A1 keeps its font
    let a1_font = styles.font(styles.record(shared).unwrap().font).unwrap();
    assert!(a1_font.is_bold());
    assert!(!a1_font.italic);

    let a2_font = styles.font(styles.record(a2).unwrap().font).unwrap();
    assert!(a2_font.is_bold() && a2_font.italic);
}

/// Identical formats made separately end up in one slot
#[test]
fn test_identical_formats_are_shared() {
    let mut wb = Workbook::new();
    wb.cell_format(0, "B2")
        .unwrap()
        .set_fill_pattern(PatternType::Solid)
        .unwrap();
    wb.cell_format(0, "D4")
        .unwrap()
        .set_fill_pattern(PatternType::Solid)
        .unwrap();

    let slot = wb.effective_slot(0, 1, 1);
    assert_eq!(wb.effective_slot(0, 3, 3), slot);
    assert_eq!(wb.styles().use_count(slot), 2);
    assert_eq!(wb.styles().len(), 17);
}

#[test]
fn test_unformatted_cells_use_default_slot() {
    let wb = Workbook::new();
    assert_eq!(wb.effective_slot(0, 10, 10), DEFAULT_CELL_SLOT);
    assert_eq!(wb.styles().use_count(DEFAULT_CELL_SLOT), 0);
}

#[test]
fn test_column_default_then_cell_override() {
    let mut wb = Workbook::new();
    wb.worksheet_mut(0).unwrap().set_value("C1", 0.125).unwrap();
    wb.worksheet_mut(0).unwrap().set_value("C2", 0.125).unwrap();

    wb.column_format(0, 2).unwrap().set_number_format("0.0%").unwrap();
    wb.cell_format(0, "C2").unwrap().set_number_format("0.000").unwrap();

    assert_eq!(wb.display_text(0, "C1").unwrap(), "12.5%");
    assert_eq!(wb.display_text(0, "C2").unwrap(), "0.125");
}

#[test]
fn test_exhausted_table_leaves_cell_untouched() {
    let config = StyleTableConfig::default().with_max_style_slots(17);
    let mut wb = Workbook::with_settings(WorkbookSettings::new().with_styles(config));

    wb.cell_format(0, "A1")
        .unwrap()
        .set_fill_pattern(PatternType::Solid)
        .unwrap();

    let err = wb
        .cell_format(0, "A2")
        .unwrap()
        .set_wrap_text(true)
        .unwrap_err();
    assert!(matches!(err, Error::StyleTableExhausted { capacity: 17 }));
    assert_eq!(wb.effective_slot(0, 1, 0), DEFAULT_CELL_SLOT);

    // A1 owns its slot, so it can still change in place
    wb.cell_format(0, "A1")
        .unwrap()
        .set_foreground_color(Color::RED)
        .unwrap();
    assert_eq!(wb.styles().len(), 17);
}

#[test]
fn test_format_range_keeps_differences() {
    let mut wb = Workbook::new();
    wb.cell_format(0, "A1").unwrap().set_italic(true).unwrap();
    wb.format_range(0, "A1:A2", |format| format.set_bold(true))
        .unwrap();

    let styles = wb.styles();
    let a1 = styles.record(wb.effective_slot(0, 0, 0)).unwrap();
    let a2 = styles.record(wb.effective_slot(0, 1, 0)).unwrap();
    assert!(styles.font(a1.font).unwrap().italic);
    assert!(!styles.font(a2.font).unwrap().italic);
    assert!(styles.font(a2.font).unwrap().is_bold());
}

#[test]
fn test_format_range_whole_column_sets_column_default() {
    let mut wb = Workbook::new();
    wb.worksheet_mut(0).unwrap().set_value("C9000", 1.5).unwrap();
    wb.format_range(0, "C:C", |format| format.set_number_format("# ?/?"))
        .unwrap();

    let slot = wb.effective_slot(0, 8999, 2);
    assert_ne!(slot, DEFAULT_CELL_SLOT);
    assert_eq!(wb.styles().use_count(slot), 1);
    assert_eq!(wb.display_text(0, "C9000").unwrap(), "1 1/2");
}
