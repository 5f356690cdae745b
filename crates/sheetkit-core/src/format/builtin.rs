//! Built-in number formats
//!
//! Ids 0 through 49 are implied by the file format and never stored in the
//! workbook. Ids 23 through 36 are reserved for locale-specific formats and
//! have no fixed pattern. Custom formats start at [`FIRST_CUSTOM_FORMAT_ID`].

use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Highest id with an implied meaning
const LAST_BUILTIN_FORMAT_ID: u16 = 49;

/// First id available to workbook-defined formats
pub const FIRST_CUSTOM_FORMAT_ID: u16 = 164;

const BUILTIN_FORMATS: [(u16, &str); 36] = [
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (5, "$#,##0;($#,##0)"),
    (6, "$#,##0;[Red]($#,##0)"),
    (7, "$#,##0.00;($#,##0.00)"),
    (8, "$#,##0.00;[Red]($#,##0.00)"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "(#,##0_);(#,##0)"),
    (38, "(#,##0_);[Red](#,##0)"),
    (39, "(#,##0.00_);(#,##0.00)"),
    (40, "(#,##0.00_);[Red](#,##0.00)"),
    (41, r#"_(*#,##0_);_(*(#,##0);_(*"-"_);_(@_)"#),
    (42, r#"_($* #,##0_);_($* (#,##0);_($*"-"_);_(@_)"#),
    (43, r#"_(* #,##0.00_);_(* (#,##0.00);_(*"-"??_);_(@_)"#),
    (44, r#"_($* #,##0.00;_($* (#,##0.00);_($* "-"??;_(@_)"#),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mm:ss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

static PATTERN_TO_ID: Lazy<AHashMap<&'static str, u16>> = Lazy::new(|| {
    BUILTIN_FORMATS
        .iter()
        .map(|&(id, pattern)| (pattern, id))
        .collect()
});

/// Lookup between built-in format ids and their patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormats;

impl BuiltinFormats {
    /// Pattern of a built-in id, `None` for reserved and custom ids
    pub fn pattern(id: u16) -> Option<&'static str> {
        BUILTIN_FORMATS
            .iter()
            .find(|&&(builtin, _)| builtin == id)
            .map(|&(_, pattern)| pattern)
    }

    /// Id of a built-in pattern; `General` matches in any case
    pub fn id(pattern: &str) -> Option<u16> {
        if pattern.eq_ignore_ascii_case("general") {
            return Some(0);
        }
        PATTERN_TO_ID.get(pattern).copied()
    }

    /// True for ids with an implied meaning, including the reserved range
    pub fn is_builtin_id(id: u16) -> bool {
        id <= LAST_BUILTIN_FORMAT_ID
    }

    /// All built-in `(id, pattern)` pairs in id order
    pub fn iter() -> impl Iterator<Item = (u16, &'static str)> {
        BUILTIN_FORMATS.iter().copied()
    }
}
