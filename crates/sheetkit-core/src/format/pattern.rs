//! Pattern-driven rendering: section selection and dispatch

use lazy_regex::regex_is_match;

use super::date::render_date;
use super::general::render_general;
use super::literal::{render_literal, strip_literals, FormatChars};
use super::number::render_number;
use crate::error::{Error, Result};

/// Most sections a pattern can have: positive;negative;zero;text
pub const MAX_SECTIONS: usize = 4;

/// Identifier pattern rendered by fixed positions rather than placeholders
const SSN_PATTERN: &str = "000-00-0000";
const SSN_DIGITS: usize = 9;

/// Integral values below this render as plain integers under `General`
const MAX_INTEGRAL_GENERAL: f64 = 1e15;

/// A value to be rendered through a pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl FormatValue<'_> {
    /// Text that parses as a finite number becomes a number
    fn normalize(self) -> Self {
        match self {
            FormatValue::Text(text) => match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => FormatValue::Number(n),
                _ => self,
            },
            number => number,
        }
    }
}

impl From<f64> for FormatValue<'_> {
    fn from(n: f64) -> Self {
        FormatValue::Number(n)
    }
}

impl<'a> From<&'a str> for FormatValue<'a> {
    fn from(s: &'a str) -> Self {
        FormatValue::Text(s)
    }
}

/// Options that change how patterns are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderOptions {
    /// Serial dates count from 1904-01-01 instead of 1900-01-01
    pub date1904: bool,
}

/// Render `value` through a number-format pattern
///
/// Rendering never fails: anything the pattern cannot express falls back to
/// the value's own text.
///
/// ```
/// use sheetkit_core::format::{render_with_pattern, FormatValue};
///
/// assert_eq!(render_with_pattern(FormatValue::Number(1234.5), "#,##0.00"), "1,234.50");
/// assert_eq!(render_with_pattern(FormatValue::Number(-5.0), "0;(0)"), "(5)");
/// assert_eq!(render_with_pattern(FormatValue::Text("abc"), "0;0;0;\"<\"@\">\""), "<abc>");
/// ```
pub fn render_with_pattern(value: FormatValue<'_>, pattern: &str) -> String {
    render_with_options(value, pattern, &RenderOptions::default())
}

/// [`render_with_pattern`] with explicit options
pub fn render_with_options(value: FormatValue<'_>, pattern: &str, options: &RenderOptions) -> String {
    let raw = value;
    let value = value.normalize();

    if is_general(pattern) {
        return render_general_value(value);
    }
    if pattern == SSN_PATTERN {
        return render_identifier(raw, value);
    }

    let sections = split_sections(pattern);
    let first = sections[0];
    if is_date_section(first) {
        return match value {
            FormatValue::Number(n) => {
                render_date(n, first, options.date1904).unwrap_or_else(|| {
                    log::warn!("serial {n} is outside the date range of {pattern:?}");
                    render_general(n)
                })
            }
            FormatValue::Text(text) => text.to_string(),
        };
    }

    match value {
        FormatValue::Number(n) => render_numeric(n, &sections),
        FormatValue::Text(text) => render_text(text, &sections),
    }
}

/// Check that `pattern` is well formed
///
/// Rejects more than four sections, unterminated quotes and brackets, and a
/// trailing escape.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidNumberFormat(format!("{pattern:?}: {reason}"));

    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if !chars.by_ref().any(|c| c == '"') {
                    return Err(invalid("unterminated quote"));
                }
            }
            '[' => {
                if !chars.by_ref().any(|c| c == ']') {
                    return Err(invalid("unterminated bracket"));
                }
            }
            '\\' => {
                if chars.next().is_none() {
                    return Err(invalid("trailing escape"));
                }
            }
            _ => {}
        }
    }

    let sections = split_sections(pattern).len();
    if sections > MAX_SECTIONS {
        return Err(invalid(&format!("{sections} sections, at most {MAX_SECTIONS} allowed")));
    }
    Ok(())
}

/// Split a pattern on `;` outside literals
pub(crate) fn split_sections(pattern: &str) -> Vec<&str> {
    let mut sections = Vec::with_capacity(MAX_SECTIONS);
    let mut start = 0;
    for (idx, ch) in FormatChars::new(pattern) {
        if ch == ';' {
            sections.push(&pattern[start..idx]);
            start = idx + 1;
        }
    }
    sections.push(&pattern[start..]);
    sections
}

/// True when a section holds date or time tokens outside its literals
pub(crate) fn is_date_section(section: &str) -> bool {
    regex_is_match!(r"(?i)\[(h+|m+|s+)\]", section)
        || regex_is_match!(r"(?i)[ymdhs]", &strip_literals(section))
}

fn is_general(pattern: &str) -> bool {
    let pattern = pattern.trim();
    pattern.is_empty() || pattern.eq_ignore_ascii_case("general")
}

fn render_general_value(value: FormatValue<'_>) -> String {
    match value {
        FormatValue::Number(n) => general_text(n),
        FormatValue::Text(text) => text.to_string(),
    }
}

fn general_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < MAX_INTEGRAL_GENERAL {
        format!("{}", n as i64)
    } else {
        render_general(n)
    }
}

fn render_identifier(raw: FormatValue<'_>, value: FormatValue<'_>) -> String {
    let digits = match (raw, value) {
        (FormatValue::Text(text), FormatValue::Number(_)) => text.trim().to_string(),
        (_, FormatValue::Number(n)) => general_text(n),
        (_, FormatValue::Text(text)) => return text.to_string(),
    };
    let padded = format!("{digits:0>width$}", width = SSN_DIGITS);
    if !padded.is_ascii() {
        return digits;
    }
    format!("{}-{}-{}", &padded[..3], &padded[3..5], &padded[5..])
}

fn render_numeric(n: f64, sections: &[&str]) -> String {
    let (section, needs_minus) = if n < 0.0 {
        match sections.get(1) {
            Some(negative) => (*negative, false),
            None => (sections[0], true),
        }
    } else if n == 0.0 {
        (sections.get(2).copied().unwrap_or(sections[0]), false)
    } else {
        (sections[0], false)
    };

    if section.is_empty() {
        return String::new();
    }

    let body = if strip_literals(section).trim().eq_ignore_ascii_case("general") {
        general_text(n.abs())
    } else if FormatChars::new(section).any(|(_, c)| c == '@') {
        render_literal(section, Some(&general_text(n.abs())))
    } else {
        render_number(n, section)
    };

    if needs_minus {
        format!("-{body}")
    } else {
        body
    }
}

fn render_text(text: &str, sections: &[&str]) -> String {
    let section = sections.get(3).copied().or_else(|| {
        sections
            .iter()
            .copied()
            .find(|s| FormatChars::new(s).any(|(_, c)| c == '@'))
    });
    match section {
        Some(section) => render_literal(section, Some(text)),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64, pattern: &str) -> String {
        render_with_pattern(FormatValue::Number(n), pattern)
    }

    fn text(t: &str, pattern: &str) -> String {
        render_with_pattern(FormatValue::Text(t), pattern)
    }

    #[test]
    fn test_general_pattern() {
        assert_eq!(num(42.0, "General"), "42");
        assert_eq!(num(1234567890123.0, "general"), "1234567890123");
        assert_eq!(num(0.1 + 0.2, ""), "0.3");
        assert_eq!(text("hello", "General"), "hello");
        assert_eq!(text("7.50", "General"), "7.5");
    }

    #[test]
    fn test_section_selection() {
        let pattern = "0.00;[Red](0.00);\"zero\";\"text: \"@";
        assert_eq!(num(3.5, pattern), "3.50");
        assert_eq!(num(-3.5, pattern), "(3.50)");
        assert_eq!(num(0.0, pattern), "zero");
        assert_eq!(text("abc", pattern), "text: abc");
    }

    #[test]
    fn test_negative_without_negative_section() {
        assert_eq!(num(-1234.5, "#,##0.00"), "-1,234.50");
        assert_eq!(num(-0.25, "0%"), "-25%");
    }

    #[test]
    fn test_zero_without_zero_section() {
        assert_eq!(num(0.0, "0.0;(0.0)"), "0.0");
    }

    #[test]
    fn test_empty_sections_hide_values() {
        assert_eq!(num(-5.0, "0;"), "");
        assert_eq!(num(0.0, "0;-0;;@"), "");
    }

    #[test]
    fn test_text_section_fallbacks() {
        assert_eq!(text("abc", "0.00"), "abc");
        assert_eq!(text("abc", "@"), "abc");
        assert_eq!(text("abc", "\"[\"@\"]\";0"), "[abc]");
    }

    #[test]
    fn test_numeric_text_is_formatted() {
        assert_eq!(text("1234.5", "#,##0.00"), "1,234.50");
    }

    #[test]
    fn test_number_in_text_section() {
        assert_eq!(num(12.5, "@"), "12.5");
    }

    #[test]
    fn test_currency_patterns() {
        assert_eq!(num(-1234.0, "$#,##0_);($#,##0)"), "($1,234)");
        assert_eq!(num(1234.0, "$#,##0_);($#,##0)"), "$1,234 ");
        assert_eq!(
            num(1234.5, r#"_($* #,##0.00_);_($* (#,##0.00);_($* "-"??_);_(@_)"#),
            " $1,234.50 "
        );
        assert_eq!(
            num(0.0, r#"_($* #,##0.00_);_($* (#,##0.00);_($* "-"??_);_(@_)"#),
            " $-   "
        );
    }

    #[test]
    fn test_date_patterns() {
        assert_eq!(num(45000.0, "m/d/yyyy"), "3/15/2023");
        assert_eq!(num(45000.5, "[$-409]h:mm AM/PM"), "12:00 PM");
        assert_eq!(text("not a date", "yyyy-mm-dd"), "not a date");
        assert_eq!(num(-1.0, "yyyy-mm-dd"), "-1");
    }

    #[test]
    fn test_date1904() {
        let options = RenderOptions { date1904: true };
        assert_eq!(
            render_with_options(FormatValue::Number(0.0), "yyyy-mm-dd", &options),
            "1904-01-01"
        );
    }

    #[test]
    fn test_identifier_pattern() {
        assert_eq!(num(123456789.0, "000-00-0000"), "123-45-6789");
        assert_eq!(text("1234", "000-00-0000"), "000-00-1234");
        assert_eq!(text("n/a", "000-00-0000"), "n/a");
    }

    #[test]
    fn test_date_detection() {
        assert!(is_date_section("yyyy-mm-dd"));
        assert!(is_date_section("[h]"));
        assert!(is_date_section("h:mm AM/PM"));
        assert!(!is_date_section("#,##0.00"));
        assert!(!is_date_section("0.00\" days\""));
        assert!(!is_date_section("[Red]0.00"));
    }

    #[test]
    fn test_split_sections() {
        assert_eq!(split_sections("0;(0)"), vec!["0", "(0)"]);
        assert_eq!(split_sections("\"a;b\"0;0"), vec!["\"a;b\"0", "0"]);
        assert_eq!(split_sections("0\\;0"), vec!["0\\;0"]);
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("#,##0.00;[Red](#,##0.00)").is_ok());
        assert!(validate_pattern("0;0;0;@").is_ok());
        assert!(matches!(
            validate_pattern("0;0;0;@;0"),
            Err(Error::InvalidNumberFormat(_))
        ));
        assert!(validate_pattern("\"open").is_err());
        assert!(validate_pattern("[Red0").is_err());
        assert!(validate_pattern("0\\").is_err());
    }
}
