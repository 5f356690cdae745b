//! The "General" number format

use super::decimal::Decimal;

/// Fractional digits kept for values of ordinary magnitude
const GENERAL_MAX_SCALE: i32 = 9;
/// Below this magnitude values are rounded by significant digits instead
const TINY_MAGNITUDE: f64 = 1e-9;
/// Widest plain rendering before the value is shortened
const MAX_POSITIVE_WIDTH: usize = 11;
const MAX_NEGATIVE_WIDTH: usize = 12;

/// Render a number the way a spreadsheet's General format shows it in a wide
/// column
///
/// Floating-point noise is rounded away and long values fall back to
/// scientific notation.
///
/// ```
/// use sheetkit_core::format::render_general;
///
/// assert_eq!(render_general(100.0), "100");
/// assert_eq!(render_general(0.1 + 0.2), "0.3");
/// assert_eq!(render_general(1234567890123.0), "1.23457E+12");
/// ```
pub fn render_general(value: f64) -> String {
    let Some(exact) = Decimal::from_f64(value) else {
        return value.to_string();
    };
    let scale = exact.scale();

    let rounded = if value.abs() > TINY_MAGNITUDE && scale > GENERAL_MAX_SCALE {
        exact.with_scale(GENERAL_MAX_SCALE)
    } else if scale > GENERAL_MAX_SCALE {
        exact.round_to_precision(5)
    } else {
        exact
    }
    .strip_trailing_zeros();

    let plain = rounded.to_plain_string();
    let len = plain.len();
    if !((len > MAX_POSITIVE_WIDTH && value > 0.0) || len > MAX_NEGATIVE_WIDTH) {
        return plain;
    }

    if scale == 0 {
        return rounded.round_to_precision(6).to_scientific_string();
    }
    if !rounded.to_scientific_string().contains('E') {
        let shortened = rounded.round_to_precision(10).to_scientific_string();
        return strip_mantissa_zeros(&shortened);
    }
    rounded.round_to_precision(5).to_scientific_string()
}

/// Drop trailing zeros (and a bare point) from the mantissa, keeping any
/// exponent suffix intact
fn strip_mantissa_zeros(text: &str) -> String {
    let (mantissa, exponent) = match text.find('E') {
        Some(pos) => text.split_at(pos),
        None => (text, ""),
    };
    if !mantissa.contains('.') {
        return text.to_string();
    }
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{mantissa}{exponent}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integers() {
        assert_eq!(render_general(0.0), "0");
        assert_eq!(render_general(100.0), "100");
        assert_eq!(render_general(-42.0), "-42");
        assert_eq!(render_general(12345678901.0), "12345678901");
    }

    #[test]
    fn test_floating_point_noise_is_removed() {
        assert_eq!(render_general(0.1 + 0.2), "0.3");
        assert_eq!(render_general(1.1 * 3.0), "3.3");
        assert_eq!(render_general(0.5), "0.5");
        assert_eq!(render_general(-2.25), "-2.25");
    }

    #[test]
    fn test_long_integers_switch_to_scientific() {
        assert_eq!(render_general(1234567890123.0), "1.23457E+12");
        assert_eq!(render_general(-1234567890123.0), "-1.23457E+12");
        assert_eq!(render_general(100000000000000.0), "1E+14");
    }

    #[test]
    fn test_negative_values_get_one_extra_character() {
        // eleven digits plus the sign still fits
        assert_eq!(render_general(-12345678901.0), "-12345678901");
    }

    #[test]
    fn test_long_fractions_are_shortened() {
        assert_eq!(render_general(1234.56789012345), "1234.56789");
        assert_eq!(render_general(0.123456789012), "0.123456789");
    }

    #[test]
    fn test_tiny_values() {
        assert_eq!(render_general(1e-10), "1E-10");
        assert_eq!(render_general(1.23456789e-12), "1.2346E-12");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(render_general(f64::NAN), "NaN");
        assert_eq!(render_general(f64::INFINITY), "inf");
        assert_eq!(render_general(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_strip_mantissa_zeros() {
        assert_eq!(strip_mantissa_zeros("1.234567890E+11"), "1.23456789E+11");
        assert_eq!(strip_mantissa_zeros("12.50"), "12.5");
        assert_eq!(strip_mantissa_zeros("1.000"), "1");
        assert_eq!(strip_mantissa_zeros("1200"), "1200");
    }
}
