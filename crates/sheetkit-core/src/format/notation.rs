//! Conversion between plain and scientific number text

use super::decimal::Decimal;

/// Target notation for [`format_notation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notation {
    /// Plain digits: `123456`
    #[default]
    Standard,
    /// Exponent without a forced sign: `1.23456E5`
    Scientific,
    /// Exponent with an explicit sign, as spreadsheets write it: `1.23456E+5`
    ScientificExcel,
}

/// Rewrite the numeric text `num` in the requested notation
///
/// Text that is not a number is returned unchanged.
///
/// ```
/// use sheetkit_core::format::{format_notation, Notation};
///
/// assert_eq!(format_notation("1.23456E5", Notation::Standard), "123456");
/// assert_eq!(format_notation("123456", Notation::Scientific), "1.23456E5");
/// assert_eq!(format_notation("123456", Notation::ScientificExcel), "1.23456E+5");
/// ```
pub fn format_notation(num: &str, notation: Notation) -> String {
    let num = num.trim();
    if Decimal::parse(num).is_none() {
        return num.to_string();
    }

    let (negative, body) = match num.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, num.strip_prefix('+').unwrap_or(num)),
    };
    let body = body.replace('e', "E");

    let rendered = match notation {
        Notation::Standard => to_standard(&body),
        Notation::Scientific => to_scientific(&body, false),
        Notation::ScientificExcel => to_scientific(&body, true),
    };
    let Some(rendered) = rendered else {
        return num.to_string();
    };

    if negative && rendered != "0" {
        format!("-{rendered}")
    } else {
        rendered
    }
}

fn to_standard(body: &str) -> Option<String> {
    let Some(e_pos) = body.find('E') else {
        return Some(drop_zero_fraction(body).to_string());
    };

    let mantissa = &body[..e_pos];
    let exponent: i32 = body[e_pos + 1..].parse().ok()?;
    let fraction_digits = mantissa
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len() as i32);
    let value = Decimal::parse(body)?;

    if exponent >= fraction_digits {
        Some(value.with_scale(0).to_plain_string())
    } else {
        Some(value.to_plain_string())
    }
}

fn to_scientific(body: &str, signed_exponent: bool) -> Option<String> {
    if let Some(e_pos) = body.find('E') {
        let (mantissa, exponent) = (&body[..e_pos], &body[e_pos + 1..]);
        let digits = exponent.trim_start_matches('+');
        let rendered = match (signed_exponent, exponent.starts_with('-')) {
            (true, false) => format!("{mantissa}E+{digits}"),
            _ => format!("{mantissa}E{digits}"),
        };
        return Some(rendered);
    }

    let body = drop_zero_fraction(body);
    let plus = if signed_exponent { "+" } else { "" };

    let Some((int_part, frac_part)) = body.split_once('.') else {
        let (lead, rest) = body.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        return Some(format!("{lead}.{rest}E{plus}{}", body.len() - 1));
    };

    let value = Decimal::parse(body)?;
    if !value.is_zero() && value.adjusted_exponent() < 0 {
        let places = -value.adjusted_exponent();
        let mantissa = value.shift(places as i32).to_plain_string();
        return Some(format!("{mantissa}E-{places}"));
    }

    let (lead, rest) = int_part.split_at(int_part.len().min(1));
    Some(format!(
        "{lead}.{rest}{frac_part}E{plus}{}",
        int_part.len().saturating_sub(1)
    ))
}

/// `"12.000"` -> `"12"`; anything else is returned as-is
fn drop_zero_fraction(body: &str) -> &str {
    match body.split_once('.') {
        Some((int_part, frac)) if !int_part.is_empty() && frac.bytes().all(|b| b == b'0') => {
            int_part
        }
        _ => body,
    }
}
