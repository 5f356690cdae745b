//! Exact decimal arithmetic for display rounding
//!
//! A [`Decimal`] is `digits × 10^-scale` with an explicit sign. Doubles are
//! converted through their exact binary expansion, so rounding decisions are
//! made on the true stored value and never on an already-rounded shortest
//! representation.

use std::fmt;

/// Digits after the decimal point needed to write any finite `f64` exactly
const F64_EXACT_FRACTION_DIGITS: usize = 1074;

/// Largest decimal exponent magnitude of a nonzero `f64`, subnormals included
const F64_MAX_DECIMAL_EXPONENT: usize = 324;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decimal {
    negative: bool,
    /// Most significant first, no leading zeros; zero is `[0]`
    digits: Vec<u8>,
    scale: i32,
}

impl Decimal {
    /// The exact value of a finite double, at the smallest scale that holds it
    ///
    /// Integral doubles get scale 0 even when they end in zeros.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let text = format!("{:.*}", F64_EXACT_FRACTION_DIGITS, value.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes())
            .map(|b| b - b'0')
            .collect();
        trim_leading_zeros(&mut digits);

        Some(Self::build(value < 0.0, digits, frac_part.len() as i32))
    }

    /// Parse plain or exponent text such as `-12.50`, `1E+15` or `1.2e-7`
    ///
    /// Exponents that put the value outside the range of an `f64` are
    /// rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match body.find(['E', 'e']) {
            Some(pos) => (&body[..pos], body[pos + 1..].parse::<i32>().ok()?),
            None => (body, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digit_count = int_part.len() + frac_part.len();
        if exponent.unsigned_abs() as usize > F64_MAX_DECIMAL_EXPONENT + digit_count {
            return None;
        }

        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes())
            .map(|b| b - b'0')
            .collect();
        trim_leading_zeros(&mut digits);

        let scale = (frac_part.len() as i32).checked_sub(exponent)?;
        Some(Self::build(negative, digits, scale))
    }

    fn build(negative: bool, digits: Vec<u8>, scale: i32) -> Self {
        let is_zero = digits.iter().all(|&d| d == 0);
        let digits = if digits.is_empty() { vec![0] } else { digits };
        Self {
            negative: negative && !is_zero,
            digits,
            scale,
        }
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Power of ten of the leading digit
    pub fn adjusted_exponent(&self) -> i64 {
        -(self.scale as i64) + self.digits.len() as i64 - 1
    }

    /// Move the decimal point `places` to the right (left when negative)
    pub fn shift(mut self, places: i32) -> Self {
        self.scale -= places;
        self
    }

    /// Rescale to `new_scale` fractional digits, rounding half-up
    pub fn with_scale(mut self, new_scale: i32) -> Self {
        if new_scale >= self.scale {
            let pad = (new_scale - self.scale) as usize;
            if !self.is_zero() {
                self.digits.extend(std::iter::repeat(0).take(pad));
            }
            self.scale = new_scale;
            return self;
        }

        let drop = (self.scale - new_scale) as usize;
        self.drop_digits(drop);
        self.scale = new_scale;
        self
    }

    /// Round to at most `precision` significant digits, half-up
    pub fn round_to_precision(mut self, precision: usize) -> Self {
        let precision = precision.max(1);
        if self.digits.len() <= precision {
            return self;
        }
        let drop = self.digits.len() - precision;
        self.drop_digits(drop);
        self.scale -= drop as i32;
        // A carry out of the top digit ("999" -> "1000") leaves one digit too many.
        if self.digits.len() > precision {
            self.digits.pop();
            self.scale -= 1;
        }
        self
    }

    /// Remove trailing zeros from the unscaled value, lowering the scale
    pub fn strip_trailing_zeros(mut self) -> Self {
        if self.is_zero() {
            return Self::build(false, vec![0], 0);
        }
        while self.digits.len() > 1 && self.digits.last() == Some(&0) {
            self.digits.pop();
            self.scale -= 1;
        }
        self
    }

    /// Digits without any exponent, e.g. `1000000` or `0.00012`
    pub fn to_plain_string(&self) -> String {
        let mut out = String::with_capacity(self.digits.len() + 4);
        if self.negative {
            out.push('-');
        }
        let digits: String = self.digits.iter().map(|d| (b'0' + d) as char).collect();

        if self.scale <= 0 {
            out.push_str(&digits);
            if !self.is_zero() {
                out.extend(std::iter::repeat('0').take((-self.scale) as usize));
            }
            return out;
        }

        let scale = self.scale as usize;
        if digits.len() > scale {
            let split = digits.len() - scale;
            out.push_str(&digits[..split]);
            out.push('.');
            out.push_str(&digits[split..]);
        } else {
            out.push_str("0.");
            out.extend(std::iter::repeat('0').take(scale - digits.len()));
            out.push_str(&digits);
        }
        out
    }

    /// Plain form when the scale is non-negative and the value is not tiny,
    /// otherwise one leading digit with an exponent (`1.23457E+12`, `1E-10`)
    pub fn to_scientific_string(&self) -> String {
        let adjusted = self.adjusted_exponent();
        if self.scale >= 0 && adjusted >= -6 {
            return self.to_plain_string();
        }

        let mut out = String::with_capacity(self.digits.len() + 8);
        if self.negative {
            out.push('-');
        }
        out.push((b'0' + self.digits[0]) as char);
        if self.digits.len() > 1 {
            out.push('.');
            out.extend(self.digits[1..].iter().map(|d| (b'0' + d) as char));
        }
        if adjusted != 0 {
            out.push('E');
            if adjusted > 0 {
                out.push('+');
            }
            out.push_str(&adjusted.to_string());
        }
        out
    }

    fn drop_digits(&mut self, drop: usize) {
        let len = self.digits.len();
        let round_up = if drop > len {
            false
        } else {
            self.digits[len - drop] >= 5
        };
        self.digits.truncate(len.saturating_sub(drop));
        if round_up {
            increment(&mut self.digits);
        }
        if self.digits.is_empty() {
            self.digits.push(0);
        }
        if self.is_zero() {
            self.negative = false;
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_scientific_string())
    }
}

fn trim_leading_zeros(digits: &mut Vec<u8>) {
    let first = digits.iter().position(|&d| d != 0).unwrap_or(digits.len());
    digits.drain(..first);
}

fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(v: f64) -> Decimal {
        Decimal::from_f64(v).unwrap()
    }

    #[test]
    fn test_exact_expansion() {
        assert_eq!(dec(0.5).to_plain_string(), "0.5");
        assert_eq!(dec(100.0).scale(), 0);
        assert_eq!(dec(100.0).to_plain_string(), "100");
        assert_eq!(dec(0.1).scale(), 55);
        assert_eq!(
            dec(0.1).to_plain_string(),
            "0.1000000000000000055511151231257827021181583404541015625"
        );
        assert_eq!(dec(-2.25).to_plain_string(), "-2.25");
        assert_eq!(dec(-0.0).to_plain_string(), "0");
        assert!(Decimal::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_with_scale_rounds_half_up() {
        assert_eq!(dec(2.5).with_scale(0).to_plain_string(), "3");
        assert_eq!(dec(-2.5).with_scale(0).to_plain_string(), "-3");
        assert_eq!(dec(0.125).with_scale(2).to_plain_string(), "0.13");
        assert_eq!(dec(9.99).with_scale(1).to_plain_string(), "10.0");
        assert_eq!(dec(0.004).with_scale(2).to_plain_string(), "0.00");
        assert_eq!(dec(1.5).with_scale(3).to_plain_string(), "1.500");
    }

    #[test]
    fn test_round_to_precision() {
        let d = Decimal::parse("1234567890123").unwrap().round_to_precision(6);
        assert_eq!(d.to_scientific_string(), "1.23457E+12");

        let d = Decimal::parse("99999.5").unwrap().round_to_precision(5);
        assert_eq!(d.to_scientific_string(), "1.0000E+5");
    }

    #[test]
    fn test_strip_and_render() {
        let d = Decimal::parse("1000").unwrap().strip_trailing_zeros();
        assert_eq!(d.scale(), -3);
        assert_eq!(d.to_plain_string(), "1000");
        assert_eq!(d.to_scientific_string(), "1E+3");

        let d = Decimal::parse("0.0000001230").unwrap().strip_trailing_zeros();
        assert_eq!(d.to_scientific_string(), "1.23E-7");
        assert_eq!(d.to_plain_string(), "0.000000123");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Decimal::parse("1E+15").unwrap().to_plain_string(), "1000000000000000");
        assert_eq!(Decimal::parse("-1.5e-3").unwrap().to_plain_string(), "-0.0015");
        assert_eq!(Decimal::parse(".5").unwrap().to_plain_string(), "0.5");
        assert!(Decimal::parse("abc").is_none());
        assert!(Decimal::parse("").is_none());
        assert!(Decimal::parse("1.2.3").is_none());
    }

    #[test]
    fn test_parse_rejects_exponents_past_f64_range() {
        assert!(Decimal::parse("1E200000000").is_none());
        assert!(Decimal::parse("-1e-999999999").is_none());
        assert_eq!(
            Decimal::parse("1.5E308").unwrap().adjusted_exponent(),
            308
        );
        assert!(Decimal::parse("4.9E-324").is_some());
    }
}
