//! Numeric sections: digit placeholders, grouping, scaling, exponents and
//! fractions

use super::decimal::Decimal;
use super::literal::{render_literal, FormatChars};

/// Significant digits a spreadsheet keeps before rounding for display
const DISPLAY_PRECISION: usize = 15;

/// Widest denominator searched for `?/?`-style placeholders
const MAX_DENOMINATOR_DIGITS: usize = 5;

/// Render the magnitude of `value` through one numeric section
///
/// The caller decides the sign; `value` is treated as non-negative.
pub(crate) fn render_number(value: f64, section: &str) -> String {
    let Some(exact) = Decimal::from_f64(value.abs()) else {
        return value.to_string();
    };

    let percents = FormatChars::new(section).filter(|&(_, c)| c == '%').count();
    if let Some((start, end, spec)) = FractionSpec::parse(section) {
        let scaled = value.abs() * 100f64.powi(percents as i32);
        return format!(
            "{}{}{}",
            render_literal(&section[..start], None),
            spec.render(scaled),
            render_literal(&section[end..], None)
        );
    }

    let Some((start, end)) = placeholder_span(section) else {
        return render_literal(section, None);
    };

    let number = &section[start..end];
    let prefix = render_literal(&section[..start], None);
    let suffix = render_literal(&section[end..], None);

    let value = exact
        .round_to_precision(DISPLAY_PRECISION)
        .shift(2 * percents as i32);

    let body = match ScientificSpec::parse(number) {
        Some(spec) => spec.render(value),
        None => FixedSpec::parse(number).render(value),
    };
    format!("{prefix}{body}{suffix}")
}

/// Byte span from the first to the last digit placeholder, extended over an
/// exponent and trailing scaling commas
fn placeholder_span(section: &str) -> Option<(usize, usize)> {
    let mut first = None;
    let mut last = None;
    let mut chars = FormatChars::new(section).peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '0' | '#' | '?' => {
                first.get_or_insert(idx);
                last = Some(idx + 1);
            }
            '.' | ',' if first.is_some() => last = Some(idx + 1),
            'E' | 'e' if first.is_some() => {
                if let Some(&(sign_idx, '+' | '-')) = chars.peek() {
                    chars.next();
                    last = Some(sign_idx + 1);
                }
            }
            _ => {}
        }
    }
    first.zip(last)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FixedSpec {
    /// `0` placeholders before the point
    int_zeros: usize,
    /// `?` placeholders before the point
    int_spaces: usize,
    /// Placeholder kinds after the point, in order
    fraction: Vec<char>,
    grouping: bool,
    /// Each trailing comma divides by one thousand
    thousands_scale: usize,
    has_point: bool,
}

impl FixedSpec {
    fn parse(number: &str) -> Self {
        let live: Vec<char> = FormatChars::new(number).map(|(_, c)| c).collect();
        let point = live.iter().position(|&c| c == '.');
        let (int_part, frac_part) = match point {
            Some(p) => (&live[..p], &live[p + 1..]),
            None => (&live[..], &[][..]),
        };

        // Commas after the last placeholder scale instead of grouping
        let last_placeholder = int_part
            .iter()
            .rposition(|c| matches!(c, '0' | '#' | '?'))
            .map_or(0, |p| p + 1);
        let trailing_commas = |part: &[char]| part.iter().rev().take_while(|&&c| c == ',').count();
        let thousands_scale = if point.is_none() {
            trailing_commas(int_part)
        } else {
            trailing_commas(frac_part)
        };

        Self {
            int_zeros: int_part.iter().filter(|&&c| c == '0').count(),
            int_spaces: int_part.iter().filter(|&&c| c == '?').count(),
            fraction: frac_part
                .iter()
                .copied()
                .filter(|c| matches!(c, '0' | '#' | '?'))
                .collect(),
            grouping: int_part[..last_placeholder].contains(&','),
            thousands_scale,
            has_point: point.is_some(),
        }
    }

    fn render(&self, value: Decimal) -> String {
        let rounded = value
            .shift(-3 * self.thousands_scale as i32)
            .with_scale(self.fraction.len() as i32)
            .to_plain_string();
        let (int_digits, frac_digits) = rounded.split_once('.').unwrap_or((&rounded, ""));

        let mut int_part = if int_digits == "0" && self.int_zeros == 0 {
            String::new()
        } else {
            int_digits.to_string()
        };
        while int_part.len() < self.int_zeros {
            int_part.insert(0, '0');
        }
        if self.grouping {
            int_part = group_thousands(&int_part);
        }
        let width = self.int_zeros + self.int_spaces;
        while int_part.len() < width {
            int_part.insert(0, ' ');
        }

        let mut frac_part: Vec<char> = frac_digits.chars().collect();
        for (i, kind) in self.fraction.iter().enumerate().rev() {
            if frac_part.get(i) != Some(&'0') {
                break;
            }
            match kind {
                '#' => {
                    frac_part.truncate(i);
                }
                '?' => frac_part[i] = ' ',
                _ => break,
            }
        }

        let mut out = int_part;
        if self.has_point {
            out.push('.');
        }
        out.extend(frac_part);
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScientificSpec {
    mantissa: FixedSpec,
    /// Exponent letter as written in the pattern
    marker: char,
    always_sign: bool,
    exponent_digits: usize,
    /// Exponent is kept a multiple of this (`##0.0E+0` -> 3)
    exponent_step: i64,
}

impl ScientificSpec {
    fn parse(number: &str) -> Option<Self> {
        let (e_idx, marker) = FormatChars::new(number).find(|&(_, c)| c == 'E' || c == 'e')?;
        let mantissa_text = &number[..e_idx];
        let exponent_text = &number[e_idx + 1..];

        let always_sign = exponent_text.starts_with('+');
        let exponent_digits = FormatChars::new(exponent_text)
            .filter(|&(_, c)| matches!(c, '0' | '#' | '?'))
            .count();
        if exponent_digits == 0 {
            return None;
        }

        let mantissa = FixedSpec::parse(mantissa_text);
        let int_placeholders = FormatChars::new(mantissa_text.split('.').next().unwrap_or(""))
            .filter(|&(_, c)| matches!(c, '0' | '#' | '?'))
            .count();
        let exponent_step = if int_placeholders > mantissa.int_zeros.max(1) {
            int_placeholders as i64
        } else {
            1
        };

        Some(Self {
            mantissa,
            marker,
            always_sign,
            exponent_digits,
            exponent_step,
        })
    }

    fn render(&self, value: Decimal) -> String {
        let mut exponent = if value.is_zero() {
            0
        } else {
            value.adjusted_exponent().div_euclid(self.exponent_step) * self.exponent_step
        };

        let scale = self.mantissa.fraction.len() as i32;
        let mut mantissa = value.clone().shift(-(exponent as i32)).with_scale(scale);
        // Rounding may carry the mantissa into the next power of ten
        if !mantissa.is_zero() && mantissa.adjusted_exponent() >= self.exponent_step {
            exponent += self.exponent_step;
            mantissa = value.shift(-(exponent as i32)).with_scale(scale);
        }

        let sign = match (exponent < 0, self.always_sign) {
            (true, _) => "-",
            (false, true) => "+",
            (false, false) => "",
        };
        format!(
            "{}{}{sign}{:0width$}",
            self.mantissa.render(mantissa),
            self.marker,
            exponent.abs(),
            width = self.exponent_digits
        )
    }
}

fn is_placeholder(c: char) -> bool {
    matches!(c, '0' | '#' | '?')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Denominator {
    /// Best approximation with at most this many digits (`?/??`)
    Placeholders(Vec<char>),
    /// Always this denominator (`?/8`)
    Fixed(u64),
}

/// `# ?/?`, `# ??/??`, `?/4` and friends
///
/// Without a whole-number part the fraction is improper, so 1.5 under `?/?`
/// is `3/2`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FractionSpec {
    whole: Vec<char>,
    /// Literal text between the whole number and the numerator
    gap: String,
    numerator: Vec<char>,
    denominator: Denominator,
}

impl FractionSpec {
    /// Returns the spec with the byte span it covers in `section`
    fn parse(section: &str) -> Option<(usize, usize, Self)> {
        let live: Vec<(usize, char)> = FormatChars::new(section).collect();
        let slash = live
            .iter()
            .enumerate()
            .position(|(i, &(_, c))| c == '/' && i > 0 && is_placeholder(live[i - 1].1))?;

        let mut num_start = slash;
        while num_start > 0 && is_placeholder(live[num_start - 1].1) {
            num_start -= 1;
        }
        let numerator: Vec<char> = live[num_start..slash].iter().map(|&(_, c)| c).collect();

        let after = &live[slash + 1..];
        let (denominator, den_len) = match after.first() {
            Some(&(_, c)) if matches!(c, '1'..='9') => {
                let digits: String = after
                    .iter()
                    .map(|&(_, c)| c)
                    .take_while(char::is_ascii_digit)
                    .collect();
                let len = digits.len();
                (Denominator::Fixed(digits.parse().ok()?), len)
            }
            _ => {
                let kinds: Vec<char> = after
                    .iter()
                    .map(|&(_, c)| c)
                    .take_while(|&c| is_placeholder(c))
                    .collect();
                if kinds.is_empty() {
                    return None;
                }
                let len = kinds.len();
                (Denominator::Placeholders(kinds), len)
            }
        };
        let end_idx = slash + den_len;
        let (last_idx, last_ch) = live[end_idx];
        let end = last_idx + last_ch.len_utf8();

        // The whole-number part is the placeholder run before the numerator
        let whole_end = live[..num_start].iter().rposition(|&(_, c)| is_placeholder(c));
        let (start, whole, gap) = match whole_end {
            Some(whole_end) => {
                let mut whole_start = whole_end;
                while whole_start > 0
                    && matches!(live[whole_start - 1].1, '0' | '#' | '?' | ',')
                {
                    whole_start -= 1;
                }
                let whole = live[whole_start..=whole_end]
                    .iter()
                    .map(|&(_, c)| c)
                    .filter(|&c| is_placeholder(c))
                    .collect();
                let gap_start = live[whole_end].0 + 1;
                let gap = render_literal(&section[gap_start..live[num_start].0], None);
                (live[whole_start].0, whole, gap)
            }
            None => (live[num_start].0, Vec::new(), String::new()),
        };

        Some((
            start,
            end,
            Self {
                whole,
                gap,
                numerator,
                denominator,
            },
        ))
    }

    fn render(&self, value: f64) -> String {
        let proper = !self.whole.is_empty();
        let (mut whole, part) = if proper {
            (value.trunc() as u64, value.fract())
        } else {
            (0, value)
        };

        let (mut numerator, denominator) = match &self.denominator {
            Denominator::Fixed(d) => ((part * *d as f64).round() as u64, *d),
            Denominator::Placeholders(kinds) => {
                let digits = kinds.len().min(MAX_DENOMINATOR_DIGITS) as u32;
                closest_fraction(part, 10u64.pow(digits) - 1)
            }
        };
        if proper && numerator >= denominator {
            whole += numerator / denominator;
            numerator %= denominator;
        }

        if !proper {
            return format!(
                "{}/{}",
                pad_left(&numerator.to_string(), &self.numerator),
                self.denominator_text(denominator)
            );
        }

        let whole_digits = if whole == 0 && numerator != 0 {
            String::new()
        } else {
            whole.to_string()
        };
        let mut out = pad_left(&whole_digits, &self.whole);
        out.push_str(&self.gap);
        if numerator == 0 {
            let width = self.numerator.len() + 1 + self.denominator_width();
            out.extend(std::iter::repeat(' ').take(width));
        } else {
            out.push_str(&pad_left(&numerator.to_string(), &self.numerator));
            out.push('/');
            out.push_str(&self.denominator_text(denominator));
        }
        out
    }

    fn denominator_width(&self) -> usize {
        match &self.denominator {
            Denominator::Placeholders(kinds) => kinds.len(),
            Denominator::Fixed(d) => d.to_string().len(),
        }
    }

    /// Placeholder denominators are left-aligned so the slashes line up
    fn denominator_text(&self, denominator: u64) -> String {
        let mut text = denominator.to_string();
        if let Denominator::Placeholders(kinds) = &self.denominator {
            let missing = kinds.len().saturating_sub(text.len());
            text.extend(kinds[kinds.len() - missing..].iter().filter(|&&c| c == '?').map(|_| ' '));
        }
        text
    }
}

/// Closest `n/d` to `value` with `d <= max_denominator`, smallest `d` first
fn closest_fraction(value: f64, max_denominator: u64) -> (u64, u64) {
    let mut best = (value.round() as u64, 1);
    let mut best_error = (value - best.0 as f64).abs();
    for d in 2..=max_denominator {
        if best_error == 0.0 {
            break;
        }
        let n = (value * d as f64).round();
        let error = (value - n / d as f64).abs();
        if error < best_error {
            best = (n as u64, d);
            best_error = error;
        }
    }
    best
}

/// Pad `digits` on the left to the placeholder count: `0` adds zeros, `?`
/// adds spaces and `#` adds nothing
fn pad_left(digits: &str, kinds: &[char]) -> String {
    let missing = kinds.len().saturating_sub(digits.len());
    let mut out: String = kinds[..missing]
        .iter()
        .filter_map(|&c| match c {
            '0' => Some('0'),
            '?' => Some(' '),
            _ => None,
        })
        .collect();
    out.push_str(digits);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_places() {
        assert_eq!(render_number(1234.5, "0"), "1235");
        assert_eq!(render_number(1234.5, "0.00"), "1234.50");
        assert_eq!(render_number(0.5, "#.##"), ".5");
        assert_eq!(render_number(7.0, "000"), "007");
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(render_number(1.005, "0.00"), "1.01");
    }

    #[test]
    fn test_grouping_and_scaling() {
        assert_eq!(render_number(1234567.891, "#,##0.00"), "1,234,567.89");
        assert_eq!(render_number(999.0, "#,##0"), "999");
        assert_eq!(render_number(1234567.0, "#,##0,"), "1,235");
        assert_eq!(render_number(1234567.0, "0.0,,"), "1.2");
    }

    #[test]
    fn test_percent() {
        assert_eq!(render_number(0.1234, "0.00%"), "12.34%");
        assert_eq!(render_number(0.5, "0%"), "50%");
    }

    #[test]
    fn test_optional_digits() {
        assert_eq!(render_number(1.5, "0.0#"), "1.5");
        assert_eq!(render_number(1.25, "0.0#"), "1.25");
        assert_eq!(render_number(1.5, "0.0?"), "1.5 ");
        assert_eq!(render_number(5.0, "??0"), "  5");
    }

    #[test]
    fn test_literals_around_digits() {
        assert_eq!(render_number(1234.0, "$#,##0"), "$1,234");
        assert_eq!(render_number(12.0, r#"0" units""#), "12 units");
        assert_eq!(render_number(5.0, "_(0_)"), " 5 ");
        assert_eq!(render_number(5.0, r#""n/a""#), "n/a");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(render_number(12345.0, "0.00E+00"), "1.23E+04");
        assert_eq!(render_number(0.000123, "0.00E+00"), "1.23E-04");
        assert_eq!(render_number(0.0, "0.00E+00"), "0.00E+00");
        assert_eq!(render_number(99999.0, "0.0E+0"), "1.0E+5");
        assert_eq!(render_number(12345.0, "0.0e-0"), "1.2e4");
    }

    #[test]
    fn test_engineering_exponent() {
        assert_eq!(render_number(12345.0, "##0.0E+0"), "12.3E+3");
        assert_eq!(render_number(1234567.0, "##0.0E+0"), "1.2E+6");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }

    #[test]
    fn test_fractions_with_whole_part() {
        assert_eq!(render_number(1.5, "# ?/?"), "1 1/2");
        assert_eq!(render_number(1.5, "# ??/??"), "1  1/2 ");
        assert_eq!(render_number(std::f64::consts::PI, "# ??/??"), "3 14/99");
        assert_eq!(render_number(0.25, "# ?/?"), " 1/4");
        assert_eq!(render_number(-1.5, "# ?/?"), "1 1/2");
    }

    #[test]
    fn test_whole_fractions_blank_the_fraction() {
        assert_eq!(render_number(2.0, "# ?/?"), "2    ");
        assert_eq!(render_number(0.0, "# ?/?"), "0    ");
        // Rounds up to the next whole number
        assert_eq!(render_number(0.99, "# ?/?"), "1    ");
    }

    #[test]
    fn test_fixed_denominator_and_improper_fractions() {
        assert_eq!(render_number(2.3, "# ?/8"), "2 2/8");
        assert_eq!(render_number(0.5, "?/100"), "50/100");
        assert_eq!(render_number(1.5, "?/?"), "3/2");
        assert_eq!(render_number(1.5, r#"# ?/?" in""#), "1 1/2 in");
    }

    #[test]
    fn test_closest_fraction() {
        assert_eq!(closest_fraction(0.5, 9), (1, 2));
        assert_eq!(closest_fraction(0.333, 9), (1, 3));
        assert_eq!(closest_fraction(0.0, 9), (0, 1));
        assert_eq!(closest_fraction(0.3125, 99), (5, 16));
    }
}
