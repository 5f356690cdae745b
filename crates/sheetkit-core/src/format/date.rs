//! Date and time sections
//!
//! Spreadsheets store dates as serial day numbers. In the 1900 system serial 1
//! is 1900-01-01 and serial 60 is the non-existent 1900-02-29 kept for
//! compatibility; in the 1904 system serial 0 is 1904-01-01. The fractional
//! part is the time of day.

use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};

const MS_PER_DAY: i64 = 86_400_000;
/// 9999-12-31 in the 1900 system
const MAX_SERIAL: f64 = 2_958_466.0;
/// Serial 0 in the 1900 system, shown as 1900-01-00
const ZERO_DAY: i64 = 0;
/// The fictional 1900-02-29
const PHANTOM_LEAP_DAY: i64 = 60;

/// Calendar and clock fields of a serial date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SerialDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millis: u32,
    /// Whole milliseconds since serial 0, for elapsed-time tokens
    pub total_ms: i64,
}

impl SerialDateTime {
    /// Split `serial` into fields, rounding the clock to `fraction_digits`
    /// digits of a second (0 to 3)
    pub fn from_serial(serial: f64, date1904: bool, fraction_digits: u32) -> Option<Self> {
        if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL {
            return None;
        }

        let step = 10_i64.pow(3 - fraction_digits.min(3));
        let total_ms = ((serial * MS_PER_DAY as f64) / step as f64).round() as i64 * step;
        let days = total_ms.div_euclid(MS_PER_DAY);
        let ms_of_day = total_ms.rem_euclid(MS_PER_DAY);

        let (year, month, day, weekday) = if date1904 {
            let base = NaiveDate::from_ymd_opt(1904, 1, 1)?;
            let date = base.checked_add_signed(Duration::days(days))?;
            (date.year(), date.month(), date.day(), date.weekday())
        } else if days == ZERO_DAY {
            (1900, 1, 0, Weekday::Sat)
        } else if days == PHANTOM_LEAP_DAY {
            (1900, 2, 29, Weekday::Wed)
        } else {
            let base = NaiveDate::from_ymd_opt(1899, 12, 31)?;
            let adjusted = if days > PHANTOM_LEAP_DAY { days - 1 } else { days };
            let date = base.checked_add_signed(Duration::days(adjusted))?;
            (date.year(), date.month(), date.day(), date.weekday())
        };

        let ms = ms_of_day as u32;
        Some(Self {
            year,
            month,
            day,
            weekday,
            hour: ms / 3_600_000,
            minute: ms / 60_000 % 60,
            second: ms / 1000 % 60,
            millis: ms % 1000,
            total_ms,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DateToken {
    Literal(String),
    Year(usize),
    /// `m` run not yet resolved to month or minute
    MonthOrMinute(usize),
    Month(usize),
    Minute(usize),
    Day(usize),
    Hour(usize),
    Second(usize),
    /// `.0`, `.00` or `.000` after seconds
    SecondFraction(usize),
    /// `AM/PM` or `A/P`, with the case of the pattern
    Meridiem { short: bool, lowercase: bool },
    ElapsedHours(usize),
    ElapsedMinutes(usize),
    ElapsedSeconds(usize),
}

impl DateToken {
    fn is_literal(&self) -> bool {
        matches!(self, DateToken::Literal(_))
    }
}

/// Render `serial` through a date section; `None` when the serial is outside
/// the representable calendar
pub(crate) fn render_date(serial: f64, section: &str, date1904: bool) -> Option<String> {
    let tokens = tokenize(section);
    let twelve_hour = tokens
        .iter()
        .any(|t| matches!(t, DateToken::Meridiem { .. }));
    let fraction_digits = tokens
        .iter()
        .find_map(|t| match t {
            DateToken::SecondFraction(n) => Some(*n as u32),
            _ => None,
        })
        .unwrap_or(0);

    let dt = SerialDateTime::from_serial(serial, date1904, fraction_digits)?;

    let mut out = String::with_capacity(section.len() + 8);
    for token in &tokens {
        match token {
            DateToken::Literal(text) => out.push_str(text),
            DateToken::Year(n) if *n <= 2 => push_padded(&mut out, dt.year.rem_euclid(100), 2),
            DateToken::Year(_) => push_padded(&mut out, dt.year, 4),
            DateToken::Month(n) => {
                let name = month_name(dt.month);
                match *n {
                    1 | 2 => push_padded(&mut out, dt.month as i64, *n),
                    3 => out.push_str(&name[..3]),
                    5 => out.push_str(&name[..1]),
                    _ => out.push_str(name),
                }
            }
            DateToken::Minute(n) | DateToken::MonthOrMinute(n) => {
                push_padded(&mut out, dt.minute as i64, (*n).min(2))
            }
            DateToken::Day(n) => {
                let name = weekday_name(dt.weekday);
                match *n {
                    1 | 2 => push_padded(&mut out, dt.day as i64, *n),
                    3 => out.push_str(&name[..3]),
                    _ => out.push_str(name),
                }
            }
            DateToken::Hour(n) => {
                let hour = if twelve_hour {
                    match dt.hour % 12 {
                        0 => 12,
                        h => h,
                    }
                } else {
                    dt.hour
                };
                push_padded(&mut out, hour as i64, (*n).min(2));
            }
            DateToken::Second(n) => push_padded(&mut out, dt.second as i64, (*n).min(2)),
            DateToken::SecondFraction(n) => {
                let digits = format!("{:03}", dt.millis);
                out.push('.');
                out.push_str(&digits[..(*n).min(3)]);
            }
            DateToken::Meridiem { short, lowercase } => {
                let text = match (dt.hour < 12, *short) {
                    (true, false) => "AM",
                    (false, false) => "PM",
                    (true, true) => "A",
                    (false, true) => "P",
                };
                if *lowercase {
                    out.push_str(&text.to_ascii_lowercase());
                } else {
                    out.push_str(text);
                }
            }
            DateToken::ElapsedHours(n) => push_padded(&mut out, dt.total_ms / 3_600_000, *n),
            DateToken::ElapsedMinutes(n) => push_padded(&mut out, dt.total_ms / 60_000, *n),
            DateToken::ElapsedSeconds(n) => push_padded(&mut out, dt.total_ms / 1000, *n),
        }
    }
    Some(out)
}

fn push_padded(out: &mut String, value: impl Into<i64>, width: usize) {
    out.push_str(&format!("{:0width$}", value.into(), width = width));
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("January", |m| m.name())
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn tokenize(section: &str) -> Vec<DateToken> {
    let chars: Vec<char> = section.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let run_len = |start: usize, target: char| {
        chars[start..]
            .iter()
            .take_while(|c| c.eq_ignore_ascii_case(&target))
            .count()
    };

    while i < chars.len() {
        let ch = chars[i];
        match ch.to_ascii_lowercase() {
            '"' => {
                let text: String = chars[i + 1..].iter().take_while(|&&c| c != '"').collect();
                i += text.chars().count() + 2;
                tokens.push(DateToken::Literal(text));
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    tokens.push(DateToken::Literal(next.to_string()));
                }
                i += 2;
            }
            '_' => {
                tokens.push(DateToken::Literal(" ".to_string()));
                i += 2;
            }
            '*' => i += 2,
            '[' => {
                let content: String = chars[i + 1..].iter().take_while(|&&c| c != ']').collect();
                i += content.chars().count() + 2;
                let lower = content.to_ascii_lowercase();
                let width = lower.len();
                if !lower.is_empty() && lower.chars().all(|c| c == 'h') {
                    tokens.push(DateToken::ElapsedHours(width));
                } else if !lower.is_empty() && lower.chars().all(|c| c == 'm') {
                    tokens.push(DateToken::ElapsedMinutes(width));
                } else if !lower.is_empty() && lower.chars().all(|c| c == 's') {
                    tokens.push(DateToken::ElapsedSeconds(width));
                }
            }
            'a' if starts_with_ci(&chars[i..], "am/pm") => {
                tokens.push(DateToken::Meridiem {
                    short: false,
                    lowercase: ch.is_ascii_lowercase(),
                });
                i += 5;
            }
            'a' if starts_with_ci(&chars[i..], "a/p") => {
                tokens.push(DateToken::Meridiem {
                    short: true,
                    lowercase: ch.is_ascii_lowercase(),
                });
                i += 3;
            }
            'y' | 'm' | 'd' | 'h' | 's' => {
                let n = run_len(i, ch);
                tokens.push(match ch.to_ascii_lowercase() {
                    'y' => DateToken::Year(n),
                    'm' if n <= 2 => DateToken::MonthOrMinute(n),
                    'm' => DateToken::Month(n),
                    'd' => DateToken::Day(n),
                    'h' => DateToken::Hour(n),
                    _ => DateToken::Second(n),
                });
                i += n;
            }
            '.' if matches!(tokens.last(), Some(DateToken::Second(_)))
                && chars.get(i + 1) == Some(&'0') =>
            {
                let n = chars[i + 1..].iter().take_while(|&&c| c == '0').count();
                tokens.push(DateToken::SecondFraction(n));
                i += n + 1;
            }
            _ => {
                tokens.push(DateToken::Literal(ch.to_string()));
                i += 1;
            }
        }
    }

    resolve_minutes(&mut tokens);
    tokens
}

/// `m`/`mm` mean minutes right after an hour or right before a second
fn resolve_minutes(tokens: &mut [DateToken]) {
    for i in 0..tokens.len() {
        let DateToken::MonthOrMinute(n) = tokens[i] else {
            continue;
        };
        let after_hour = tokens[..i]
            .iter()
            .rev()
            .find(|t| !t.is_literal())
            .is_some_and(|t| matches!(t, DateToken::Hour(_) | DateToken::ElapsedHours(_)));
        let before_second = tokens[i + 1..]
            .iter()
            .find(|t| !t.is_literal())
            .is_some_and(|t| matches!(t, DateToken::Second(_) | DateToken::ElapsedSeconds(_)));

        tokens[i] = if after_hour || before_second {
            DateToken::Minute(n)
        } else {
            DateToken::Month(n)
        };
    }
}

fn starts_with_ci(chars: &[char], needle: &str) -> bool {
    chars.len() >= needle.len()
        && chars
            .iter()
            .zip(needle.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
}
