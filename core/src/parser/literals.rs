//! Literal decoding: numbers, `#...#` dates, GUIDs and quoted strings.
//!
//! The grammar only recognizes the shape of a literal; the functions here
//! turn the matched text into a [`Literal`], reporting malformed content as
//! a [`ParseErrorKind`] that the caller attaches to the literal's span.

use core::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::parser::{Literal, ParseErrorKind};

/// Digits of a decimal-notation number as matched by the grammar.
#[derive(Debug, Default)]
pub(crate) struct NumberParts<'a> {
    /// Digits before the point, empty for `.5`.
    pub integral: &'a str,
    /// Digits after the point, without the point itself.
    pub fraction: Option<&'a str>,
    /// Exponent digits with optional sign, without the `e`.
    pub exponent: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Radix {
    Hex,
    Binary,
    Octal,
}

impl Radix {
    fn base(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Binary => 2,
            Radix::Octal => 8,
        }
    }
}

/// `0x`/`0b`/`0o` literals: unsigned magnitude reinterpreted as signed 64-bit.
pub(crate) fn radix_literal(
    text: &str,
    radix: Radix,
    prefer_decimal: bool,
) -> Result<Literal, ParseErrorKind> {
    let digits = &text[2..];
    let magnitude = u64::from_str_radix(digits, radix.base()).map_err(|_| {
        ParseErrorKind::InvalidNumber {
            text: text.to_string(),
        }
    })?;
    let value = magnitude as i64;
    Ok(if prefer_decimal {
        Literal::Decimal(Decimal::from(value))
    } else {
        Literal::Int(value)
    })
}

pub(crate) fn number_literal(
    parts: &NumberParts<'_>,
    prefer_decimal: bool,
) -> Result<Literal, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidNumber {
        text: render(parts),
    };

    if parts.fraction.is_none() && parts.exponent.is_none() {
        return integer_literal(parts.integral, prefer_decimal).ok_or_else(invalid);
    }

    let exponent = match parts.exponent {
        Some(text) => parse_exponent(text),
        None => 0,
    };

    if prefer_decimal {
        let integral = if parts.integral.is_empty() {
            "0"
        } else {
            parts.integral
        };
        let mantissa_text = match parts.fraction {
            Some(fraction) => format!("{integral}.{fraction}"),
            None => integral.to_string(),
        };
        if let Ok(mantissa) = Decimal::from_str(&mantissa_text) {
            return Ok(scale_decimal(mantissa, exponent));
        }
    }

    // Rust's float parser is correctly rounded and saturates to infinity.
    render(parts)
        .parse::<f64>()
        .map(Literal::Float)
        .map_err(|_| invalid())
}

fn integer_literal(digits: &str, prefer_decimal: bool) -> Option<Literal> {
    if prefer_decimal {
        return match Decimal::from_str(digits) {
            Ok(value) => Some(Literal::Decimal(value)),
            Err(_) => digits.parse::<f64>().ok().map(Literal::Float),
        };
    }
    if let Ok(value) = digits.parse::<i64>() {
        return Some(Literal::Int(value));
    }
    if let Ok(value) = Decimal::from_str(digits) {
        return Some(Literal::Decimal(value));
    }
    digits.parse::<f64>().ok().map(Literal::Float)
}

/// Exponents far beyond any representable magnitude are clamped; the result
/// saturates either way.
fn parse_exponent(text: &str) -> i64 {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits.parse::<i64>().unwrap_or(i64::from(i32::MAX));
    let magnitude = magnitude.min(i64::from(i32::MAX));
    if negative { -magnitude } else { magnitude }
}

/// Applies a power of ten to an exact decimal. Overflow resolves to a signed
/// float infinity; underflow rounds toward zero.
fn scale_decimal(mantissa: Decimal, exponent: i64) -> Literal {
    const TEN: Decimal = Decimal::TEN;
    const MAX_SCALE: u64 = 28;

    if mantissa.is_zero() {
        return Literal::Decimal(mantissa);
    }

    let mut value = mantissa;
    if exponent >= 0 {
        for _ in 0..exponent {
            match value.checked_mul(TEN) {
                Some(next) => value = next,
                None => {
                    let infinity = if mantissa.is_sign_negative() {
                        f64::NEG_INFINITY
                    } else {
                        f64::INFINITY
                    };
                    return Literal::Float(infinity);
                }
            }
        }
        return Literal::Decimal(value.normalize());
    }

    let shift = exponent.unsigned_abs();
    let target_scale = u64::from(value.scale()) + shift;
    if target_scale <= MAX_SCALE {
        value.set_scale(target_scale as u32).ok();
        return Literal::Decimal(value);
    }
    for _ in 0..shift {
        value /= TEN;
        if value.is_zero() {
            break;
        }
    }
    Literal::Decimal(value)
}

fn render(parts: &NumberParts<'_>) -> String {
    let mut text = String::from(parts.integral);
    if let Some(fraction) = parts.fraction {
        text.push('.');
        text.push_str(fraction);
    }
    if let Some(exponent) = parts.exponent {
        text.push('e');
        text.push_str(exponent);
    }
    if text.starts_with('.') {
        text.insert(0, '0');
    }
    text
}

// ============================================================================
// Dates and times
// ============================================================================

/// Decodes the body of a `#...#` literal.
pub(crate) fn datetime_literal(body: &str) -> Result<Literal, ParseErrorKind> {
    let text = body.trim();
    let format_error = |message: &str| ParseErrorKind::InvalidFormat {
        text: text.to_string(),
        message: message.to_string(),
    };

    let mut pieces = text.split_whitespace();
    let (first, second) = (pieces.next(), pieces.next());
    if pieces.next().is_some() {
        return Err(format_error("expected a date, a time, or a date followed by a time"));
    }

    match (first, second) {
        (Some(date), Some(time)) => {
            let date = parse_date(date).map_err(|m| format_error(m))?;
            let time = parse_time_of_day(time).map_err(|m| format_error(m))?;
            Ok(Literal::DateTime(NaiveDateTime::new(date, time)))
        }
        (Some(single), None) if single.contains('/') => {
            let date = parse_date(single).map_err(|m| format_error(m))?;
            Ok(Literal::DateTime(date.and_time(NaiveTime::default())))
        }
        (Some(single), None) if single.contains(':') => {
            let time = parse_time_of_day(single).map_err(|m| format_error(m))?;
            let span = time.signed_duration_since(NaiveTime::default());
            Ok(Literal::TimeSpan(span))
        }
        _ => Err(format_error("expected a date, a time, or a date followed by a time")),
    }
}

/// Reads a date, date-time or time of day from free text, accepting ISO 8601
/// forms in addition to the `#...#` literal syntax.
pub(crate) fn temporal_from_text(text: &str) -> Option<Literal> {
    let text = text.trim();
    const DATE_TIMES: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
    if let Some(value) = DATE_TIMES
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(Literal::DateTime(value));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(Literal::DateTime(date.and_time(NaiveTime::default())));
    }
    datetime_literal(text).ok()
}

fn components<'a>(text: &'a str, separator: char) -> Result<[&'a str; 3], &'static str> {
    let parts: Vec<&str> = text.split(separator).collect();
    match parts.as_slice() {
        [a, b, c] if is_digits(a) && is_digits(b) && is_digits(c) => Ok([*a, *b, *c]),
        _ => Err("components must be three groups of digits"),
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn number(text: &str) -> Result<u32, &'static str> {
    text.parse().map_err(|_| "component out of range")
}

fn parse_date(text: &str) -> Result<NaiveDate, &'static str> {
    let [a, b, c] = components(text, '/')?;
    // Year-first when the leading group has four digits, month-first otherwise.
    let (year_text, month, day) = if a.len() == 4 {
        (a, number(b)?, number(c)?)
    } else {
        (c, number(a)?, number(b)?)
    };
    let mut year = number(year_text)? as i32;
    if year_text.len() <= 2 {
        year += if year < 50 { 2000 } else { 1900 };
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or("date out of range")
}

fn parse_time_of_day(text: &str) -> Result<NaiveTime, &'static str> {
    let [h, m, s] = components(text, ':')?;
    NaiveTime::from_hms_opt(number(h)?, number(m)?, number(s)?).ok_or("time out of range")
}

/// Renders a span as `[-][d.]hh:mm:ss`.
pub fn format_time_span(span: &TimeDelta) -> String {
    let sign = if *span < TimeDelta::zero() { "-" } else { "" };
    let total = span.num_seconds().unsigned_abs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let clock = format!("{:02}:{:02}:{:02}", rest / 3600, (rest / 60) % 60, rest % 60);
    if days > 0 {
        format!("{sign}{days}.{clock}")
    } else {
        format!("{sign}{clock}")
    }
}

// ============================================================================
// GUIDs
// ============================================================================

pub(crate) fn guid_literal(text: &str) -> Result<Literal, ParseErrorKind> {
    Uuid::parse_str(text)
        .map(Literal::Guid)
        .map_err(|e| ParseErrorKind::InvalidFormat {
            text: text.to_string(),
            message: e.to_string(),
        })
}

// ============================================================================
// Strings
// ============================================================================

/// Processes escape sequences of a quoted literal body.
pub(crate) fn unescape_string(input: &str) -> Result<String, ParseErrorKind> {
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let scalar = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match scalar {
                    Some(c) => c,
                    None => {
                        return Err(ParseErrorKind::InvalidEscape {
                            sequence: format!("\\u{hex}"),
                        });
                    }
                }
            }
            Some(other) => {
                return Err(ParseErrorKind::InvalidEscape {
                    sequence: format!("\\{other}"),
                });
            }
            None => {
                return Err(ParseErrorKind::InvalidEscape {
                    sequence: "\\".to_string(),
                });
            }
        };
        output.push(escaped);
    }

    Ok(output)
}
