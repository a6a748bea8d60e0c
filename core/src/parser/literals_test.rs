use chrono::{NaiveDate, TimeDelta};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use crate::parser::literals::{
    NumberParts, Radix, datetime_literal, guid_literal, number_literal, radix_literal,
    temporal_from_text, unescape_string,
};
use crate::parser::{Literal, ParseErrorKind, format_time_span};

fn parts<'a>(integral: &'a str, fraction: Option<&'a str>, exponent: Option<&'a str>) -> NumberParts<'a> {
    NumberParts {
        integral,
        fraction,
        exponent,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_integers_default_to_int64() {
    assert_eq!(number_literal(&parts("42", None, None), false), Ok(Literal::Int(42)));
    assert_eq!(
        number_literal(&parts("42", None, None), true),
        Ok(Literal::Decimal(Decimal::from(42)))
    );
}

#[test]
fn test_integer_overflow_widens() {
    // One past i64::MAX still fits a decimal.
    assert_eq!(
        number_literal(&parts("9223372036854775808", None, None), false),
        Ok(Literal::Decimal("9223372036854775808".parse().unwrap()))
    );
    let huge = "1".repeat(40);
    assert!(matches!(
        number_literal(&parts(&huge, None, None), false),
        Ok(Literal::Float(v)) if v > 1e39
    ));
}

#[test]
fn test_fractions_and_exponents() {
    assert_eq!(number_literal(&parts("3", Some("25"), None), false), Ok(Literal::Float(3.25)));
    assert_eq!(number_literal(&parts("", Some("5"), None), false), Ok(Literal::Float(0.5)));
    assert_eq!(number_literal(&parts("1", Some("5"), Some("2")), false), Ok(Literal::Float(150.0)));
    assert_eq!(
        number_literal(&parts("1", None, Some("400")), false),
        Ok(Literal::Float(f64::INFINITY))
    );
}

#[test]
fn test_decimal_mode_keeps_exact_digits() {
    assert_eq!(
        number_literal(&parts("0", Some("1"), None), true),
        Ok(Literal::Decimal("0.1".parse().unwrap()))
    );
    assert_eq!(
        number_literal(&parts("1", Some("5"), Some("2")), true),
        Ok(Literal::Decimal(Decimal::from(150)))
    );
    assert_eq!(
        number_literal(&parts("25", None, Some("-3")), true),
        Ok(Literal::Decimal("0.025".parse().unwrap()))
    );
    assert_eq!(
        number_literal(&parts("1", None, Some("40")), true),
        Ok(Literal::Float(f64::INFINITY))
    );
}

#[test]
fn test_radix_literals() {
    assert_eq!(radix_literal("0x1F", Radix::Hex, false), Ok(Literal::Int(31)));
    assert_eq!(radix_literal("0b101", Radix::Binary, false), Ok(Literal::Int(5)));
    assert_eq!(radix_literal("0o17", Radix::Octal, true), Ok(Literal::Decimal(Decimal::from(15))));
    // Full 64-bit patterns wrap into the signed range.
    assert_eq!(radix_literal("0xFFFFFFFFFFFFFFFF", Radix::Hex, false), Ok(Literal::Int(-1)));
    assert!(matches!(
        radix_literal("0x1FFFFFFFFFFFFFFFF", Radix::Hex, false),
        Err(ParseErrorKind::InvalidNumber { .. })
    ));
}

#[test]
fn test_dates() {
    assert_eq!(
        datetime_literal("01/02/2020"),
        Ok(Literal::DateTime(date(2020, 1, 2).and_hms_opt(0, 0, 0).unwrap()))
    );
    assert_eq!(
        datetime_literal("2020/01/02 10:30:15"),
        Ok(Literal::DateTime(date(2020, 1, 2).and_hms_opt(10, 30, 15).unwrap()))
    );
    assert_eq!(
        datetime_literal(" 12/31/99 "),
        Ok(Literal::DateTime(date(1999, 12, 31).and_hms_opt(0, 0, 0).unwrap()))
    );
    assert_eq!(
        datetime_literal("3/4/05"),
        Ok(Literal::DateTime(date(2005, 3, 4).and_hms_opt(0, 0, 0).unwrap()))
    );
}

#[test]
fn test_time_of_day_is_a_span() {
    assert_eq!(
        datetime_literal("01:30:00"),
        Ok(Literal::TimeSpan(TimeDelta::minutes(90)))
    );
}

#[test]
fn test_malformed_dates() {
    for body in ["13/45/2020", "2020-01-02", "1/2/2020 25:00:00", "", "1/2/2020 1:00:00 x"] {
        assert!(
            matches!(datetime_literal(body), Err(ParseErrorKind::InvalidFormat { .. })),
            "{body:?}"
        );
    }
}

#[test]
fn test_temporal_from_text_accepts_iso() {
    assert_eq!(
        temporal_from_text("2021-06-01T08:00:00"),
        Some(Literal::DateTime(date(2021, 6, 1).and_hms_opt(8, 0, 0).unwrap()))
    );
    assert_eq!(
        temporal_from_text("2021-06-01"),
        Some(Literal::DateTime(date(2021, 6, 1).and_hms_opt(0, 0, 0).unwrap()))
    );
    assert_eq!(
        temporal_from_text("6/1/2021"),
        Some(Literal::DateTime(date(2021, 6, 1).and_hms_opt(0, 0, 0).unwrap()))
    );
    assert_eq!(temporal_from_text("tomorrow"), None);
}

#[test]
fn test_format_time_span() {
    assert_eq!(format_time_span(&TimeDelta::seconds(3725)), "01:02:05");
    assert_eq!(format_time_span(&TimeDelta::seconds(90_000)), "1.01:00:00");
    assert_eq!(format_time_span(&TimeDelta::seconds(-60)), "-00:01:00");
}

#[test]
fn test_guids() {
    let dashed = guid_literal("6F9619FF-8B86-D011-B42D-00C04FC964FF").unwrap();
    let compact = guid_literal("6F9619FF8B86D011B42D00C04FC964FF").unwrap();
    assert_eq!(dashed, compact);
}

#[test]
fn test_unescape() {
    assert_eq!(unescape_string("plain").unwrap(), "plain");
    assert_eq!(unescape_string(r"a\nb\tc").unwrap(), "a\nb\tc");
    assert_eq!(unescape_string(r"it\'s A").unwrap(), "it's A");
    assert_eq!(
        unescape_string(r"\q"),
        Err(ParseErrorKind::InvalidEscape {
            sequence: r"\q".to_string()
        })
    );
    assert!(unescape_string(r"\u12").is_err());
}
