use chrono::{NaiveDate, TimeDelta};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use super::Value;
use crate::api::Culture;
use crate::parser::Literal;

#[test]
fn test_display() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::I64(-3).to_string(), "-3");
    assert_eq!(Value::F64(2.5).to_string(), "2.5");
    assert_eq!(Value::F64(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::F64(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Value::Decimal(Decimal::new(1250, 2)).to_string(), "12.50");
    assert_eq!(Value::from("text").to_string(), "text");
    assert_eq!(
        Value::from(vec![Value::I64(1), Value::from("a")]).to_string(),
        "(1, a)"
    );
}

#[test]
fn test_display_temporal() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(13, 5, 0)
        .unwrap();
    assert_eq!(Value::DateTime(date).to_string(), "2024-02-29 13:05:00");
    assert_eq!(
        Value::TimeSpan(TimeDelta::hours(26) + TimeDelta::seconds(7)).to_string(),
        "1.02:00:07"
    );
}

#[test]
fn test_to_text_uses_culture_separator() {
    let german = Culture::new(',', '.');
    assert_eq!(Value::F64(1.5).to_text(&german), "1,5");
    assert_eq!(Value::I64(15).to_text(&german), "15");
}

#[test]
fn test_numeric_equality_crosses_representations() {
    assert_eq!(Value::I64(14), Value::F64(14.0));
    assert_eq!(Value::U8(1), Value::Decimal(Decimal::ONE));
    assert_ne!(Value::I64(1), Value::Bool(true));
    assert_ne!(Value::from("1"), Value::I64(1));
    assert_ne!(Value::F64(f64::NAN), Value::F64(f64::NAN));
}

#[test]
fn test_conversions() {
    assert_eq!(Value::from(Some(3i32)), Value::I32(3));
    assert!(Value::from(None::<i32>).is_null());
    assert_eq!(Value::from(&Literal::Int(7)), Value::I64(7));

    let list: Value = (1..=3).map(Value::I64).collect();
    assert_eq!(list.as_list().map(<[Value]>::len), Some(3));
    assert_eq!(Value::F32(0.5).as_f64(), Some(0.5));
    assert_eq!(Value::U64(u64::MAX).as_i64(), None);
    assert_eq!(Value::I32(2).type_name(), "Int32");
}
