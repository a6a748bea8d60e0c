use core::cmp::Ordering;

use uuid::Uuid;

use super::{MathOptions, Number, parse_exact};
use crate::api::ExpressionOptions;
use crate::evaluator::EvalError;
use crate::parser::{Literal, temporal_from_text};
use crate::values::Value;

/// Orders two values for a comparison operator.
///
/// Null sorts before everything else and equals only null. Numbers compare
/// after rank promotion, booleans against numbers as 1/0, and strings are
/// parsed when compared with numbers, booleans, dates or GUIDs. Lists only
/// support equality. `Ok(None)` means the pair is unordered (a NaN operand or
/// two different lists), so every comparison but `!=` is false.
pub fn compare(
    a: &Value,
    b: &Value,
    operator: &str,
    options: &MathOptions,
) -> Result<Option<Ordering>, EvalError> {
    let mismatch = || EvalError::conversion(a.type_name(), b.type_name(), operator);

    let ordering = match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,

        (Value::String(x), Value::String(y)) => compare_strings(x, y, options.flags),
        (Value::Char(x), Value::Char(y)) => x.cmp(y),
        (Value::Char(x), Value::String(y)) => {
            compare_strings(x.encode_utf8(&mut [0; 4]), y, options.flags)
        }
        (Value::String(x), Value::Char(y)) => {
            compare_strings(x, y.encode_utf8(&mut [0; 4]), options.flags)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::TimeSpan(x), Value::TimeSpan(y)) => x.cmp(y),
        (Value::Guid(x), Value::Guid(y)) => x.cmp(y),

        (Value::List(x), Value::List(y)) => {
            if x.len() != y.len() {
                return Ok(None);
            }
            for (p, q) in x.iter().zip(y.iter()) {
                if compare(p, q, operator, options)? != Some(Ordering::Equal) {
                    return Ok(None);
                }
            }
            Ordering::Equal
        }

        (Value::String(text), other) | (other, Value::String(text)) => {
            let parsed = parse_as(text, other, options).ok_or_else(mismatch)?;
            let ordering = if matches!(a, Value::String(_)) {
                compare(&parsed, other, operator, options)?
            } else {
                compare(other, &parsed, operator, options)?
            };
            return Ok(ordering);
        }

        _ => {
            let x = operand_number(a).ok_or_else(mismatch)?;
            let y = operand_number(b).ok_or_else(mismatch)?;
            if Number::promote(x, y).is_none() {
                return Err(mismatch());
            }
            return Ok(Number::compare(x, y));
        }
    };
    Ok(Some(ordering))
}

/// Numbers as themselves, booleans as 1/0, characters as their code point.
fn operand_number(value: &Value) -> Option<Number> {
    match value {
        Value::Bool(b) => Some(Number::I32(i32::from(*b))),
        Value::Char(c) => Some(Number::U32(u32::from(*c))),
        other => Number::from_value(other),
    }
}

/// Reads `text` as a value comparable with `other`.
fn parse_as(text: &str, other: &Value, options: &MathOptions) -> Option<Value> {
    match other {
        Value::Bool(_) => {
            if text.trim().eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if text.trim().eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        Value::DateTime(_) | Value::TimeSpan(_) => match temporal_from_text(text)? {
            Literal::DateTime(v) => Some(Value::DateTime(v)),
            Literal::TimeSpan(v) => Some(Value::TimeSpan(v)),
            _ => None,
        },
        Value::Guid(_) => Uuid::parse_str(text.trim()).ok().map(Value::Guid),
        other if other.is_numeric() => {
            parse_exact(text, &options.culture).map(Number::into_value)
        }
        _ => None,
    }
}

/// Compares strings with the comparer the flags select.
///
/// The default is culture-aware: case-insensitive primary order, with
/// lowercase sorting before uppercase when the texts differ only in case.
/// Ordinal comparison uses code point order.
pub fn compare_strings(a: &str, b: &str, flags: ExpressionOptions) -> Ordering {
    let ignore_case = flags.contains(ExpressionOptions::CASE_INSENSITIVE_STRING_COMPARER);
    let ordinal = flags.contains(ExpressionOptions::ORDINAL_STRING_COMPARER);
    let folded = || {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    };
    match (ordinal, ignore_case) {
        (true, false) => a.cmp(b),
        (true, true) => a
            .chars()
            .flat_map(char::to_uppercase)
            .cmp(b.chars().flat_map(char::to_uppercase)),
        (false, true) => folded(),
        (false, false) => folded().then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        }),
    }
}
