//! Operator semantics over already-evaluated operands.
//!
//! `and`/`or` never reach these functions: they short-circuit in the
//! evaluator.

use core::cmp::Ordering;

use regex::Regex;

use crate::api::{Environment, ExpressionOptions};
use crate::casting::{to_bool, to_i32, to_u64};
use crate::evaluator::EvalError;
use crate::numeric;
use crate::parser::{BinaryOp, UnaryOp};
use crate::values::Value;

pub(super) fn unary(op: UnaryOp, value: &Value, env: &Environment) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Negate => numeric::negate(value, &env.math_options()),
        UnaryOp::Not => Ok(Value::Bool(!to_bool(value, op.symbol())?)),
        UnaryOp::BitwiseNot => Ok(Value::U64(!to_u64(value, op.symbol(), &env.culture())?)),
    }
}

pub(super) fn binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    env: &Environment,
) -> Result<Value, EvalError> {
    let math = env.math_options();
    match op {
        BinaryOp::Plus => plus(left, right, env),
        BinaryOp::Minus => minus(left, right, env),
        BinaryOp::Times => numeric::multiply(left, right, &math),
        BinaryOp::Div => numeric::divide(left, right, &math),
        BinaryOp::Modulo => numeric::modulo(left, right, &math),
        BinaryOp::Exponent => numeric::pow(left, right, &math),

        BinaryOp::And | BinaryOp::Or => {
            unreachable!("`{}` short-circuits in the evaluator", op.symbol())
        }

        BinaryOp::BitwiseAnd | BinaryOp::BitwiseOr | BinaryOp::BitwiseXor => {
            bitwise(op, left, right, env)
        }
        BinaryOp::LeftShift | BinaryOp::RightShift => {
            let value = to_u64(left, op.symbol(), &env.culture())?;
            let count = (to_i32(right, op.symbol(), &env.culture())? & 63) as u32;
            Ok(Value::U64(if op == BinaryOp::LeftShift {
                value << count
            } else {
                value >> count
            }))
        }

        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::Greater
        | BinaryOp::GreaterOrEqual
        | BinaryOp::Lesser
        | BinaryOp::LesserOrEqual => compare(op, left, right, env).map(Value::Bool),

        BinaryOp::In => contains(right, left, env).map(Value::Bool),
        BinaryOp::NotIn => contains(right, left, env).map(|found| Value::Bool(!found)),
        BinaryOp::Like => like(left, right, env).map(Value::Bool),
        BinaryOp::NotLike => like(left, right, env).map(|matched| Value::Bool(!matched)),
    }
}

// ============================================================================
// Arithmetic with dates and text
// ============================================================================

fn plus(left: &Value, right: &Value, env: &Environment) -> Result<Value, EvalError> {
    if env.options().contains(ExpressionOptions::STRING_CONCAT) {
        let culture = env.culture();
        let mut text = left.to_text(&culture);
        text.push_str(&right.to_text(&culture));
        return Ok(Value::from(text));
    }
    match (left, right) {
        (Value::DateTime(date), Value::TimeSpan(span))
        | (Value::TimeSpan(span), Value::DateTime(date)) => date
            .checked_add_signed(*span)
            .map(Value::DateTime)
            .ok_or(EvalError::ArithmeticOverflow),
        (Value::TimeSpan(a), Value::TimeSpan(b)) => a
            .checked_add(b)
            .map(Value::TimeSpan)
            .ok_or(EvalError::ArithmeticOverflow),
        (Value::String(a), Value::String(b)) => {
            match numeric::add(left, right, &env.math_options()) {
                Err(EvalError::TypeConversion { .. }) => {
                    let mut text = a.clone();
                    text.push_str(b);
                    Ok(Value::String(text))
                }
                result => result,
            }
        }
        _ => numeric::add(left, right, &env.math_options()),
    }
}

fn minus(left: &Value, right: &Value, env: &Environment) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::DateTime(date), Value::TimeSpan(span)) => date
            .checked_sub_signed(*span)
            .map(Value::DateTime)
            .ok_or(EvalError::ArithmeticOverflow),
        (Value::DateTime(a), Value::DateTime(b)) => Ok(Value::TimeSpan(a.signed_duration_since(*b))),
        (Value::TimeSpan(a), Value::TimeSpan(b)) => a
            .checked_sub(b)
            .map(Value::TimeSpan)
            .ok_or(EvalError::ArithmeticOverflow),
        _ => numeric::subtract(left, right, &env.math_options()),
    }
}

// ============================================================================
// Bitwise
// ============================================================================

fn bitwise(op: BinaryOp, left: &Value, right: &Value, env: &Environment) -> Result<Value, EvalError> {
    if let (Value::Bool(a), Value::Bool(b)) = (left, right) {
        return Ok(Value::Bool(match op {
            BinaryOp::BitwiseAnd => a & b,
            BinaryOp::BitwiseOr => a | b,
            _ => a ^ b,
        }));
    }
    let culture = env.culture();
    let a = to_u64(left, op.symbol(), &culture)?;
    let b = to_u64(right, op.symbol(), &culture)?;
    Ok(Value::U64(match op {
        BinaryOp::BitwiseAnd => a & b,
        BinaryOp::BitwiseOr => a | b,
        _ => a ^ b,
    }))
}

// ============================================================================
// Comparison, membership and patterns
// ============================================================================

fn compare(op: BinaryOp, left: &Value, right: &Value, env: &Environment) -> Result<bool, EvalError> {
    if env.options().contains(ExpressionOptions::STRICT_TYPE_MATCHING)
        && core::mem::discriminant(left) != core::mem::discriminant(right)
    {
        return Ok(op == BinaryOp::NotEqual);
    }
    let ordering = numeric::compare(left, right, op.symbol(), &env.math_options())?;
    Ok(match op {
        BinaryOp::Equal => ordering == Some(Ordering::Equal),
        BinaryOp::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOp::Greater => ordering == Some(Ordering::Greater),
        BinaryOp::GreaterOrEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinaryOp::Lesser => ordering == Some(Ordering::Less),
        BinaryOp::LesserOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        _ => false,
    })
}

/// Membership in a list by element equality, or substring containment.
///
/// An element whose type cannot be compared with the needle is not a match.
fn contains(haystack: &Value, needle: &Value, env: &Environment) -> Result<bool, EvalError> {
    match haystack {
        Value::List(items) => {
            for item in items.iter() {
                match compare(BinaryOp::Equal, needle, item, env) {
                    Ok(true) => return Ok(true),
                    Ok(false) | Err(EvalError::TypeConversion { .. }) => {}
                    Err(err) => return Err(err),
                }
            }
            Ok(false)
        }
        Value::String(text) => {
            let needle = needle.to_text(&env.culture());
            Ok(text.contains(needle.as_str()))
        }
        other => Err(EvalError::Evaluation(format!(
            "Operator 'in' expects a list or a string, found {}",
            other.type_name()
        ))),
    }
}

/// SQL-style pattern match: `%` is any run of characters, `_` exactly one.
fn like(value: &Value, pattern: &Value, env: &Environment) -> Result<bool, EvalError> {
    if value.is_null() || pattern.is_null() {
        return Ok(false);
    }
    let culture = env.culture();
    let text = value.to_text(&culture);
    let regex = like_regex(
        &pattern.to_text(&culture),
        env.options()
            .contains(ExpressionOptions::CASE_INSENSITIVE_STRING_COMPARER),
    )?;
    Ok(regex.is_match(&text))
}

fn like_regex(pattern: &str, ignore_case: bool) -> Result<Regex, EvalError> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str(if ignore_case { "(?si)^" } else { "(?s)^" });
    for c in pattern.chars() {
        match c {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');
    Regex::new(&source).map_err(|e| EvalError::Evaluation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_regex_escapes_metacharacters() {
        let regex = like_regex("a.b%", false).unwrap();
        assert!(regex.is_match("a.bcd"));
        assert!(!regex.is_match("axbcd"));

        let regex = like_regex("_x_", true).unwrap();
        assert!(regex.is_match("AXB"));
        assert!(!regex.is_match("xx"));
    }

    #[test]
    #[should_panic(expected = "short-circuits in the evaluator")]
    fn test_logical_operators_are_not_dispatched_here() {
        let env = Environment::new();
        let _ = binary(BinaryOp::And, &Value::Bool(true), &Value::Bool(false), &env);
    }
}
