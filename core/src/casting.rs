//! Coercions of dynamic values into the primitive an operator works on.
//!
//! Logical operators need a boolean, bitwise operators an unsigned 64-bit
//! integer and shifts a 32-bit count. These conversions are deliberately
//! narrower than the numeric coercions in [`crate::numeric`]: each accepts
//! only the source values the operator can give a meaning to.

use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;

use crate::api::Culture;
use crate::evaluator::EvalError;
use crate::numeric::Number;
use crate::values::Value;

/// Truthiness for `and`, `or`, `not` and conditions.
///
/// Null is false, numbers are true when non-zero and strings must spell
/// `true` or `false` in any case.
pub fn to_bool(value: &Value, operator: &str) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        Value::String(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(EvalError::conversion("String", "Boolean", operator))
            }
        }
        other => match Number::from_value(other) {
            Some(number) => Ok(!number.is_zero()),
            None => Err(EvalError::conversion(other.type_name(), "Boolean", operator)),
        },
    }
}

/// Operand of a bitwise operator.
///
/// Real numbers are rounded half to even first. Negative or out-of-range
/// values overflow.
pub fn to_u64(value: &Value, operator: &str, culture: &Culture) -> Result<u64, EvalError> {
    let number = match value {
        Value::Null => return Ok(0),
        Value::Bool(b) => return Ok(u64::from(*b)),
        Value::Char(c) => return Ok(u64::from(u32::from(*c))),
        Value::String(text) => culture
            .normalize_number(text)
            .parse::<u64>()
            .map_err(|_| EvalError::conversion("String", "UInt64", operator))?,
        other => {
            let number = Number::from_value(other)
                .ok_or_else(|| EvalError::conversion(other.type_name(), "UInt64", operator))?;
            return integral(number).ok_or(EvalError::ArithmeticOverflow);
        }
    };
    Ok(number)
}

/// Right operand of a shift.
pub fn to_i32(value: &Value, operator: &str, culture: &Culture) -> Result<i32, EvalError> {
    match value {
        Value::String(text) => culture
            .normalize_number(text)
            .parse::<i32>()
            .map_err(|_| EvalError::conversion("String", "Int32", operator)),
        Value::Bool(b) => Ok(i32::from(*b)),
        other => {
            let number = Number::from_value(other)
                .ok_or_else(|| EvalError::conversion(other.type_name(), "Int32", operator))?;
            let value = match number {
                Number::Decimal(d) => d
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                    .to_i32(),
                Number::F32(_) | Number::F64(_) => {
                    let f = number.to_f64().round_ties_even();
                    (f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)).then_some(f as i32)
                }
                other => other.to_i64().and_then(|v| i32::try_from(v).ok()),
            };
            value.ok_or(EvalError::ArithmeticOverflow)
        }
    }
}

fn integral(number: Number) -> Option<u64> {
    match number {
        Number::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_u64(),
        Number::F32(_) | Number::F64(_) => {
            let f = number.to_f64().round_ties_even();
            (f >= 0.0 && f < u64::MAX as f64).then_some(f as u64)
        }
        other => other.to_u64(),
    }
}
