//! Single- and two-operand math functions backing the built-in calls.
//!
//! `Abs`, `Ceiling`, `Floor`, `Truncate`, `Round` and `Sign` work in the base
//! representation, so they stay exact under decimal arithmetic. The
//! transcendental functions always compute in `f64`. A null operand yields
//! null.

use rust_decimal::prelude::{MathematicalOps, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::{MathOptions, Number, coerce};
use crate::api::ExpressionOptions;
use crate::evaluator::EvalError;
use crate::values::Value;

enum Base {
    Decimal(Decimal),
    Double(f64),
}

fn base(value: &Value, function: &str, options: &MathOptions) -> Result<Base, EvalError> {
    let number = coerce(value, options, function)?;
    if options.decimal_as_default() {
        number
            .to_decimal()
            .map(Base::Decimal)
            .ok_or_else(|| EvalError::conversion(number.type_name(), "Decimal", function))
    } else {
        Ok(Base::Double(number.to_f64()))
    }
}

fn double(value: &Value, function: &str, options: &MathOptions) -> Result<f64, EvalError> {
    Ok(coerce(value, options, function)?.to_f64())
}

fn map_base(
    value: &Value,
    function: &str,
    options: &MathOptions,
    on_decimal: impl FnOnce(Decimal) -> Decimal,
    on_double: impl FnOnce(f64) -> f64,
) -> Result<Value, EvalError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    Ok(match base(value, function, options)? {
        Base::Decimal(v) => Value::Decimal(on_decimal(v)),
        Base::Double(v) => Value::F64(on_double(v)),
    })
}

fn map_double(
    value: &Value,
    function: &str,
    options: &MathOptions,
    op: impl FnOnce(f64) -> f64,
) -> Result<Value, EvalError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    Ok(Value::F64(op(double(value, function, options)?)))
}

fn map_double2(
    a: &Value,
    b: &Value,
    function: &str,
    options: &MathOptions,
    op: impl FnOnce(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    if a.is_null() || b.is_null() {
        return Ok(Value::Null);
    }
    let x = double(a, function, options)?;
    let y = double(b, function, options)?;
    Ok(Value::F64(op(x, y)))
}

pub fn abs(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_base(value, "Abs", options, |v| v.abs(), f64::abs)
}

pub fn ceiling(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_base(value, "Ceiling", options, |v| v.ceil(), f64::ceil)
}

pub fn floor(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_base(value, "Floor", options, |v| v.floor(), f64::floor)
}

pub fn truncate(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_base(value, "Truncate", options, |v| v.trunc(), f64::trunc)
}

/// Rounds to `digits` fractional digits.
///
/// Midpoints go to the even neighbour unless
/// [`ExpressionOptions::ROUND_AWAY_FROM_ZERO`] is set.
pub fn round(value: &Value, digits: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let digits = coerce(digits, options, "Round")?;
    let digits = match digits {
        Number::Decimal(d) => d.trunc().to_i64(),
        Number::F32(_) | Number::F64(_) => Some(digits.to_f64().trunc() as i64),
        other => other.to_i64(),
    };
    let away = options
        .flags
        .contains(ExpressionOptions::ROUND_AWAY_FROM_ZERO);

    match base(value, "Round", options)? {
        Base::Decimal(v) => {
            let digits = digits
                .filter(|d| (0..=28).contains(d))
                .ok_or_else(|| EvalError::invalid_arguments("Round", "digits must be between 0 and 28"))?;
            let strategy = if away {
                RoundingStrategy::MidpointAwayFromZero
            } else {
                RoundingStrategy::MidpointNearestEven
            };
            Ok(Value::Decimal(v.round_dp_with_strategy(digits as u32, strategy)))
        }
        Base::Double(v) => {
            let digits = digits
                .filter(|d| (0..=15).contains(d))
                .ok_or_else(|| EvalError::invalid_arguments("Round", "digits must be between 0 and 15"))?;
            let scale = 10f64.powi(digits as i32);
            let scaled = v * scale;
            let rounded = if away {
                scaled.round()
            } else {
                scaled.round_ties_even()
            };
            Ok(Value::F64(if scaled.is_finite() { rounded / scale } else { v }))
        }
    }
}

/// -1, 0 or 1 as a 32-bit integer.
pub fn sign(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let sign = match base(value, "Sign", options)? {
        Base::Decimal(v) if v.is_zero() => 0,
        Base::Decimal(v) if v.is_sign_negative() => -1,
        Base::Decimal(_) => 1,
        Base::Double(v) if v.is_nan() => {
            return Err(EvalError::invalid_arguments("Sign", "does not accept NaN"));
        }
        Base::Double(v) if v == 0.0 => 0,
        Base::Double(v) if v < 0.0 => -1,
        Base::Double(_) => 1,
    };
    Ok(Value::I32(sign))
}

pub fn acos(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Acos", options, f64::acos)
}

pub fn asin(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Asin", options, f64::asin)
}

pub fn atan(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Atan", options, f64::atan)
}

pub fn atan2(y: &Value, x: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double2(y, x, "Atan2", options, f64::atan2)
}

pub fn cos(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Cos", options, f64::cos)
}

pub fn sin(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Sin", options, f64::sin)
}

pub fn tan(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Tan", options, f64::tan)
}

pub fn exp(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Exp", options, f64::exp)
}

/// Natural logarithm.
pub fn ln(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Ln", options, f64::ln)
}

/// Logarithm of `value` in `base`.
pub fn log(value: &Value, base: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double2(value, base, "Log", options, f64::log)
}

pub fn log10(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Log10", options, f64::log10)
}

pub fn sqrt(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double(value, "Sqrt", options, f64::sqrt)
}

/// IEEE 754 remainder: `x - y * round_ties_even(x / y)`.
pub fn ieee_remainder(x: &Value, y: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    map_double2(x, y, "IEEERemainder", options, |x, y| {
        x - y * (x / y).round_ties_even()
    })
}

/// Exponentiation.
///
/// Under decimal arithmetic an integral exponent is applied exactly; any
/// other exponent, or a decimal overflow, falls back to `f64`.
pub fn pow(base_value: &Value, exponent: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    if base_value.is_null() || exponent.is_null() {
        return Ok(Value::Null);
    }
    let x = coerce(base_value, options, "Pow")?;
    let y = coerce(exponent, options, "Pow")?;

    if options.decimal_as_default() {
        let integral = match y {
            Number::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            Number::F32(_) | Number::F64(_) => {
                let f = y.to_f64();
                (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
            }
            other => other.to_i64(),
        };
        if let (Some(d), Some(e)) = (x.to_decimal(), integral) {
            if let Some(result) = d.checked_powi(e) {
                return Ok(Value::Decimal(result));
            }
        }
    }

    let result = x.to_f64().powf(y.to_f64());
    if options.overflow_protection() && result.is_infinite() {
        return Err(EvalError::ArithmeticOverflow);
    }
    Ok(Value::F64(result))
}
