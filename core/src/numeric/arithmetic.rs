use core::cmp::Ordering;

use rust_decimal::Decimal;

use super::{MathOptions, Number, coerce};
use crate::evaluator::EvalError;
use crate::values::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operation {
    fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Modulo => "%",
        }
    }
}

pub fn add(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    perform(a, b, Operation::Add, options)
}

pub fn subtract(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    perform(a, b, Operation::Subtract, options)
}

pub fn multiply(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    perform(a, b, Operation::Multiply, options)
}

/// Division never truncates: two integers divide as `f64` unless decimal
/// arithmetic is the default.
pub fn divide(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    perform(a, b, Operation::Divide, options)
}

/// Remainder runs in decimal unless both operands are already floating point.
pub fn modulo(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    perform(a, b, Operation::Modulo, options)
}

fn perform(
    a: &Value,
    b: &Value,
    operation: Operation,
    options: &MathOptions,
) -> Result<Value, EvalError> {
    if a.is_null() || b.is_null() {
        return Ok(Value::Null);
    }
    let symbol = operation.symbol();
    let x = coerce(a, options, symbol)?;
    let y = coerce(b, options, symbol)?;

    let both_float = matches!(x, Number::F32(_) | Number::F64(_))
        && matches!(y, Number::F32(_) | Number::F64(_));
    let use_decimal = options.decimal_as_default() || operation == Operation::Modulo;

    if use_decimal && !(operation == Operation::Modulo && both_float) {
        let x = as_decimal(x, symbol)?;
        let y = as_decimal(y, symbol)?;
        decimal_op(x, y, operation).map(Value::Decimal)
    } else {
        float_op(x.to_f64(), y.to_f64(), operation, options).map(Value::F64)
    }
}

fn as_decimal(number: Number, operator: &str) -> Result<Decimal, EvalError> {
    number
        .to_decimal()
        .ok_or_else(|| EvalError::conversion(number.type_name(), "Decimal", operator))
}

fn decimal_op(x: Decimal, y: Decimal, operation: Operation) -> Result<Decimal, EvalError> {
    let result = match operation {
        Operation::Add => x.checked_add(y),
        Operation::Subtract => x.checked_sub(y),
        Operation::Multiply => x.checked_mul(y),
        Operation::Divide | Operation::Modulo if y.is_zero() => {
            return Err(EvalError::DivideByZero);
        }
        Operation::Divide => x.checked_div(y),
        Operation::Modulo => x.checked_rem(y),
    };
    result.ok_or(EvalError::ArithmeticOverflow)
}

fn float_op(x: f64, y: f64, operation: Operation, options: &MathOptions) -> Result<f64, EvalError> {
    let result = match operation {
        Operation::Add => x + y,
        Operation::Subtract => x - y,
        Operation::Multiply => x * y,
        Operation::Divide => x / y,
        Operation::Modulo => x % y,
    };
    if options.overflow_protection() {
        let divides = matches!(operation, Operation::Divide | Operation::Modulo);
        if divides && y == 0.0 && result.is_nan() {
            return Err(EvalError::DivideByZero);
        }
        if result.is_infinite() {
            return Err(EvalError::ArithmeticOverflow);
        }
    }
    Ok(result)
}

/// Arithmetic negation.
///
/// Signed integers keep their representation. Anything else is computed as
/// `0 - value` and so follows the subtraction rules.
pub fn negate(value: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    macro_rules! negate_int {
        ($variant:ident, $v:expr) => {
            match $v.checked_neg() {
                Some(v) => Ok(Value::$variant(v)),
                None if options.overflow_protection() => Err(EvalError::ArithmeticOverflow),
                None => Ok(Value::$variant($v.wrapping_neg())),
            }
        };
    }
    match *value {
        Value::Null => Ok(Value::Null),
        Value::I8(v) => negate_int!(I8, v),
        Value::I16(v) => negate_int!(I16, v),
        Value::I32(v) => negate_int!(I32, v),
        Value::I64(v) => negate_int!(I64, v),
        Value::F32(v) => Ok(Value::F32(-v)),
        Value::F64(v) => Ok(Value::F64(-v)),
        Value::Decimal(v) => Ok(Value::Decimal(-v)),
        _ => subtract(&Value::I32(0), value, options),
    }
}

/// The larger operand after rank promotion.
pub fn max(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    pick(a, b, "Max", Ordering::Greater, options)
}

/// The smaller operand after rank promotion.
pub fn min(a: &Value, b: &Value, options: &MathOptions) -> Result<Value, EvalError> {
    pick(a, b, "Min", Ordering::Less, options)
}

fn pick(
    a: &Value,
    b: &Value,
    function: &str,
    wanted: Ordering,
    options: &MathOptions,
) -> Result<Value, EvalError> {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ok(Value::Null),
        // A missing operand leaves the other one as the result.
        (true, false) => return Ok(coerce(b, options, function)?.into_value()),
        (false, true) => return Ok(coerce(a, options, function)?.into_value()),
        (false, false) => {}
    }
    let x = coerce(a, options, function)?;
    let y = coerce(b, options, function)?;
    let (x, y) = Number::promote(x, y)
        .ok_or_else(|| EvalError::conversion(x.type_name(), y.type_name(), function))?;
    let winner = match Number::compare(x, y) {
        Some(Ordering::Equal) => x,
        Some(ordering) if ordering == wanted => x,
        Some(_) => y,
        // NaN wins
        None if x.to_f64().is_nan() => x,
        None => y,
    };
    Ok(winner.into_value())
}
