//! Numeric built-ins, thin wrappers over [`crate::numeric`].

use super::{expect_args, math_options};
use crate::api::FunctionCall;
use crate::evaluator::EvalError;
use crate::numeric;
use crate::values::Value;

macro_rules! unary_builtin {
    ($($name:ident),* $(,)?) => {
        $(
            pub(super) fn $name(call: &FunctionCall<'_>) -> Result<Value, EvalError> {
                expect_args(call, 1)?;
                numeric::$name(&call.arg(0)?, &math_options(call))
            }
        )*
    };
}

macro_rules! binary_builtin {
    ($($name:ident),* $(,)?) => {
        $(
            pub(super) fn $name(call: &FunctionCall<'_>) -> Result<Value, EvalError> {
                expect_args(call, 2)?;
                numeric::$name(&call.arg(0)?, &call.arg(1)?, &math_options(call))
            }
        )*
    };
}

unary_builtin!(
    abs, acos, asin, atan, ceiling, cos, exp, floor, ln, log10, sign, sin, sqrt, tan, truncate,
);

binary_builtin!(atan2, ieee_remainder, log, max, min, pow);

/// `Round(x)` or `Round(x, digits)`.
pub(super) fn round(call: &FunctionCall<'_>) -> Result<Value, EvalError> {
    let digits = match call.args.len() {
        1 => Value::I32(0),
        2 => call.arg(1)?,
        n => {
            return Err(EvalError::invalid_arguments(
                call.name,
                format!("takes 1 or 2 arguments, got {n}"),
            ));
        }
    };
    numeric::round(&call.arg(0)?, &digits, &math_options(call))
}
