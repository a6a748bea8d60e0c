//! Conditional and membership built-ins. These evaluate their arguments
//! selectively.

use core::cmp::Ordering;

use super::{expect_args, math_options};
use crate::api::{ExpressionOptions, FunctionCall};
use crate::casting::to_bool;
use crate::evaluator::EvalError;
use crate::numeric;
use crate::values::Value;

/// `if(condition, then, else)`: only the chosen branch is evaluated.
pub(super) fn if_(call: &FunctionCall<'_>) -> Result<Value, EvalError> {
    expect_args(call, 3)?;
    if to_bool(&call.arg(0)?, call.name)? {
        call.arg(1)
    } else {
        call.arg(2)
    }
}

/// `ifs(c1, v1, c2, v2, ..., default)`: the value of the first true
/// condition, or the default.
pub(super) fn ifs(call: &FunctionCall<'_>) -> Result<Value, EvalError> {
    let count = call.args.len();
    if count < 3 || count % 2 == 0 {
        return Err(EvalError::invalid_arguments(
            call.name,
            "takes condition/value pairs followed by a default (an odd number of at least 3 arguments)",
        ));
    }
    for pair in (0..count - 1).step_by(2) {
        if to_bool(&call.arg(pair)?, call.name)? {
            return call.arg(pair + 1);
        }
    }
    call.arg(count - 1)
}

/// `in(value, c1, c2, ...)`: whether any candidate equals the value.
/// Candidates after the first match are not evaluated.
pub(super) fn in_(call: &FunctionCall<'_>) -> Result<Value, EvalError> {
    if call.args.len() < 2 {
        return Err(EvalError::invalid_arguments(
            call.name,
            "takes a value and at least one candidate",
        ));
    }
    let needle = call.arg(0)?;
    let strict = call
        .environment
        .options()
        .contains(ExpressionOptions::STRICT_TYPE_MATCHING);
    let math = math_options(call);

    for index in 1..call.args.len() {
        let candidate = call.arg(index)?;
        if strict && core::mem::discriminant(&needle) != core::mem::discriminant(&candidate) {
            continue;
        }
        match numeric::compare(&needle, &candidate, call.name, &math) {
            Ok(Some(Ordering::Equal)) => return Ok(Value::Bool(true)),
            Ok(_) | Err(EvalError::TypeConversion { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(Value::Bool(false))
}
