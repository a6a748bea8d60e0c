//! Built-in function library.
//!
//! Built-ins are the last stop of call resolution, after the function hook
//! and the environment's registered functions. Names match exactly unless
//! [`ExpressionOptions::IGNORE_CASE_AT_BUILTIN_FUNCTIONS`] is set.
//!
//! Every built-in receives lazy arguments; the numeric ones evaluate all of
//! them, while `if`, `ifs` and `in` evaluate only what they need.

mod logic;
mod math;

use crate::api::{ExpressionOptions, FunctionCall};
use crate::evaluator::EvalError;
use crate::numeric::MathOptions;
use crate::values::Value;

type Builtin = fn(&FunctionCall<'_>) -> Result<Value, EvalError>;

const BUILTINS: &[(&str, Builtin)] = &[
    ("Abs", math::abs),
    ("Acos", math::acos),
    ("Asin", math::asin),
    ("Atan", math::atan),
    ("Atan2", math::atan2),
    ("Ceiling", math::ceiling),
    ("Cos", math::cos),
    ("Exp", math::exp),
    ("Floor", math::floor),
    ("IEEERemainder", math::ieee_remainder),
    ("Ln", math::ln),
    ("Log", math::log),
    ("Log10", math::log10),
    ("Max", math::max),
    ("Min", math::min),
    ("Pow", math::pow),
    ("Round", math::round),
    ("Sign", math::sign),
    ("Sin", math::sin),
    ("Sqrt", math::sqrt),
    ("Tan", math::tan),
    ("Truncate", math::truncate),
    ("if", logic::if_),
    ("ifs", logic::ifs),
    ("in", logic::in_),
];

/// Runs the built-in named by `call`, or `None` when there is none.
pub fn call_builtin(call: &FunctionCall<'_>) -> Option<Result<Value, EvalError>> {
    let ignore_case = call
        .environment
        .options()
        .contains(ExpressionOptions::IGNORE_CASE_AT_BUILTIN_FUNCTIONS);
    let (_, builtin) = BUILTINS.iter().find(|(name, _)| {
        if ignore_case {
            name.eq_ignore_ascii_case(call.name)
        } else {
            *name == call.name
        }
    })?;
    Some(builtin(call))
}

/// Names of all built-in functions.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

fn expect_args(call: &FunctionCall<'_>, count: usize) -> Result<(), EvalError> {
    if call.args.len() == count {
        return Ok(());
    }
    let plural = if count == 1 { "" } else { "s" };
    Err(EvalError::invalid_arguments(
        call.name,
        format!("takes exactly {count} argument{plural}, got {}", call.args.len()),
    ))
}

fn math_options(call: &FunctionCall<'_>) -> MathOptions {
    MathOptions::new(call.environment.options(), call.environment.culture())
}
