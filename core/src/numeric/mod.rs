//! Arithmetic, comparison and math functions over dynamically-typed values.
//!
//! There is no single canonical numeric type. Arithmetic first coerces each
//! operand into a *base representation*, fixed-point [`Decimal`] when
//! [`ExpressionOptions::DECIMAL_AS_DEFAULT`] is set and `f64` otherwise.
//! Comparisons and `Min`/`Max` instead promote the pair to the
//! higher-ranked of the two representations (see [`Number::promote`]).
//!
//! All functions are pure; behavior is controlled by [`MathOptions`].

mod arithmetic;
mod compare;
mod functions;
mod number;


pub use arithmetic::{add, divide, max, min, modulo, multiply, negate, subtract};
pub use compare::{compare, compare_strings};
pub use functions::*;
pub use number::{Number, Rank};

use core::str::FromStr;

use rust_decimal::Decimal;

use crate::api::{Culture, ExpressionOptions};
use crate::evaluator::EvalError;
use crate::values::Value;

/// The option subset the numeric functions consult.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MathOptions {
    pub flags: ExpressionOptions,
    pub culture: Culture,
}

impl MathOptions {
    pub fn new(flags: ExpressionOptions, culture: Culture) -> Self {
        Self { flags, culture }
    }

    pub fn decimal_as_default(&self) -> bool {
        self.flags.contains(ExpressionOptions::DECIMAL_AS_DEFAULT)
    }

    pub fn overflow_protection(&self) -> bool {
        self.flags.contains(ExpressionOptions::OVERFLOW_PROTECTION)
    }

    pub fn allow_boolean_calculation(&self) -> bool {
        self.flags.contains(ExpressionOptions::ALLOW_BOOLEAN_CALCULATION)
    }

    pub fn allow_char_values(&self) -> bool {
        self.flags.contains(ExpressionOptions::ALLOW_CHAR_VALUES)
    }

    fn base_type_name(&self) -> &'static str {
        if self.decimal_as_default() {
            "Decimal"
        } else {
            "Double"
        }
    }

    fn base_from_f64(&self, value: f64) -> Number {
        if self.decimal_as_default() {
            Decimal::try_from(value)
                .map(Number::Decimal)
                .unwrap_or(Number::F64(value))
        } else {
            Number::F64(value)
        }
    }
}

/// Maps an operand to a number.
///
/// Numbers pass through unchanged. Strings are parsed with the culture's
/// separators into the base representation. Characters are their code point
/// when [`ExpressionOptions::ALLOW_CHAR_VALUES`] is set and a one-character
/// numeric string otherwise. Booleans are 1/0 only when
/// [`ExpressionOptions::ALLOW_BOOLEAN_CALCULATION`] is set.
pub fn coerce(value: &Value, options: &MathOptions, operator: &str) -> Result<Number, EvalError> {
    if let Some(number) = Number::from_value(value) {
        return Ok(number);
    }
    let to = options.base_type_name();
    match value {
        Value::String(text) => parse_number(text, options)
            .ok_or_else(|| EvalError::conversion("String", to, operator)),
        Value::Char(c) if options.allow_char_values() => {
            Ok(options.base_from_f64(f64::from(u32::from(*c))))
        }
        Value::Char(c) => parse_number(c.encode_utf8(&mut [0; 4]), options)
            .ok_or_else(|| EvalError::conversion("Char", to, operator)),
        Value::Bool(b) if options.allow_boolean_calculation() => {
            Ok(options.base_from_f64(if *b { 1.0 } else { 0.0 }))
        }
        other => Err(EvalError::conversion(other.type_name(), to, operator)),
    }
}

/// Parses culture-formatted text into the base representation.
pub fn parse_number(text: &str, options: &MathOptions) -> Option<Number> {
    let normalized = options.culture.normalize_number(text);
    if normalized.is_empty() {
        return None;
    }
    if options.decimal_as_default() {
        if let Some(value) = Decimal::from_str(&normalized)
            .ok()
            .or_else(|| Decimal::from_scientific(&normalized).ok())
        {
            return Some(Number::Decimal(value));
        }
    }
    normalized.parse::<f64>().ok().map(|v| options.base_from_f64(v))
}

/// Parses culture-formatted text exactly when possible: integers and
/// decimals become `Decimal`, anything else `f64`.
pub(crate) fn parse_exact(text: &str, culture: &Culture) -> Option<Number> {
    let normalized = culture.normalize_number(text);
    Decimal::from_str(&normalized)
        .ok()
        .map(Number::Decimal)
        .or_else(|| normalized.parse::<f64>().ok().map(Number::F64))
}
