//! Runtime evaluation errors.
//!
//! Every error aborts the whole evaluation and surfaces to the caller of
//! [`Evaluator::eval`](super::Evaluator::eval). An operand that short-circuit
//! evaluation never reaches cannot raise one.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An identifier no hook, static parameter or dynamic parameter resolved.
    #[error("Parameter '{name}' not defined")]
    ParameterNotDefined { name: String },

    /// A call no hook, registered function or built-in resolved.
    #[error("Function not found: '{name}'")]
    FunctionNotFound { name: String },

    /// A value could not be coerced for an operator.
    #[error("Cannot convert {from} to {to} for operator '{operator}'")]
    TypeConversion {
        from: &'static str,
        to: &'static str,
        operator: String,
    },

    /// Checked arithmetic overflowed, or a protected float result became infinite.
    #[error("Arithmetic operation resulted in an overflow")]
    ArithmeticOverflow,

    #[error("Attempted to divide by zero")]
    DivideByZero,

    /// A built-in or registered function was called with unusable arguments.
    #[error("{function}() {message}")]
    InvalidArguments { function: String, message: String },

    /// Any other evaluation failure, including errors raised by host callbacks.
    #[error("{0}")]
    Evaluation(String),
}

impl EvalError {
    pub fn conversion(from: &'static str, to: &'static str, operator: impl Into<String>) -> Self {
        EvalError::TypeConversion {
            from,
            to,
            operator: operator.into(),
        }
    }

    pub fn invalid_arguments(function: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::InvalidArguments {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Stable code for documentation lookup, alongside the parser's `P` codes.
    pub fn code(&self) -> &'static str {
        match self {
            EvalError::ParameterNotDefined { .. } => "E001",
            EvalError::FunctionNotFound { .. } => "E002",
            EvalError::TypeConversion { .. } => "E003",
            EvalError::ArithmeticOverflow => "E004",
            EvalError::DivideByZero => "E005",
            EvalError::InvalidArguments { .. } => "E006",
            EvalError::Evaluation(_) => "E999",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let err = EvalError::ParameterNotDefined {
            name: "undefinedName".to_string(),
        };
        assert_eq!(err.to_string(), "Parameter 'undefinedName' not defined");

        let err = EvalError::conversion("String", "Double", "+");
        assert_eq!(err.to_string(), "Cannot convert String to Double for operator '+'");

        let err = EvalError::invalid_arguments("Abs", "takes exactly 1 argument");
        assert_eq!(err.to_string(), "Abs() takes exactly 1 argument");
    }
}
