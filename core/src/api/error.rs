//! Public error types.
//!
//! Parsing reports a [`ParseError`], evaluation an [`EvalError`]. Callers
//! that go through [`Engine`](super::Engine) or
//! [`Expression`](super::Expression) see both folded into [`Error`].

use core::fmt;

use thiserror::Error;

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};

/// Public error type for all operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The expression text could not be parsed.
    #[error("{0}")]
    Compilation(#[from] ParseError),

    /// Evaluation failed.
    #[error("{0}")]
    Runtime(#[from] EvalError),
}

impl Error {
    /// Source text of the failing expression, when the error carries it.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Compilation(err) => Some(&err.source),
            Error::Runtime(_) => None,
        }
    }
}

/// A diagnostic message with source location.
///
/// Maps cleanly to editor diagnostics and to the terminal renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Suggestions for fixing the issue.
    pub help: Vec<String>,

    /// Error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ExpressionOptions;
    use crate::parser::parse;

    #[test]
    fn test_error_wraps_both_phases() {
        let parse_error = parse("1 +", ExpressionOptions::empty()).unwrap_err();
        let error = Error::from(parse_error.clone());
        assert_eq!(error.to_string(), parse_error.to_string());
        assert_eq!(error.source_text(), Some("1 +"));

        let error = Error::from(EvalError::DivideByZero);
        assert_eq!(error.to_string(), "Attempted to divide by zero");
        assert_eq!(error.source_text(), None);
    }
}
