use core::fmt;

use once_cell::unsync::OnceCell;

use super::{EvalError, Evaluator};
use crate::parser::Expr;
use crate::values::Value;

/// A call argument that is evaluated on first use, at most once.
///
/// Functions receive their arguments unevaluated, so a callee decides
/// whether each one runs at all. An argument that is never asked for never
/// raises its errors.
pub struct LazyArg<'a> {
    expr: &'a Expr,
    evaluator: Evaluator<'a>,
    result: OnceCell<Result<Value, EvalError>>,
}

impl<'a> LazyArg<'a> {
    pub(crate) fn new(expr: &'a Expr, evaluator: Evaluator<'a>) -> Self {
        Self {
            expr,
            evaluator,
            result: OnceCell::new(),
        }
    }

    /// The argument's value, evaluating it on the first call.
    pub fn value(&self) -> Result<Value, EvalError> {
        self.result
            .get_or_init(|| self.evaluator.eval(self.expr))
            .clone()
    }

    /// The unevaluated argument.
    pub fn expr(&self) -> &'a Expr {
        self.expr
    }

    pub fn is_evaluated(&self) -> bool {
        self.result.get().is_some()
    }
}

impl fmt::Debug for LazyArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArg")
            .field("expr", &format_args!("{}", self.expr))
            .field("result", &self.result.get())
            .finish()
    }
}
