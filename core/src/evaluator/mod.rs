//! Tree-walking evaluator.
//!
//! [`Evaluator::eval`] interprets a parsed [`Expr`](crate::parser::Expr)
//! against an [`Environment`](crate::api::Environment) and produces a
//! [`Value`](crate::values::Value).
//!
//! ## Design Principles
//!
//! - **Lazy**: `and`/`or` short-circuit, a ternary evaluates one branch and
//!   call arguments are evaluated only when the callee asks for them.
//! - **Read-only**: the tree is never mutated, so one tree can be evaluated
//!   from several threads at once.
//! - **No recovery**: the first error aborts the evaluation.
//!
//! ## Example
//!
//! ```
//! use reckon_core::api::{Environment, ExpressionOptions};
//! use reckon_core::evaluator::Evaluator;
//! use reckon_core::parser::parse;
//! use reckon_core::values::Value;
//!
//! let expr = parse("x > 3 ? 'big' : 'small'", ExpressionOptions::empty()).unwrap();
//! let env = Environment::new().with_parameter("x", 5);
//! assert_eq!(Evaluator::new(&env).eval(&expr).unwrap(), Value::from("big"));
//! ```

mod error;
mod eval;
mod lazy;
mod operators;


pub use error::EvalError;
pub use eval::Evaluator;
pub use lazy::LazyArg;
