//! Public API for embedding the expression language.
//!
//! An [`Engine`] parses text (with a cache), an [`Environment`] supplies
//! parameters, functions, hooks and options, and an [`Expression`] binds the
//! two for evaluation.
//!
//! # Example
//!
//! ```
//! use reckon_core::api::{Engine, Environment, ExpressionOptions};
//! use reckon_core::values::Value;
//!
//! let engine = Engine::new();
//! let env = Environment::new()
//!     .with_options(ExpressionOptions::DECIMAL_AS_DEFAULT)
//!     .with_parameter("price", 10)
//!     .with_dynamic_parameter("rate", |_| Ok(Value::from(0.25)));
//!
//! let total = engine.evaluate("price * (1 + rate)", &env).unwrap();
//! assert_eq!(total.to_string(), "12.50");
//! ```

pub mod engine;
pub mod environment;
pub mod error;
pub mod expression;
pub mod options;

pub use engine::Engine;
pub use environment::{
    DynamicParameter, Environment, Function, FunctionCall, FunctionHook, Parameter,
    ParameterCall, ParameterHook,
};
pub use error::{Diagnostic, Error, Severity};
pub use expression::Expression;
pub use options::{Culture, ExpressionOptions};
