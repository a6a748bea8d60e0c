//! Reckon - an embeddable expression evaluator
//!
//! # Overview
//!
//! Reckon parses and evaluates formula-style expressions such as
//! `Round(price * (1 + [tax rate]), 2)` or `status in ('open', 'pending')`
//! inside a host application. Common use cases include:
//!
//! - Spreadsheet-style computed fields
//! - Validation and business rules
//! - Filters over records supplied by the host
//!
//! # Quick Start
//!
//! ```
//! use reckon::{Engine, Environment, ExpressionOptions, Value};
//!
//! let engine = Engine::new();
//! let env = Environment::new()
//!     .with_options(ExpressionOptions::DECIMAL_AS_DEFAULT)
//!     .with_parameter("price", 20)
//!     .with_function("Greet", |call| Ok(Value::from(format!("Hello, {}!", call.arg(0)?))));
//!
//! let total = engine.compile("Round(price * 1.075, 2)", env.clone()).unwrap();
//! assert_eq!(total.evaluate().unwrap().to_string(), "21.50");
//!
//! let greeting = engine.compile("Greet([who])", env.with_parameter("who", "Ada")).unwrap();
//! assert_eq!(greeting.evaluate().unwrap(), Value::from("Hello, Ada!"));
//! assert_eq!(greeting.parameter_names(), vec!["who"]);
//! assert_eq!(greeting.function_names(), vec!["Greet"]);
//! ```
//!
//! # Errors
//!
//! Parse errors carry the failing span and render with [`render_error`];
//! evaluation errors are plain [`EvalError`] values wrapped in [`Error`].

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from reckon_core
pub use reckon_core::api::{
    Culture, Diagnostic, DynamicParameter, Engine, Environment, Error, Expression,
    ExpressionOptions, Function, FunctionCall, FunctionHook, Parameter, ParameterCall,
    ParameterHook, Severity,
};

pub use reckon_core::numeric;
pub use reckon_core::parser::{self, Expr, ParseError};
pub use reckon_core::values::{self, Value};
pub use reckon_core::visitor::{self, FunctionCollector, ParameterCollector, Visitor};

// Re-export errors
pub use reckon_core::evaluator::EvalError;
