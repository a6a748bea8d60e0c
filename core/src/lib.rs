//! Core of the reckon expression language: parser, values, numeric type
//! system, evaluator, built-in functions and the parse cache.
//!
//! Most embedders only need [`api`]:
//!
//! ```
//! use reckon_core::api::{Engine, Environment};
//!
//! let engine = Engine::new();
//! let value = engine.evaluate("2 ** 3 ** 2", &Environment::new()).unwrap();
//! assert_eq!(value.to_string(), "512");
//! ```

pub mod api;
pub mod cache;
pub mod casting;
pub mod evaluator;
pub mod numeric;
pub mod parser;
pub mod stdlib;
pub mod values;
pub mod visitor;
