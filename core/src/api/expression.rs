//! Parsed expressions bound to an environment.

use std::sync::Arc;

use super::{Environment, Error};
use crate::evaluator::Evaluator;
use crate::parser::Expr;
use crate::values::Value;
use crate::visitor::{FunctionCollector, ParameterCollector};

/// A parsed expression ready for repeated evaluation.
///
/// The tree is shared, so cloning an `Expression` or evaluating it from
/// several threads never copies or mutates the AST.
///
/// ```
/// use reckon_core::api::{Engine, Environment};
/// use reckon_core::values::Value;
///
/// let engine = Engine::new();
/// let env = Environment::new().with_parameter("x", 4);
/// let expr = engine.compile("x * 2 + 1", env).unwrap();
/// assert_eq!(expr.evaluate().unwrap(), Value::F64(9.0));
/// assert_eq!(expr.parameter_names(), vec!["x"]);
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    source: Arc<str>,
    ast: Arc<Expr>,
    environment: Environment,
}

impl Expression {
    pub fn new(source: impl Into<Arc<str>>, ast: Arc<Expr>, environment: Environment) -> Self {
        Self {
            source: source.into(),
            ast,
            environment,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Arc<Expr> {
        &self.ast
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Evaluates against the bound environment.
    pub fn evaluate(&self) -> Result<Value, Error> {
        Ok(Evaluator::new(&self.environment).eval(&self.ast)?)
    }

    /// Evaluates against another environment, leaving the bound one untouched.
    pub fn evaluate_with(&self, environment: &Environment) -> Result<Value, Error> {
        Ok(Evaluator::new(environment).eval(&self.ast)?)
    }

    /// Distinct identifiers referenced, in order of first occurrence.
    pub fn parameter_names(&self) -> Vec<String> {
        ParameterCollector::collect(&self.ast)
    }

    /// Distinct function names called, in order of first occurrence.
    pub fn function_names(&self) -> Vec<String> {
        FunctionCollector::collect(&self.ast)
    }
}
