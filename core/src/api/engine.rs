//! The parsing and evaluation entry point.

use std::sync::Arc;

use super::{Environment, Error, Expression, ExpressionOptions};
use crate::cache::ExpressionCache;
use crate::parser::{self, Expr, ParseError};
use crate::values::Value;

/// Parses expression text, reusing trees for text it has seen before.
///
/// An engine is meant to be created once by the embedding application and
/// shared; all methods take `&self` and are safe to call from several
/// threads.
///
/// ```
/// use reckon_core::api::{Engine, Environment};
/// use reckon_core::values::Value;
///
/// let engine = Engine::new();
/// let value = engine.evaluate("2 + 3 * 4", &Environment::new()).unwrap();
/// assert_eq!(value, Value::F64(14.0));
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    cache: ExpressionCache,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// Parses `text`, consulting the cache first.
    ///
    /// The cache is skipped when [`ExpressionOptions::NO_CACHE`] is set or
    /// when a flag changes how literals parse.
    pub fn parse(&self, text: &str, options: ExpressionOptions) -> Result<Arc<Expr>, ParseError> {
        let cacheable = !options.contains(ExpressionOptions::NO_CACHE) && !options.affects_parsing();
        if cacheable {
            if let Some(ast) = self.cache.try_get(text) {
                tracing::trace!(text, "Expression cache hit");
                return Ok(ast);
            }
        }

        let ast = Arc::new(parser::parse(text, options)?);
        if cacheable {
            self.cache.set(text, &ast);
        }
        Ok(ast)
    }

    /// Parses `text` with the environment's options and binds it.
    pub fn compile(&self, text: &str, environment: Environment) -> Result<Expression, Error> {
        let ast = self.parse(text, environment.options())?;
        Ok(Expression::new(text, ast, environment))
    }

    pub fn evaluate(&self, text: &str, environment: &Environment) -> Result<Value, Error> {
        let ast = self.parse(text, environment.options())?;
        Ok(crate::evaluator::Evaluator::new(environment).eval(&ast)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_text_reuses_the_tree() {
        let engine = Engine::new();
        let first = engine.parse("a + b", ExpressionOptions::empty()).unwrap();
        let second = engine.parse("a + b", ExpressionOptions::empty()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_no_cache_and_literal_flags_bypass_the_cache() {
        let engine = Engine::new();
        let first = engine.parse("1.5", ExpressionOptions::NO_CACHE).unwrap();
        let second = engine.parse("1.5", ExpressionOptions::NO_CACHE).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(engine.cache().is_empty());

        let float = engine.parse("1.5", ExpressionOptions::empty()).unwrap();
        let decimal = engine
            .parse("1.5", ExpressionOptions::DECIMAL_AS_DEFAULT)
            .unwrap();
        assert_ne!(*float, *decimal);
    }

    #[test]
    fn test_errors_carry_their_phase() {
        let engine = Engine::new();
        let env = Environment::new();
        assert!(matches!(engine.evaluate("1 +", &env), Err(Error::Compilation(_))));
        assert!(matches!(engine.evaluate("missing", &env), Err(Error::Runtime(_))));
    }
}
