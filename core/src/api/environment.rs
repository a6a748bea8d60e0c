//! The resolution context an expression is evaluated against.

use core::fmt;
use std::sync::Arc;

use ecow::EcoString;
use hashbrown::HashMap;

use super::{Culture, Expression, ExpressionOptions};
use crate::evaluator::{EvalError, LazyArg};
use crate::numeric::MathOptions;
use crate::parser::CorrelationId;
use crate::values::Value;

/// Computes a parameter value on demand.
pub type DynamicParameter =
    Arc<dyn Fn(&ParameterCall<'_>) -> Result<Value, EvalError> + Send + Sync>;

/// A host function callable from expressions.
pub type Function = Arc<dyn Fn(&FunctionCall<'_>) -> Result<Value, EvalError> + Send + Sync>;

/// Consulted before any table lookup for an identifier. `Some` claims the result.
pub type ParameterHook =
    Arc<dyn Fn(&ParameterCall<'_>) -> Result<Option<Value>, EvalError> + Send + Sync>;

/// Consulted before any table lookup for a call. `Some` claims the result.
pub type FunctionHook =
    Arc<dyn Fn(&FunctionCall<'_>) -> Result<Option<Value>, EvalError> + Send + Sync>;

/// A statically bound parameter.
#[derive(Clone)]
pub enum Parameter {
    Value(Value),
    /// Evaluated on each reference, sharing the referencing expression's
    /// parameters and hooks.
    Expression(Expression),
}

impl From<Value> for Parameter {
    fn from(value: Value) -> Self {
        Parameter::Value(value)
    }
}

impl From<Expression> for Parameter {
    fn from(expression: Expression) -> Self {
        Parameter::Expression(expression)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Parameter::Expression(e) => f.debug_tuple("Expression").field(&e.source()).finish(),
        }
    }
}

/// An identifier being resolved.
pub struct ParameterCall<'a> {
    pub name: &'a str,
    pub id: CorrelationId,
    pub environment: &'a Environment,
}

/// A function call being resolved. Arguments are evaluated only when asked.
pub struct FunctionCall<'a> {
    pub name: &'a str,
    pub id: CorrelationId,
    pub args: &'a [LazyArg<'a>],
    pub environment: &'a Environment,
}

impl FunctionCall<'_> {
    /// Evaluates argument `index`, failing when it was not supplied.
    pub fn arg(&self, index: usize) -> Result<Value, EvalError> {
        match self.args.get(index) {
            Some(arg) => arg.value(),
            None => Err(EvalError::invalid_arguments(
                self.name,
                format!("expects at least {} argument(s)", index + 1),
            )),
        }
    }
}

/// Parameters, functions, hooks and options for evaluation.
///
/// Cloning is cheap: the tables are shared until one of the clones is
/// modified.
///
/// ```
/// use reckon_core::api::{Environment, ExpressionOptions};
/// use reckon_core::values::Value;
///
/// let env = Environment::new()
///     .with_options(ExpressionOptions::DECIMAL_AS_DEFAULT)
///     .with_parameter("x", 2)
///     .with_function("double", |call| {
///         let value = call.arg(0)?;
///         Ok(Value::from(value.as_f64().unwrap_or_default() * 2.0))
///     });
/// assert!(env.parameter("x").is_some());
/// ```
#[derive(Clone, Default)]
pub struct Environment {
    parameters: Arc<HashMap<EcoString, Parameter>>,
    dynamic_parameters: Arc<HashMap<EcoString, DynamicParameter>>,
    functions: Arc<HashMap<EcoString, Function>>,
    parameter_hook: Option<ParameterHook>,
    function_hook: Option<FunctionHook>,
    options: ExpressionOptions,
    culture: Culture,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_options(mut self, options: ExpressionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn with_parameter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Binds `name` to an expression evaluated on each reference.
    pub fn with_expression_parameter(mut self, name: &str, expression: Expression) -> Self {
        self.bind(name, Parameter::Expression(expression));
        self
    }

    pub fn with_dynamic_parameter<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&ParameterCall<'_>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.dynamic_parameters).insert(name.into(), Arc::new(f));
        self
    }

    pub fn with_function<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&FunctionCall<'_>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.functions).insert(name.into(), Arc::new(f));
        self
    }

    pub fn with_parameter_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParameterCall<'_>) -> Result<Option<Value>, EvalError> + Send + Sync + 'static,
    {
        self.parameter_hook = Some(Arc::new(f));
        self
    }

    pub fn with_function_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(&FunctionCall<'_>) -> Result<Option<Value>, EvalError> + Send + Sync + 'static,
    {
        self.function_hook = Some(Arc::new(f));
        self
    }

    /// Binds or rebinds a static parameter.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<Value>) {
        self.bind(name, Parameter::Value(value.into()));
    }

    pub fn bind(&mut self, name: &str, parameter: Parameter) {
        Arc::make_mut(&mut self.parameters).insert(name.into(), parameter);
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<Parameter> {
        Arc::make_mut(&mut self.parameters).remove(name)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn dynamic_parameter(&self, name: &str) -> Option<&DynamicParameter> {
        self.dynamic_parameters.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn parameter_hook(&self) -> Option<&ParameterHook> {
        self.parameter_hook.as_ref()
    }

    pub fn function_hook(&self) -> Option<&FunctionHook> {
        self.function_hook.as_ref()
    }

    pub fn options(&self) -> ExpressionOptions {
        self.options
    }

    pub fn culture(&self) -> Culture {
        self.culture
    }

    pub(crate) fn math_options(&self) -> MathOptions {
        MathOptions::new(self.options, self.culture)
    }

    /// This environment with `outer`'s parameter tables and hooks layered on
    /// top of its own.
    ///
    /// Used for a parameter bound to an expression: it keeps its own options
    /// and functions, sees its own bindings, and resolves anything the outer
    /// expression also binds the way the outer expression would. Outer hooks
    /// run first and the expression's own hooks see whatever they decline.
    pub(crate) fn inherit(&self, outer: &Environment) -> Environment {
        Environment {
            parameters: layered(&self.parameters, &outer.parameters),
            dynamic_parameters: layered(&self.dynamic_parameters, &outer.dynamic_parameters),
            parameter_hook: chain_parameter_hooks(&outer.parameter_hook, &self.parameter_hook),
            function_hook: chain_function_hooks(&outer.function_hook, &self.function_hook),
            functions: Arc::clone(&self.functions),
            options: self.options,
            culture: self.culture,
        }
    }
}

/// `inner` with every entry of `outer` inserted over it.
fn layered<V: Clone>(
    inner: &Arc<HashMap<EcoString, V>>,
    outer: &Arc<HashMap<EcoString, V>>,
) -> Arc<HashMap<EcoString, V>> {
    if inner.is_empty() {
        return Arc::clone(outer);
    }
    if outer.is_empty() {
        return Arc::clone(inner);
    }
    let mut merged = HashMap::clone(inner);
    merged.extend(outer.iter().map(|(k, v)| (k.clone(), v.clone())));
    Arc::new(merged)
}

fn chain_parameter_hooks(
    first: &Option<ParameterHook>,
    second: &Option<ParameterHook>,
) -> Option<ParameterHook> {
    match (first, second) {
        (Some(first), Some(second)) => {
            let (first, second) = (Arc::clone(first), Arc::clone(second));
            let chained: ParameterHook = Arc::new(move |call: &ParameterCall<'_>| match first(call)? {
                Some(value) => Ok(Some(value)),
                None => second(call),
            });
            Some(chained)
        }
        (Some(hook), None) | (None, Some(hook)) => Some(Arc::clone(hook)),
        (None, None) => None,
    }
}

fn chain_function_hooks(
    first: &Option<FunctionHook>,
    second: &Option<FunctionHook>,
) -> Option<FunctionHook> {
    match (first, second) {
        (Some(first), Some(second)) => {
            let (first, second) = (Arc::clone(first), Arc::clone(second));
            let chained: FunctionHook = Arc::new(move |call: &FunctionCall<'_>| match first(call)? {
                Some(value) => Ok(Some(value)),
                None => second(call),
            });
            Some(chained)
        }
        (Some(hook), None) | (None, Some(hook)) => Some(Arc::clone(hook)),
        (None, None) => None,
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("parameters", &self.parameters)
            .field("dynamic_parameters", &self.dynamic_parameters.keys().collect::<Vec<_>>())
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("parameter_hook", &self.parameter_hook.is_some())
            .field("function_hook", &self.function_hook.is_some())
            .field("options", &self.options)
            .field("culture", &self.culture)
            .finish()
    }
}
