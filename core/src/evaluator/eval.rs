//! Core evaluation logic.

use smallvec::SmallVec;

use crate::api::{Environment, FunctionCall, Parameter, ParameterCall};
use crate::casting::to_bool;
use crate::evaluator::{EvalError, LazyArg, operators};
use crate::parser::{BinaryOp, Expr, Identifier};
use crate::stdlib;
use crate::values::Value;

/// Most calls take a handful of arguments.
type ArgBuffer<'a> = SmallVec<[LazyArg<'a>; 4]>;

/// Evaluates expression trees against one environment.
///
/// Cheap to copy; holds nothing but the environment reference.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'e> {
    environment: &'e Environment,
}

impl<'e> Evaluator<'e> {
    pub fn new(environment: &'e Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &'e Environment {
        self.environment
    }

    /// Evaluate an expression node.
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Ident(identifier) => self.resolve_parameter(identifier),

            Expr::Unary { op, expr } => {
                let value = self.eval(expr)?;
                operators::unary(*op, &value, self.environment)
            }

            Expr::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => {
                let symbol = op.symbol();
                let left = to_bool(&self.eval(left)?, symbol)?;
                // `false and _` and `true or _` never evaluate the right side.
                if left == (*op == BinaryOp::Or) {
                    return Ok(Value::Bool(left));
                }
                Ok(Value::Bool(to_bool(&self.eval(right)?, symbol)?))
            }

            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::binary(*op, &left, &right, self.environment)
            }

            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if to_bool(&self.eval(cond)?, "?")? {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }

            Expr::Call { callee, args } => self.call_function(callee, args),

            Expr::List(items) => items.iter().map(|item| self.eval(item)).collect(),
        }
    }

    /// Hook, then static parameters, then dynamic parameters.
    fn resolve_parameter(&self, identifier: &Identifier) -> Result<Value, EvalError> {
        let env = self.environment;
        let name = identifier.name.as_str();
        let call = ParameterCall {
            name,
            id: identifier.id,
            environment: env,
        };

        if let Some(hook) = env.parameter_hook() {
            if let Some(value) = hook(&call)? {
                tracing::debug!(name, id = %identifier.id, "Parameter claimed by hook");
                return Ok(value);
            }
        }

        if let Some(parameter) = env.parameter(name) {
            tracing::trace!(name, "Resolved static parameter");
            return match parameter {
                Parameter::Value(value) => Ok(value.clone()),
                Parameter::Expression(expression) => {
                    let nested = expression.environment().inherit(env);
                    Evaluator::new(&nested).eval(expression.ast())
                }
            };
        }

        if let Some(dynamic) = env.dynamic_parameter(name) {
            tracing::trace!(name, id = %identifier.id, "Resolving dynamic parameter");
            return dynamic(&call);
        }

        Err(EvalError::ParameterNotDefined {
            name: name.to_string(),
        })
    }

    /// Hook, then registered functions, then built-ins.
    fn call_function(&self, callee: &Identifier, args: &[Expr]) -> Result<Value, EvalError> {
        let env = self.environment;
        let name = callee.name.as_str();
        let lazy_args: ArgBuffer<'_> = args.iter().map(|arg| LazyArg::new(arg, *self)).collect();
        let call = FunctionCall {
            name,
            id: callee.id,
            args: &lazy_args,
            environment: env,
        };

        if let Some(hook) = env.function_hook() {
            if let Some(value) = hook(&call)? {
                tracing::debug!(name, id = %callee.id, "Function claimed by hook");
                return Ok(value);
            }
        }

        if let Some(function) = env.function(name) {
            tracing::trace!(name, args = args.len(), "Calling registered function");
            return function(&call);
        }

        if let Some(result) = stdlib::call_builtin(&call) {
            tracing::trace!(name, args = args.len(), "Called built-in function");
            return result;
        }

        Err(EvalError::FunctionNotFound {
            name: name.to_string(),
        })
    }
}
