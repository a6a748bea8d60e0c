//! Read-only traversal of expression trees.
//!
//! A [`Visitor`] overrides the hooks it cares about; the default
//! [`Visitor::visit_expr`] recurses through [`walk_expr`]. Visitors are
//! stateful (`&mut self`) so they can accumulate results while walking.

use hashbrown::HashSet;

use crate::parser::{Expr, Identifier, Literal};

pub trait Visitor {
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_literal(&mut self, _literal: &Literal) {}

    /// An identifier in value position. Call names go to [`Visitor::visit_call`].
    fn visit_identifier(&mut self, _identifier: &Identifier) {}

    /// A call, before its arguments are walked.
    fn visit_call(&mut self, _callee: &Identifier, _args: &[Expr]) {}
}

/// Visits the children of `expr` in source order.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(literal) => visitor.visit_literal(literal),
        Expr::Ident(identifier) => visitor.visit_identifier(identifier),
        Expr::Unary { expr, .. } => visitor.visit_expr(expr),
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Ternary {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then_branch);
            visitor.visit_expr(else_branch);
        }
        Expr::Call { callee, args } => {
            visitor.visit_call(callee, args);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::List(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
    }
}

/// Distinct names in order of first insertion.
#[derive(Debug, Default)]
struct OrderedNames {
    seen: HashSet<String>,
    names: Vec<String>,
}

impl OrderedNames {
    fn insert(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.names
    }
}

/// Collects the distinct parameter names an expression references.
#[derive(Debug, Default)]
pub struct ParameterCollector {
    names: OrderedNames,
}

impl ParameterCollector {
    pub fn collect(expr: &Expr) -> Vec<String> {
        let mut collector = Self::default();
        collector.visit_expr(expr);
        collector.names.into_vec()
    }
}

impl Visitor for ParameterCollector {
    fn visit_identifier(&mut self, identifier: &Identifier) {
        self.names.insert(&identifier.name);
    }
}

/// Collects the distinct function names an expression calls.
#[derive(Debug, Default)]
pub struct FunctionCollector {
    names: OrderedNames,
}

impl FunctionCollector {
    pub fn collect(expr: &Expr) -> Vec<String> {
        let mut collector = Self::default();
        collector.visit_expr(expr);
        collector.names.into_vec()
    }
}

impl Visitor for FunctionCollector {
    fn visit_call(&mut self, callee: &Identifier, _args: &[Expr]) {
        self.names.insert(&callee.name);
    }
}

#[cfg(test)]
mod tests;
