use pretty_assertions::assert_eq;

use super::*;
use crate::api::ExpressionOptions;
use crate::parser::parse;

fn tree(text: &str) -> Expr {
    parse(text, ExpressionOptions::empty()).unwrap()
}

#[test]
fn test_parameters_in_first_occurrence_order() {
    let expr = tree("b + a * [b] - Max(a, {c}) > 0 ? d : 'x'");
    assert_eq!(ParameterCollector::collect(&expr), vec!["b", "a", "c", "d"]);
}

#[test]
fn test_call_names_are_not_parameters() {
    let expr = tree("Abs(x) + Abs(y) + if(z, Round(1.5), 0)");
    assert_eq!(ParameterCollector::collect(&expr), vec!["x", "y", "z"]);
    assert_eq!(FunctionCollector::collect(&expr), vec!["Abs", "if", "Round"]);
}

#[test]
fn test_collectors_see_list_elements() {
    let expr = tree("n in (a, b, f(c))");
    assert_eq!(ParameterCollector::collect(&expr), vec!["n", "a", "b", "c"]);
    assert_eq!(FunctionCollector::collect(&expr), vec!["f"]);
}

#[derive(Default)]
struct LiteralCounter(usize);

impl Visitor for LiteralCounter {
    fn visit_literal(&mut self, _literal: &Literal) {
        self.0 += 1;
    }
}

#[test]
fn test_custom_visitor() {
    let mut counter = LiteralCounter::default();
    counter.visit_expr(&tree("1 + f(2, 'three') * -4"));
    assert_eq!(counter.0, 4);
}
