use pretty_assertions::assert_eq;

use crate::api::ExpressionOptions;
use crate::parser::Expr;

use super::parser::parse;

// Helper function to parse an expression and return the AST.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same AST.
fn ast(source: &str) -> Expr {
    parse(source, ExpressionOptions::empty())
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("a + b - c"), ast("(a + b) - c"));
    assert_eq!(ast("a - b + c"), ast("(a - b) + c"));
    assert_eq!(
        ast("a + b - c + d - e + f"),
        ast("((((a + b) - c) + d) - e) + f")
    );
}

#[test]
fn test_multiplication_vs_division() {
    assert_eq!(ast("a * b / c"), ast("(a * b) / c"));
    assert_eq!(ast("a / b * c"), ast("(a / b) * c"));
    assert_eq!(ast("a % b * c"), ast("(a % b) * c"));
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("a + b * c"), ast("a + (b * c)"));
    assert_eq!(ast("a * b + c"), ast("(a * b) + c"));
    assert_eq!(ast("a - b % c"), ast("a - (b % c)"));
}

#[test]
fn test_and_vs_or() {
    assert_eq!(
        ast("true and false or true"),
        ast("(true and false) or true")
    );
    assert_eq!(
        ast("true or false and true"),
        ast("true or (false and true)")
    );
    assert_eq!(ast("a || b && c"), ast("a or (b and c)"));
}

#[test]
fn test_symbol_spellings_share_a_node() {
    assert_eq!(ast("a & b"), ast("a and b"));
    assert_eq!(ast("a | b"), ast("a or b"));
    assert_eq!(ast("a && b"), ast("a AND b"));
    assert_eq!(ast("a <> b"), ast("a != b"));
    assert_eq!(ast("a == b"), ast("a = b"));
    assert_eq!(ast("!a"), ast("not a"));
}

#[test]
fn test_xor_is_loosest() {
    assert_eq!(ast("a ^ b or c"), ast("a ^ (b or c)"));
    assert_eq!(ast("a and b ^ c"), ast("(a and b) ^ c"));
}

#[test]
fn test_comparison_vs_logical() {
    assert_eq!(ast("a > 1 and b < 2"), ast("(a > 1) and (b < 2)"));
    assert_eq!(ast("a = 1 or b != 2"), ast("(a = 1) or (b != 2)"));
}

#[test]
fn test_equality_vs_relational() {
    assert_eq!(ast("a < b = c > d"), ast("(a < b) = (c > d)"));
    assert_eq!(ast("x in (1, 2) = true"), ast("(x in (1, 2)) = true"));
}

#[test]
fn test_relational_vs_arithmetic() {
    assert_eq!(ast("a + 1 > b * 2"), ast("(a + 1) > (b * 2)"));
    assert_eq!(ast("a << 1 < b"), ast("(a << 1) < b"));
    assert_eq!(ast("a << 1 + 2"), ast("a << (1 + 2)"));
}

#[test]
fn test_unary_vs_binary() {
    assert_eq!(ast("--a"), ast("-(-a)"));
    assert_eq!(ast("-a + b"), ast("(-a) + b"));
    assert_eq!(ast("a + -b"), ast("a + (-b)"));
    assert_eq!(ast("-a * b"), ast("(-a) * b"));
    assert_eq!(ast("not a and b"), ast("(not a) and b"));
    assert_eq!(ast("~a & b"), ast("(~a) and b"));
}

#[test]
fn test_exponentiation() {
    assert_eq!(ast("a ** b ** c"), ast("a ** (b ** c)"));
    assert_eq!(ast("a ** b ** c ** d"), ast("a ** (b ** (c ** d))"));
}

#[test]
fn test_exponentiation_vs_multiplication() {
    assert_eq!(ast("a * b ** c"), ast("a * (b ** c)"));
    assert_eq!(ast("a ** b * c"), ast("(a ** b) * c"));
}

#[test]
fn test_exponentiation_vs_negation() {
    assert_eq!(ast("-a ** b"), ast("- (a  ** b)"));
    assert_eq!(ast("a ** -b"), ast("a ** ( -b )"));
}

#[test]
fn test_ternary_vs_binary() {
    assert_eq!(ast("a ? b + c : d"), ast("a ? (b + c) : d"));
    assert_eq!(ast("a ? b : c + d"), ast("a ? b : (c + d)"));
    assert_eq!(ast("a or b ? 1 : 2"), ast("(a or b) ? 1 : 2"));
}

#[test]
fn test_membership_and_patterns() {
    assert_eq!(ast("a + 1 in (2, 3)"), ast("(a + 1) in (2, 3)"));
    assert_eq!(ast("a like 'x%' and b"), ast("(a like 'x%') and b"));
    assert_eq!(ast("a not like 'x%' or b not in (1, 2)"), ast("(a not like 'x%') or (b not in (1, 2))"));
}

#[test]
fn test_call_arguments() {
    assert_eq!(ast("f(a + b, c)"), ast("f((a + b), c)"));
    assert_eq!(ast("f(a; b)"), ast("f(a, b)"));
}
