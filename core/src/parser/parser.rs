use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use crate::api::ExpressionOptions;
use crate::parser::error::convert_pest_error;
use crate::parser::literals::{self, NumberParts, Radix};
use crate::parser::{
    BinaryOp, Expr, Identifier, Literal, ParseError, ParseErrorKind, Span, UnaryOp,
};

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::xor, Assoc::Left))           // `^`
        .op(
            Op::infix(Rule::or, Assoc::Left) |
            Op::infix(Rule::bit_or, Assoc::Left)
        )                                                // `or`, `||`, `|`
        .op(
            Op::infix(Rule::and, Assoc::Left) |
            Op::infix(Rule::bit_and, Assoc::Left)
        )                                                // `and`, `&&`, `&`

        // Comparison operators.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::neq, Assoc::Left)
        )                                                // `=`, `==`, `!=`, `<>`
        .op(
            Op::infix(Rule::ge, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::in_op, Assoc::Left) |
            Op::infix(Rule::not_in, Assoc::Left) |
            Op::infix(Rule::like_op, Assoc::Left) |
            Op::infix(Rule::not_like, Assoc::Left)
        )                                                // `>=`, `in`, `like`, ...

        // Arithmetic operators.
        .op(
            Op::infix(Rule::shl, Assoc::Left) |
            Op::infix(Rule::shr, Assoc::Left)
        )                                                // `<<`, `>>`
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                                // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::modulo, Assoc::Left)
        )                                                // `*`, `/`, `%`
        .op(
            Op::prefix(Rule::neg) |
            Op::prefix(Rule::not) |
            Op::prefix(Rule::bit_not)
        )                                                // `-`, `not`, `!`, `~`
        .op(Op::infix(Rule::pow, Assoc::Right))          // `**` (right-assoc)
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

/// Parses `source` into an expression tree.
///
/// Only [`ExpressionOptions::DECIMAL_AS_DEFAULT`] and
/// [`ExpressionOptions::ALLOW_CHAR_VALUES`] influence parsing; they decide
/// how numeric and single-character literals are represented.
pub fn parse(source: &str, options: ExpressionOptions) -> Result<Expr, ParseError> {
    let mut pairs = ExpressionParser::parse(Rule::main, source)
        .map_err(|e| convert_pest_error(e, source))?;
    let main = next_pair(&mut pairs, source, Span::new(0, source.len()))?;

    let builder = AstBuilder { source, options };
    let expr = builder.build(main)?;
    tracing::trace!(source, ast = %expr, "parsed expression");
    Ok(expr)
}

struct AstBuilder<'s> {
    source: &'s str,
    options: ExpressionOptions,
}

impl<'s> AstBuilder<'s> {
    fn error(&self, kind: ParseErrorKind, span: impl Into<Span>) -> ParseError {
        ParseError::new(kind, self.source, span.into())
    }

    fn build(&self, pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
        let span = Span::from(pair.as_span());
        match pair.as_rule() {
            Rule::main | Rule::grouped => {
                let mut inner = pair.into_inner();
                self.build(next_pair(&mut inner, self.source, span)?)
            }

            Rule::expression => {
                let mut inner = pair.into_inner();
                let first = self.build(next_pair(&mut inner, self.source, span)?)?;
                // A complete expression followed by an operator run and another
                // operand: `1 + * 2`.
                if let Some(sequence) = inner.next() {
                    let operators = sequence.as_str().to_string();
                    return Err(self.error(
                        ParseErrorKind::UnknownOperatorSequence { operators },
                        sequence.as_span(),
                    ));
                }
                Ok(first)
            }

            Rule::ternary => {
                let mut inner = pair.into_inner();
                let cond = self.build(next_pair(&mut inner, self.source, span.clone())?)?;
                match inner.next() {
                    None => Ok(cond),
                    Some(then_pair) => {
                        let then_branch = self.build(then_pair)?;
                        let else_branch =
                            self.build(next_pair(&mut inner, self.source, span)?)?;
                        Ok(Expr::ternary(cond, then_branch, else_branch))
                    }
                }
            }

            Rule::logical => self.build_operators(pair.into_inner()),

            Rule::call => {
                let mut inner = pair.into_inner();
                let name = next_pair(&mut inner, self.source, span)?.as_str();
                let args = inner.map(|arg| self.build(arg)).collect::<Result<_, _>>()?;
                Ok(Expr::Call {
                    callee: Identifier::new(name),
                    args,
                })
            }

            Rule::list => {
                let items = pair
                    .into_inner()
                    .map(|item| self.build(item))
                    .collect::<Result<_, _>>()?;
                Ok(Expr::List(items))
            }

            Rule::identifier => {
                let name_pair = next_pair(&mut pair.into_inner(), self.source, span)?;
                let name = match name_pair.as_rule() {
                    Rule::bracket_ident | Rule::curly_ident => name_pair
                        .into_inner()
                        .next()
                        .map(|p| p.as_str())
                        .unwrap_or_default(),
                    _ => name_pair.as_str(),
                };
                Ok(Expr::ident(name))
            }

            Rule::guid => literals::guid_literal(pair.as_str())
                .map(Expr::Literal)
                .map_err(|kind| self.error(kind, span)),

            Rule::number => self.build_number(pair),

            Rule::boolean => Ok(Expr::Literal(Literal::Bool(
                pair.as_str().eq_ignore_ascii_case("true"),
            ))),

            Rule::datetime => {
                let body = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                literals::datetime_literal(body)
                    .map(Expr::Literal)
                    .map_err(|kind| self.error(kind, span))
            }

            Rule::string => self.build_string(pair),

            rule => Err(self.error(
                ParseErrorKind::Other {
                    message: format!("unexpected rule {rule:?}"),
                },
                span,
            )),
        }
    }

    fn build_operators(&self, pairs: Pairs<'_, Rule>) -> Result<Expr, ParseError> {
        PRATT_PARSER
            .map_primary(|primary| self.build(primary))
            .map_prefix(|op, rhs| {
                let op = match op.as_rule() {
                    Rule::neg => UnaryOp::Negate,
                    Rule::not => UnaryOp::Not,
                    Rule::bit_not => UnaryOp::BitwiseNot,
                    rule => unreachable!("Unknown prefix operator: {:?}", rule),
                };
                Ok(Expr::unary(op, rhs?))
            })
            .map_infix(|lhs, op, rhs| {
                let op = match op.as_rule() {
                    Rule::add => BinaryOp::Plus,
                    Rule::sub => BinaryOp::Minus,
                    Rule::mul => BinaryOp::Times,
                    Rule::div => BinaryOp::Div,
                    Rule::modulo => BinaryOp::Modulo,
                    Rule::pow => BinaryOp::Exponent,
                    Rule::shl => BinaryOp::LeftShift,
                    Rule::shr => BinaryOp::RightShift,
                    Rule::eq => BinaryOp::Equal,
                    Rule::neq => BinaryOp::NotEqual,
                    Rule::gt => BinaryOp::Greater,
                    Rule::ge => BinaryOp::GreaterOrEqual,
                    Rule::lt => BinaryOp::Lesser,
                    Rule::le => BinaryOp::LesserOrEqual,
                    Rule::in_op => BinaryOp::In,
                    Rule::not_in => BinaryOp::NotIn,
                    Rule::like_op => BinaryOp::Like,
                    Rule::not_like => BinaryOp::NotLike,
                    // `&` and `|` are spellings of the logical operators.
                    Rule::and | Rule::bit_and => BinaryOp::And,
                    Rule::or | Rule::bit_or => BinaryOp::Or,
                    Rule::xor => BinaryOp::BitwiseXor,
                    rule => unreachable!("Unknown binary operator: {:?}", rule),
                };
                Ok(Expr::binary(op, lhs?, rhs?))
            })
            .parse(pairs)
    }

    fn build_number(&self, pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
        let span = Span::from(pair.as_span());
        let prefer_decimal = self.options.contains(ExpressionOptions::DECIMAL_AS_DEFAULT);
        let inner = next_pair(&mut pair.into_inner(), self.source, span.clone())?;

        let literal = match inner.as_rule() {
            Rule::hex_int => literals::radix_literal(inner.as_str(), Radix::Hex, prefer_decimal),
            Rule::bin_int => {
                literals::radix_literal(inner.as_str(), Radix::Binary, prefer_decimal)
            }
            Rule::oct_int => {
                literals::radix_literal(inner.as_str(), Radix::Octal, prefer_decimal)
            }
            _ => {
                let mut parts = NumberParts::default();
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::integral => parts.integral = part.as_str(),
                        Rule::fraction => parts.fraction = Some(&part.as_str()[1..]),
                        Rule::exponent => parts.exponent = Some(&part.as_str()[1..]),
                        _ => {}
                    }
                }
                literals::number_literal(&parts, prefer_decimal)
            }
        };

        literal
            .map(Expr::Literal)
            .map_err(|kind| self.error(kind, span))
    }

    fn build_string(&self, pair: Pair<'_, Rule>) -> Result<Expr, ParseError> {
        let span = Span::from(pair.as_span());
        let body = next_pair(&mut pair.into_inner(), self.source, span.clone())?;
        let single_quoted = body.as_rule() == Rule::sq_inner;
        let text = literals::unescape_string(body.as_str()).map_err(|kind| self.error(kind, span))?;

        if single_quoted && self.options.contains(ExpressionOptions::ALLOW_CHAR_VALUES) {
            let mut chars = text.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(Expr::Literal(Literal::Char(c)));
            }
        }
        Ok(Expr::Literal(Literal::Str(text.into())))
    }
}

fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    source: &str,
    span: Span,
) -> Result<Pair<'i, Rule>, ParseError> {
    pairs.next().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::Other {
                message: "missing expected pair in rule".to_string(),
            },
            source,
            span,
        )
    })
}
