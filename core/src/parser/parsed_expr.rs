use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDateTime, TimeDelta};
use ecow::EcoString;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::parser::{BinaryOp, UnaryOp, format_time_span};

/// Parsed expression tree.
///
/// Trees are immutable once the parser returns them and are shared between
/// evaluations behind an `Arc`. Not `Clone`: every `Identifier` owns a
/// correlation id unique to its node.
#[derive(Serialize, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Identifier),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Call {
        callee: Identifier,
        args: Vec<Expr>,
    },
    List(Vec<Expr>),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Decimal(Decimal),
    Float(f64),
    Bool(bool),
    Str(EcoString),
    Char(char),
    DateTime(NaiveDateTime),
    TimeSpan(#[serde(serialize_with = "serialize_time_span")] TimeDelta),
    Guid(Uuid),
}

fn serialize_time_span<S: Serializer>(span: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(span.num_milliseconds())
}

/// Identifies one syntactic occurrence of a name, for the lifetime of its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrelationId(u64);

static NEXT_CORRELATION_ID: AtomicU64 = AtomicU64::new(1);

impl CorrelationId {
    pub(crate) fn fresh() -> Self {
        CorrelationId(NEXT_CORRELATION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Debug)]
pub struct Identifier {
    pub name: EcoString,
    #[serde(skip)]
    pub id: CorrelationId,
}

impl Identifier {
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            id: CorrelationId::fresh(),
        }
    }
}

// Structural equality: two parses of the same text compare equal.
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Expr {
    pub fn literal(value: Literal) -> Self {
        Expr::Literal(value)
    }

    pub fn ident(name: impl Into<EcoString>) -> Self {
        Expr::Ident(Identifier::new(name))
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ternary(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::Ternary {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn call(name: impl Into<EcoString>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Identifier::new(name),
            args,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Decimal(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Str(v) => write!(f, "'{v}'"),
            Literal::Char(v) => write!(f, "'{v}'"),
            Literal::DateTime(v) => write!(f, "#{}#", v.format("%m/%d/%Y %H:%M:%S")),
            Literal::TimeSpan(v) => write!(f, "#{}#", format_time_span(v)),
            Literal::Guid(v) => write!(f, "{v}"),
        }
    }
}

/// Renders the tree back to source form, fully parenthesized.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Ident(ident) => write!(f, "[{}]", ident.name),
            Expr::Unary { op, expr } => match op {
                UnaryOp::Not => write!(f, "not ({expr})"),
                _ => write!(f, "{op}({expr})"),
            },
            Expr::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "({cond} ? {then_branch} : {else_branch})"),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee.name)?;
                write_separated(f, args)?;
                write!(f, ")")
            }
            Expr::List(items) => {
                write!(f, "(")?;
                write_separated(f, items)?;
                write!(f, ")")
            }
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
