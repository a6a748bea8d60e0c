pub mod error;
mod literals;
mod parsed_expr;
pub mod parser;
mod syntax;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::parse;

pub use error::{ParseError, ParseErrorKind};
pub use literals::format_time_span;
pub(crate) use literals::temporal_from_text;
pub use parsed_expr::{CorrelationId, Expr, Identifier, Literal};
pub use syntax::{BinaryOp, Span, UnaryOp};

#[cfg(test)]
mod literals_test;



#[cfg(test)]
mod precedence_test;
