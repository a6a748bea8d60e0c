use crate::api::{Diagnostic, Severity};
use crate::parser::{Rule, Span};

/// Parser error with the offending source location.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Input that matches no grammar rule at this position
    UnexpectedToken { expected: String, found: String },
    /// Numeric literal that cannot be represented
    InvalidNumber { text: String },
    /// Malformed date, time or GUID literal
    InvalidFormat { text: String, message: String },
    /// Malformed escape sequence inside a string literal
    InvalidEscape { sequence: String },
    /// Operators left over after a complete expression, as in `1 + * 2`
    UnknownOperatorSequence { operators: String },
    /// Other parse errors
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            source: source.into(),
            span,
        }
    }

    /// Byte offset where the error starts.
    pub fn position(&self) -> usize {
        self.span.start()
    }

    /// True for malformed date/time/GUID literal content.
    pub fn is_format_error(&self) -> bool {
        matches!(self.kind, ParseErrorKind::InvalidFormat { .. })
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                format!("Invalid token in expression: expected {expected}, found {found}")
            }
            ParseErrorKind::InvalidNumber { text } => format!("Invalid number literal '{text}'"),
            ParseErrorKind::InvalidFormat { text, message } => {
                format!("Invalid literal '{text}': {message}")
            }
            ParseErrorKind::InvalidEscape { sequence } => {
                format!("Invalid escape sequence '{sequence}'")
            }
            ParseErrorKind::UnknownOperatorSequence { operators } => {
                format!("Unknown operator sequence '{operators}'")
            }
            ParseErrorKind::Other { message } => message.clone(),
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ("P001", vec![]),
            ParseErrorKind::InvalidNumber { .. } => (
                "P002",
                vec!["Integers must fit in 64 bits after any radix prefix".to_string()],
            ),
            ParseErrorKind::InvalidFormat { .. } => (
                "P003",
                vec!["Dates are written #m/d/y#, #h:m:s# or #m/d/y h:m:s#".to_string()],
            ),
            ParseErrorKind::InvalidEscape { .. } => (
                "P004",
                vec![r#"Supported escapes: \n \r \t \0 \\ \" \' \uXXXX"#.to_string()],
            ),
            ParseErrorKind::UnknownOperatorSequence { .. } => (
                "P005",
                vec!["Remove the extra operator or add the missing operand".to_string()],
            ),
            ParseErrorKind::Other { .. } => ("P999", vec![]),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.message(),
            span: self.span.clone(),
            help,
            code: Some(code.to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at position {}", self.message(), self.position())
    }
}

impl std::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.start(), &negatives),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source, span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::guid
            | Rule::number
            | Rule::boolean
            | Rule::datetime
            | Rule::string
            | Rule::integral
            | Rule::fraction => "literal",
            Rule::identifier | Rule::ident | Rule::call => "identifier",
            Rule::EOI => "end of input",
            Rule::operator_sequence
            | Rule::add
            | Rule::sub
            | Rule::mul
            | Rule::div
            | Rule::modulo
            | Rule::pow
            | Rule::and
            | Rule::or
            | Rule::eq
            | Rule::neq => "operator",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

fn describe_found(source: &str, pos: usize, negatives: &[Rule]) -> String {
    if let Some(rule) = negatives.first() {
        return format!("{rule:?}");
    }
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{c}'"),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_to_diagnostic() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "expression".to_string(),
                found: "','".to_string(),
            },
            "test source",
            Span(10..20),
        );

        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.message.contains("expected expression"));
        assert!(diagnostic.message.contains("found ','"));
        assert_eq!(diagnostic.code, Some("P001".to_string()));
    }

    #[test]
    fn test_display_carries_position() {
        let error = ParseError::new(
            ParseErrorKind::UnknownOperatorSequence {
                operators: "+ *".to_string(),
            },
            "1 + * 2",
            Span(2..5),
        );
        assert_eq!(
            error.to_string(),
            "Unknown operator sequence '+ *' at position 2"
        );
        assert!(!error.is_format_error());
    }

    #[test]
    fn test_format_error_kind() {
        let error = ParseError::new(
            ParseErrorKind::InvalidFormat {
                text: "13/45/2020".to_string(),
                message: "month out of range".to_string(),
            },
            "#13/45/2020#",
            Span(0..12),
        );
        assert!(error.is_format_error());
        assert_eq!(error.to_diagnostic().code.as_deref(), Some("P003"));
    }
}
