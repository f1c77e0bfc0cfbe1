use crate::api::{Diagnostic, Severity};
use crate::parser::{Rule, Span};
use thiserror::Error;

/// Parser error with the source it was raised for.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The text that failed to parse.
    pub input: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Unexpected token
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    /// Maximum nesting depth exceeded
    #[error("Expression nesting depth {depth} exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    #[error("{message}")]
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, input: String, span: Span) -> Self {
        Self { kind, input, span }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ("P001", None),
            ParseErrorKind::MaxDepthExceeded { .. } => (
                "P004",
                Some("Reduce nesting or simplify the expression".to_string()),
            ),
            ParseErrorKind::Other { .. } => ("P999", None),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            help,
            code: Some(code.to_string()),
        }
    }
}

/// Convert Pest error to human-readable ParseError.
///
/// `nesting` is the deepest nesting level in `source`. When pest gives up
/// because its own stack or call limit was hit, the input was nested too
/// deeply for the grammar and the error reports that level.
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str, nesting: usize) -> ParseError {
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
            found: format_found(source, span.0.start, &negatives),
        },
        ErrorVariant::CustomError { message }
            if message.contains("stack limit") || message.contains("call limit") =>
        {
            ParseErrorKind::MaxDepthExceeded {
                depth: nesting,
                max_depth: nesting.saturating_sub(1),
            }
        }
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::number | Rule::number_literal => "number",
            Rule::identifier => "identifier",
            Rule::open_paren => "'('",
            Rule::close_paren => "')'",
            Rule::open_bracket => "'['",
            Rule::close_bracket => "']'",
            Rule::EOI => "end of input",
            rule if rule.is_operator() => "operator",
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

/// Describe what was found at the error position.
fn format_found(source: &str, pos: usize, negatives: &[Rule]) -> String {
    if let Some(rule) = negatives.first() {
        return format!("{:?}", rule);
    }
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}
