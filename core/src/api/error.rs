//! Public error types for the evaluation API.
//!
//! Parse and evaluation failures keep their typed kinds so callers can match
//! on them; [`Error::to_diagnostic`] flattens any of them into a
//! [`Diagnostic`] for rendering.

use core::fmt;

use thiserror::Error;

use crate::evaluator::{EvalError, EvalErrorKind};
use crate::parser::{ParseError, Span};

/// Public error type for all engine operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The requested source language is not supported.
    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),

    /// The source text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Evaluation failed on a well-formed tree.
    #[error("Evaluation error: {error}")]
    Eval {
        error: EvalError,
        /// The expression that was being evaluated.
        input: String,
    },
}

impl Error {
    /// Source text the error refers to, when there is one.
    pub fn input(&self) -> Option<&str> {
        match self {
            Error::UnsupportedLanguage(_) => None,
            Error::Parse(err) => Some(&err.input),
            Error::Eval { input, .. } => Some(input),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::UnsupportedLanguage(name) => Diagnostic {
                severity: Severity::Error,
                message: self.to_string(),
                span: Span(0..0),
                help: Some(format!("'{}' is not a known language; try 'c'", name)),
                code: Some("L001".to_string()),
            },
            Error::Parse(err) => err.to_diagnostic(),
            Error::Eval { error, .. } => eval_diagnostic(error),
        }
    }
}

fn eval_diagnostic(error: &EvalError) -> Diagnostic {
    let (code, help) = match &error.kind {
        EvalErrorKind::MalformedNumber { .. } => ("R001", None),
        EvalErrorKind::UnsupportedOperator { .. } => ("R002", None),
        EvalErrorKind::OperandMismatch { .. } => (
            "R003",
            Some("Both operands must have compatible types".to_string()),
        ),
        EvalErrorKind::IndexNotInteger { .. } => ("R004", None),
        EvalErrorKind::NotAnArray { .. } => ("R005", None),
        EvalErrorKind::IndexOutOfBounds { len, .. } => (
            "R006",
            Some(format!("Valid indices are 0 to {}", len.saturating_sub(1))),
        ),
        EvalErrorKind::UndefinedVariable { name } => (
            "R007",
            Some(format!("Bind '{}' in the environment before evaluating", name)),
        ),
        EvalErrorKind::MissingValue { .. } | EvalErrorKind::MalformedTree { .. } => ("R999", None),
    };

    Diagnostic {
        severity: Severity::Error,
        message: error.kind.to_string(),
        span: error.span.clone(),
        help,
        code: Some(code.to_string()),
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level. Every failure the engine reports is an error.
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "R001").
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}
