//! Runtime evaluation errors.
//!
//! Every error aborts the evaluation; there is no local recovery and no
//! default value substituted for a failed element.

use thiserror::Error;

use crate::parser::{Rule, Span};
use crate::values::ValueType;

/// Runtime evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Source span of the element being evaluated.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    /// A numeric literal that parses neither as an integer nor as a float.
    #[error("Malformed numeric literal '{text}'")]
    MalformedNumber { text: String },

    /// Operator not defined for the runtime type it was dispatched on.
    #[error("Unsupported operator '{op}' for {operand}")]
    UnsupportedOperator { op: String, operand: ValueType },

    /// Right operand incompatible with the left operand's type.
    #[error("Operator '{op}' cannot combine {left} with {right}")]
    OperandMismatch {
        op: String,
        left: ValueType,
        right: ValueType,
    },

    #[error("Array index is not an integer (found {found})")]
    IndexNotInteger { found: ValueType },

    #[error("Variable is not an array (found {found})")]
    NotAnArray { found: ValueType },

    #[error("Index {index} out of bounds (length: {len})")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// A child was read before it had a value. Indicates a tree shape the
    /// evaluator does not support.
    #[error("Missing value for {rule:?}")]
    MissingValue { rule: Rule },

    /// The tree does not have the shape its production requires.
    #[error("Malformed {rule:?} node: {reason}")]
    MalformedTree { rule: Rule, reason: &'static str },
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}
