pub mod error;
pub mod parser;
mod syntax;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Production;
pub use parser::Rule;
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};

pub use error::{ParseError, ParseErrorKind};
pub use syntax::{BinaryOp, BoolOp, ComparisonOp, InfixOp, Span, UnaryOp};

#[cfg(test)]
mod parse_test;
