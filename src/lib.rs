//! ceval - evaluate C-like expressions against a set of variable bindings
//!
//! # Overview
//!
//! An expression such as `arr[i] * 2 > limit && enabled` is parsed into a
//! syntax tree and reduced to a single [`Value`] in one bottom-up pass.
//! Supported values are integers, doubles, booleans, timestamps and
//! homogeneous arrays of those.
//!
//! # Quick Start
//!
//! ```
//! use ceval::{Environment, Language, Value, eval};
//!
//! let env = Environment::new()
//!     .with("arr", vec![1i64, 2, 3, 4])
//!     .with("limit", 5)
//!     .with("enabled", true);
//!
//! let result = eval("arr[2] * 2 > limit && enabled", &env, Language::C).unwrap();
//! assert_eq!(result, Value::Boolean(true));
//! ```
//!
//! # Errors
//!
//! Failures are reported as [`Error`]. Use [`render_error`] (or one of its
//! variants) to print them with the offending source highlighted:
//!
//! ```
//! use ceval::{Environment, Language, eval, render_error_to_string_no_color};
//!
//! let source = "1 + true";
//! let err = eval(source, &Environment::new(), Language::C).unwrap_err();
//! let report = render_error_to_string_no_color(&err);
//! assert!(report.contains("cannot combine Integer with Boolean"));
//! ```

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from ceval_core
pub use ceval_core::api::{
    Diagnostic, Engine, EngineOptions, Environment, Error, Language, Severity, eval,
};

// Re-export commonly used values and errors
pub use ceval_core::evaluator::{EvalError, EvalErrorKind};
pub use ceval_core::parser::{ParseError, ParseErrorKind, Span};
pub use ceval_core::values::{self, Array, ElementType, LiteralError, Value, ValueType};
