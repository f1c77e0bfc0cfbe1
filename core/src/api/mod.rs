//! Public API for evaluating expressions.
//!
//! # Example
//!
//! ```
//! use ceval_core::api::{Environment, Language, eval};
//! use ceval_core::values::Value;
//!
//! let env = Environment::new().with("arr", vec![1i64, 2, 3, 4]);
//! let result = eval("arr[1] + arr[2]", &env, Language::C).unwrap();
//! assert_eq!(result, Value::Integer(5));
//! ```

pub mod engine;
pub mod environment;
pub mod error;
pub mod language;
pub mod options;

pub use engine::{Engine, eval};
pub use environment::Environment;
pub use error::{Diagnostic, Error, Severity};
pub use language::Language;
pub use options::EngineOptions;
