//! The evaluation engine.

use bumpalo::Bump;
use tracing::debug;

use super::{EngineOptions, Environment, Error, Language};
use crate::values::Value;
use crate::{evaluator, parser};

/// Parses and evaluates expressions with a fixed set of options.
///
/// Nothing is cached between calls: every evaluation parses the source into a
/// fresh arena and evaluates it with a fresh memo.
///
/// # Example
///
/// ```
/// use ceval_core::api::{Engine, EngineOptions, Environment, Language};
/// use ceval_core::values::Value;
///
/// let engine = Engine::new(EngineOptions::default());
/// let env = Environment::new().with("x", 1);
///
/// let result = engine.eval("(x + 2) * 3 < 10", &env, Language::C).unwrap();
/// assert_eq!(result, Value::Boolean(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Evaluate `source` against `variables`.
    pub fn eval(&self, source: &str, variables: &Environment, language: Language) -> Result<Value, Error> {
        debug!(%language, source, "Evaluating expression");

        let arena = Bump::new();
        let tree = match language {
            Language::C => parser::parse_with_max_depth(&arena, source, self.options.max_depth)?,
        };

        evaluator::evaluate_tree(&tree, variables).map_err(|error| Error::Eval {
            error,
            input: source.to_string(),
        })
    }
}

/// Evaluate `source` with default engine options.
pub fn eval(source: &str, variables: &Environment, language: Language) -> Result<Value, Error> {
    Engine::default().eval(source, variables, language)
}
