//! Configuration options for the evaluation engine.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for the engine.
///
/// # Example
///
/// ```
/// use ceval_core::api::EngineOptions;
///
/// let options = EngineOptions { max_depth: 64 };
/// assert_eq!(EngineOptions::default().max_depth, 128);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum nesting depth accepted by the parser. Each parenthesis,
    /// index bracket and unary prefix opens one level.
    ///
    /// Default: 128
    pub max_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
