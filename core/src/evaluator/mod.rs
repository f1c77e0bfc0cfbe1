//! Tree-walking evaluator for parsed expressions.
//!
//! Evaluation is a single post-order walk over the syntax tree. Each element
//! gets at most one memoized value, computed from the memoized values of its
//! children; the value memoized at the root is the result.
//!
//! ## Design Principles
//!
//! - **Never panic**: malformed trees and bad operand types surface as [`EvalError`]
//! - **Stack-safe**: the walk keeps an explicit stack instead of recursing
//! - **Fresh per call**: the memo and the augmented environment are rebuilt on
//!   every evaluation, so one tree can be evaluated any number of times
//!
//! ## Example
//!
//! ```
//! use bumpalo::Bump;
//! use ceval_core::{api::Environment, evaluator, parser, values::Value};
//!
//! let arena = Bump::new();
//! let tree = parser::parse(&arena, "x * 2 + 1").unwrap();
//! let env = Environment::new().with("x", 20);
//!
//! let result = evaluator::evaluate_tree(&tree, &env).unwrap();
//! assert_eq!(result, Value::Integer(41));
//! ```

mod error;
mod eval;
mod operators;


pub use error::{EvalError, EvalErrorKind};

use tracing::debug;

use crate::{api::Environment, syntax::ParentLinks, syntax::SyntaxTree, values::Value, visitor};

/// Evaluate an already-parsed tree against `variables`.
///
/// `true` and `false` are always bound to their boolean values, overriding
/// any binding of the same name in `variables`.
pub fn evaluate_tree(tree: &SyntaxTree<'_>, variables: &Environment) -> Result<Value, EvalError> {
    debug!(
        elements = tree.len(),
        variables = variables.len(),
        "Evaluating syntax tree"
    );

    let parents = ParentLinks::link(tree);
    let variables = variables.with_literals();

    let mut evaluator = eval::Evaluator::new(tree, &variables, &parents);
    visitor::walk_post_order(tree, tree.root(), &mut evaluator)?;
    evaluator.finish(tree, tree.root())
}
