//! Parse trees produced by the parser and consumed by the evaluator.

mod parent_links;
mod tree;

pub use parent_links::ParentLinks;
pub use tree::{Element, ElementId, ElementKind, RepeatedGroup, SyntaxTree, SyntaxTreeBuilder};
