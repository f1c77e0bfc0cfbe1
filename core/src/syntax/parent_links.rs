//! Parent table for a syntax tree.
//!
//! Tokens are classified by the production that contains them (a token under
//! `number` is a numeric literal, anything else is looked up by name). Rather
//! than storing back-pointers in the tree, the parent of every element is
//! recorded in a side table indexed by [`ElementId`].

use core::convert::Infallible;

use crate::parser::Rule;
use crate::syntax::{ElementId, SyntaxTree};
use crate::visitor::{Visitor, walk_post_order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLinks {
    parents: Vec<Option<ElementId>>,
}

impl ParentLinks {
    /// Record the structural parent of every element reachable from the root.
    pub fn link(tree: &SyntaxTree<'_>) -> Self {
        let mut links = ParentLinks {
            parents: vec![None; tree.len()],
        };
        let Ok(()) = walk_post_order(tree, tree.root(), &mut links);
        links
    }

    /// Parent of `id`, or `None` for the root.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Production name of the parent of `id`.
    pub fn parent_rule(&self, tree: &SyntaxTree<'_>, id: ElementId) -> Option<Rule> {
        self.parent(id)
            .and_then(|parent| tree.get(parent))
            .map(|parent| parent.rule)
    }
}

impl<'a> Visitor<'a> for ParentLinks {
    type Error = Infallible;

    fn visit(&mut self, tree: &SyntaxTree<'a>, id: ElementId) -> Result<(), Infallible> {
        for child in tree.children(id) {
            if let Some(slot) = self.parents.get_mut(child.index()) {
                *slot = Some(id);
            }
        }
        Ok(())
    }
}
