//! Generic post-order traversal over syntax trees.
//!
//! A [`Visitor`] is invoked exactly once per element reachable from the root,
//! always after all of that element's children. The walk keeps its own stack,
//! so tree depth is bounded by memory rather than by the call stack.
//!
//! Visitors are stateful (`&mut self`) so they can accumulate per-element
//! results, e.g. a parent table or an evaluation memo, indexed by
//! [`ElementId`].

use smallvec::SmallVec;

use crate::syntax::{ElementId, SyntaxTree};

/// Callback invoked by [`walk_post_order`].
pub trait Visitor<'a> {
    /// Error that aborts the traversal.
    type Error;

    /// Visit one element. All of its children have already been visited.
    fn visit(&mut self, tree: &SyntaxTree<'a>, id: ElementId) -> Result<(), Self::Error>;
}

/// Visit every element under `root` in post-order, stopping at the first
/// error.
pub fn walk_post_order<'a, V>(
    tree: &SyntaxTree<'a>,
    root: ElementId,
    visitor: &mut V,
) -> Result<(), V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    let mut stack: Vec<(ElementId, bool)> = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            visitor.visit(tree, id)?;
            continue;
        }
        stack.push((id, true));
        let children: SmallVec<[ElementId; 4]> = tree.children(id);
        stack.extend(children.into_iter().rev().map(|child| (child, false)));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
