//! Traversal order and early-exit behavior of the post-order walk.

use super::{Visitor, walk_post_order};
use crate::parser::{self, Rule, Span};
use crate::syntax::{ElementId, RepeatedGroup, SyntaxTree, SyntaxTreeBuilder};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

/// Records the rule of every visited element.
#[derive(Default)]
struct Recorder {
    visited: Vec<(ElementId, Rule)>,
}

impl<'a> Visitor<'a> for Recorder {
    type Error = ();

    fn visit(&mut self, tree: &SyntaxTree<'a>, id: ElementId) -> Result<(), ()> {
        let element = tree.get(id).ok_or(())?;
        self.visited.push((id, element.rule));
        Ok(())
    }
}

/// Fails on the first element with the given rule.
struct StopAt {
    rule: Rule,
    seen: usize,
}

impl<'a> Visitor<'a> for StopAt {
    type Error = ElementId;

    fn visit(&mut self, tree: &SyntaxTree<'a>, id: ElementId) -> Result<(), ElementId> {
        self.seen += 1;
        match tree.get(id) {
            Some(element) if element.rule == self.rule => Err(id),
            _ => Ok(()),
        }
    }
}

#[test]
fn test_children_visited_before_parents() {
    let arena = Bump::new();
    let tree = parser::parse(&arena, "(1 + 2) * x").unwrap();

    let mut recorder = Recorder::default();
    walk_post_order(&tree, tree.root(), &mut recorder).unwrap();

    let position = |id: ElementId| {
        recorder
            .visited
            .iter()
            .position(|(visited, _)| *visited == id)
            .unwrap()
    };

    assert_eq!(recorder.visited.len(), tree.len());
    for (id, _) in &recorder.visited {
        for child in tree.children(*id) {
            assert!(position(child) < position(*id));
        }
    }
    assert_eq!(recorder.visited.last().map(|(id, _)| *id), Some(tree.root()));
}

#[test]
fn test_each_element_visited_once() {
    let arena = Bump::new();
    let tree = parser::parse(&arena, "a[1] && !b || c < 2").unwrap();

    let mut recorder = Recorder::default();
    walk_post_order(&tree, tree.root(), &mut recorder).unwrap();

    let mut ids: Vec<ElementId> = recorder.visited.iter().map(|(id, _)| *id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), recorder.visited.len());
}

#[test]
fn test_repetition_groups_in_order() {
    let arena = Bump::new();
    let mut builder = SyntaxTreeBuilder::new(&arena, "a+b");
    let plus = builder.token(Rule::op_add, Span::new(1, 2), "+");
    let operator = builder.node(Rule::additive_operator, Span::new(1, 2), &[plus]);
    let operand = builder.token(Rule::identifier, Span::new(2, 3), "b");
    let many = builder.repetition(
        Rule::expression_additive_many,
        Span::new(1, 3),
        &[RepeatedGroup { operator, operand }],
    );
    let left = builder.token(Rule::identifier, Span::new(0, 1), "a");
    let root = builder.node(Rule::expression_additive, Span::new(0, 3), &[left, many]);
    let tree = builder.finish(root);

    let mut recorder = Recorder::default();
    walk_post_order(&tree, tree.root(), &mut recorder).unwrap();

    let order: Vec<ElementId> = recorder.visited.iter().map(|(id, _)| *id).collect();
    assert_eq!(order, vec![left, plus, operator, operand, many, root]);
}

#[test]
fn test_error_stops_walk() {
    let arena = Bump::new();
    let tree = parser::parse(&arena, "1 + 2 + 3").unwrap();

    let mut visitor = StopAt {
        rule: Rule::additive_operator,
        seen: 0,
    };
    let failed = walk_post_order(&tree, tree.root(), &mut visitor).unwrap_err();

    assert_eq!(tree.get(failed).map(|e| e.rule), Some(Rule::additive_operator));
    assert!(visitor.seen < tree.len());
}

#[test]
fn test_walk_from_subtree() {
    let arena = Bump::new();
    let tree = parser::parse(&arena, "7").unwrap();

    let mut recorder = Recorder::default();
    let first_child = tree.children(tree.root())[0];
    walk_post_order(&tree, first_child, &mut recorder).unwrap();

    assert_eq!(recorder.visited.last().map(|(id, _)| *id), Some(first_child));
    assert!(!recorder.visited.iter().any(|(id, _)| *id == tree.root()));
}
