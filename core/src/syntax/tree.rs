//! Arena-backed parse tree.
//!
//! Elements live in a flat vector and refer to each other by [`ElementId`].
//! Child and group lists are allocated in a [`Bump`] arena, token text is
//! borrowed from the source. Ids are handed out in construction order, and
//! a parent can only be built from ids that already exist, so children always
//! precede their parents.

use core::fmt;

use bumpalo::Bump;
use smallvec::SmallVec;

use crate::parser::{Rule, Span};

/// Stable index of an element inside a [`SyntaxTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One `(operator, right operand)` pair of a repetition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RepeatedGroup {
    pub operator: ElementId,
    pub operand: ElementId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementKind<'a> {
    /// Leaf holding raw source text.
    Token { text: &'a str },
    /// Production with a fixed, ordered list of children.
    Node { children: &'a [ElementId] },
    /// Zero or more operator/operand groups.
    Repetition { groups: &'a [RepeatedGroup] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub rule: Rule,
    pub span: Span,
    pub kind: ElementKind<'a>,
}

impl<'a> Element<'a> {
    pub fn children(&self) -> SmallVec<[ElementId; 4]> {
        match self.kind {
            ElementKind::Token { .. } => SmallVec::new(),
            ElementKind::Node { children } => SmallVec::from_slice(children),
            ElementKind::Repetition { groups } => groups
                .iter()
                .flat_map(|group| [group.operator, group.operand])
                .collect(),
        }
    }

    pub fn text(&self) -> Option<&'a str> {
        match self.kind {
            ElementKind::Token { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxTree<'a> {
    source: &'a str,
    elements: Vec<Element<'a>>,
    root: ElementId,
}

impl<'a> SyntaxTree<'a> {
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element<'a>> {
        self.elements.get(id.index())
    }

    /// Child ids of `id` in source order; empty for tokens and unknown ids.
    pub fn children(&self, id: ElementId) -> SmallVec<[ElementId; 4]> {
        self.get(id).map(Element::children).unwrap_or_default()
    }

    fn fmt_element(&self, f: &mut fmt::Formatter<'_>, id: ElementId, indent: usize) -> fmt::Result {
        let Some(element) = self.get(id) else {
            return writeln!(f, "{:indent$}<missing {}>", "", id.index());
        };
        match element.kind {
            ElementKind::Token { text } => {
                writeln!(f, "{:indent$}{:?} {:?}", "", element.rule, text)
            }
            ElementKind::Node { .. } | ElementKind::Repetition { .. } => {
                writeln!(f, "{:indent$}{:?}", "", element.rule)?;
                for child in element.children() {
                    self.fmt_element(f, child, indent + 2)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SyntaxTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_element(f, self.root, 0)
    }
}

/// Incrementally builds a [`SyntaxTree`] bottom-up.
///
/// The parser uses this to lower pest pairs; tests use it to build trees the
/// grammar would never produce.
pub struct SyntaxTreeBuilder<'a> {
    arena: &'a Bump,
    source: &'a str,
    elements: Vec<Element<'a>>,
}

impl<'a> SyntaxTreeBuilder<'a> {
    pub fn new(arena: &'a Bump, source: &'a str) -> Self {
        Self {
            arena,
            source,
            elements: Vec::new(),
        }
    }

    pub fn token(&mut self, rule: Rule, span: Span, text: &'a str) -> ElementId {
        self.push(rule, span, ElementKind::Token { text })
    }

    pub fn node(&mut self, rule: Rule, span: Span, children: &[ElementId]) -> ElementId {
        debug_assert!(children.iter().all(|c| c.index() < self.elements.len()));
        let children = self.arena.alloc_slice_copy(children);
        self.push(rule, span, ElementKind::Node { children })
    }

    pub fn repetition(&mut self, rule: Rule, span: Span, groups: &[RepeatedGroup]) -> ElementId {
        debug_assert!(groups.iter().all(|g| {
            g.operator.index() < self.elements.len() && g.operand.index() < self.elements.len()
        }));
        let groups = self.arena.alloc_slice_copy(groups);
        self.push(rule, span, ElementKind::Repetition { groups })
    }

    pub fn finish(self, root: ElementId) -> SyntaxTree<'a> {
        SyntaxTree {
            source: self.source,
            elements: self.elements,
            root,
        }
    }

    fn push(&mut self, rule: Rule, span: Span, kind: ElementKind<'a>) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element { rule, span, kind });
        id
    }
}
