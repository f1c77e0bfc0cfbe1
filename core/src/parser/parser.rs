use bumpalo::Bump;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::parser::Span;
use crate::parser::error::{ParseError, ParseErrorKind, convert_pest_error};
use crate::syntax::{ElementId, RepeatedGroup, SyntaxTree, SyntaxTreeBuilder};

/// Default nesting limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

/// How the evaluator treats the nodes produced by a grammar rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Production {
    /// Wraps a single operator symbol; never carries a value.
    Operator,
    /// Parenthesized group, indexed access or a plain atom.
    Primary,
    /// Unary prefix applied to an atom.
    UnaryPrimary,
    /// One precedence tier: `[left operand, repetition]`.
    BinaryTier,
    /// Zero or more `(operator, operand)` groups owned by a tier.
    Repetition,
    /// Marks its token as a numeric literal.
    Number,
    /// Single-child wrappers such as `expression`.
    Wrapper,
    /// Leaf symbols, literals and identifiers.
    Token,
}

impl Rule {
    pub fn production(self) -> Production {
        match self {
            Rule::logical_or_operator
            | Rule::logical_and_operator
            | Rule::bitwise_and_operator
            | Rule::relational_operator
            | Rule::additive_operator
            | Rule::multiplicative_operator
            | Rule::unary_operator => Production::Operator,

            Rule::primary => Production::Primary,
            Rule::expression_primary => Production::UnaryPrimary,

            Rule::expression_logical_or
            | Rule::expression_logical_and
            | Rule::expression_bitwise_and
            | Rule::expression_relational
            | Rule::expression_additive
            | Rule::expression_multiplicative => Production::BinaryTier,

            Rule::expression_logical_or_many
            | Rule::expression_logical_and_many
            | Rule::expression_bitwise_and_many
            | Rule::expression_relational_many
            | Rule::expression_additive_many
            | Rule::expression_multiplicative_many => Production::Repetition,

            Rule::number => Production::Number,
            Rule::main | Rule::expression => Production::Wrapper,
            _ => Production::Token,
        }
    }

    pub fn is_operator(self) -> bool {
        self.production() == Production::Operator
    }
}

/// Parse `source` into a syntax tree allocated in `arena`.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<SyntaxTree<'a>, ParseError> {
    parse_with_max_depth(arena, source, DEFAULT_MAX_DEPTH)
}

/// Parse `source`, rejecting input nested deeper than `max_depth` levels.
///
/// Every open parenthesis or bracket and every unary prefix opens one level,
/// so `-(a[(1)])` is four levels deep. The limit is checked before the
/// grammar runs, which keeps pest's recursive descent within a small thread
/// stack.
pub fn parse_with_max_depth<'a>(
    arena: &'a Bump,
    source: &'a str,
    max_depth: usize,
) -> Result<SyntaxTree<'a>, ParseError> {
    let deepest = check_nesting(source, max_depth)?;

    let mut pairs = ExpressionParser::parse(Rule::main, source)
        .map_err(|err| convert_pest_error(err, source, deepest))?;

    let expression = pairs
        .next()
        .and_then(|main| main.into_inner().find(|p| p.as_rule() == Rule::expression))
        .ok_or_else(|| other_error(source, "missing expression", Span::new(0, source.len())))?;

    let mut builder = TreeBuilder {
        tree: SyntaxTreeBuilder::new(arena, source),
        source,
    };
    let root = builder.build(expression)?;
    Ok(builder.tree.finish(root))
}

/// Measure the nesting of `source` lexically and return its deepest level.
fn check_nesting(source: &str, max_depth: usize) -> Result<usize, ParseError> {
    // Levels held by each unclosed bracket: the bracket plus the unary
    // prefixes written right before it.
    let mut open: Vec<usize> = Vec::new();
    let mut enclosing = 0;
    let mut prefixes = 0;
    let mut expect_operand = true;
    let mut deepest = 0;

    for (pos, c) in source.char_indices() {
        match c {
            '(' | '[' => {
                open.push(prefixes + 1);
                enclosing += prefixes + 1;
                prefixes = 0;
                expect_operand = true;
            }
            ')' | ']' => {
                if let Some(levels) = open.pop() {
                    enclosing -= levels;
                }
                prefixes = 0;
                expect_operand = false;
            }
            '+' | '-' | '!' if expect_operand => prefixes += 1,
            c if c.is_whitespace() => {}
            c if c.is_ascii_alphanumeric() || c == '_' || c == '.' => {
                prefixes = 0;
                expect_operand = false;
            }
            _ => expect_operand = true,
        }

        let depth = enclosing + prefixes;
        if depth > max_depth {
            return Err(ParseError::new(
                ParseErrorKind::MaxDepthExceeded { depth, max_depth },
                source.to_string(),
                Span::new(pos, pos + c.len_utf8()),
            ));
        }
        deepest = deepest.max(depth);
    }

    Ok(deepest)
}

fn other_error(source: &str, message: &str, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: message.to_string(),
        },
        source.to_string(),
        span,
    )
}

enum Step<'a> {
    Enter(Pair<'a, Rule>),
    /// All `children` of `pair` are on top of the built stack.
    Exit { pair: Pair<'a, Rule>, children: usize },
}

/// Converts pest pairs into arena elements, children before parents.
struct TreeBuilder<'a> {
    tree: SyntaxTreeBuilder<'a>,
    source: &'a str,
}

impl<'a> TreeBuilder<'a> {
    /// Lower `root` and everything under it without recursing.
    fn build(&mut self, root: Pair<'a, Rule>) -> Result<ElementId, ParseError> {
        let span: Span = root.as_span().into();
        let mut steps = vec![Step::Enter(root)];
        let mut built: Vec<ElementId> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(pair) => {
                    let inner: Vec<Pair<'a, Rule>> = pair.clone().into_inner().collect();
                    if inner.is_empty() && pair.as_rule().production() != Production::Repetition {
                        built.push(self.tree.token(pair.as_rule(), pair.as_span().into(), pair.as_str()));
                        continue;
                    }
                    steps.push(Step::Exit {
                        pair,
                        children: inner.len(),
                    });
                    steps.extend(inner.into_iter().rev().map(Step::Enter));
                }
                Step::Exit { pair, children } => {
                    let children = built.split_off(built.len().saturating_sub(children));
                    let id = self.lower(pair, &children)?;
                    built.push(id);
                }
            }
        }

        built
            .pop()
            .ok_or_else(|| other_error(self.source, "missing expression", span))
    }

    fn lower(&mut self, pair: Pair<'a, Rule>, children: &[ElementId]) -> Result<ElementId, ParseError> {
        let rule = pair.as_rule();
        let span: Span = pair.as_span().into();

        if rule.production() != Production::Repetition {
            return Ok(self.tree.node(rule, span, children));
        }

        let groups = children
            .chunks(2)
            .map(|chunk| match *chunk {
                [operator, operand] => Ok(RepeatedGroup { operator, operand }),
                _ => Err(other_error(
                    self.source,
                    "dangling operator in repetition",
                    span.clone(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.tree.repetition(rule, span, &groups))
    }
}
