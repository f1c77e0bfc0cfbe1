//! Core evaluation logic.

use tracing::trace;

use crate::{
    api::Environment,
    evaluator::{
        EvalError,
        EvalErrorKind::*,
        operators,
    },
    parser::{Production, Rule, Span},
    syntax::{Element, ElementId, ElementKind, ParentLinks, RepeatedGroup, SyntaxTree},
    values::Value,
    visitor::Visitor,
};

/// Post-order visitor that memoizes one value per syntax element.
pub(super) struct Evaluator<'e> {
    variables: &'e Environment,
    parents: &'e ParentLinks,
    memo: Vec<Option<Value>>,
}

impl<'e> Evaluator<'e> {
    pub(super) fn new(tree: &SyntaxTree<'_>, variables: &'e Environment, parents: &'e ParentLinks) -> Self {
        Self {
            variables,
            parents,
            memo: vec![None; tree.len()],
        }
    }

    /// Take the value memoized for `id`, typically the root once the walk is done.
    pub(super) fn finish(mut self, tree: &SyntaxTree<'_>, id: ElementId) -> Result<Value, EvalError> {
        self.value_of(tree, id)?;
        match self.memo.get_mut(id.index()).and_then(Option::take) {
            Some(value) => Ok(value),
            None => Err(self.missing(tree, id)),
        }
    }

    fn eval_element(
        &self,
        tree: &SyntaxTree<'_>,
        element: &Element<'_>,
        id: ElementId,
    ) -> Result<Option<Value>, EvalError> {
        match element.kind {
            ElementKind::Token { text } => self.eval_token(tree, element, id, text),
            ElementKind::Repetition { .. } => Ok(None),
            ElementKind::Node { children } => self.eval_node(tree, element, children),
        }
    }

    fn eval_token(
        &self,
        tree: &SyntaxTree<'_>,
        element: &Element<'_>,
        id: ElementId,
        text: &str,
    ) -> Result<Option<Value>, EvalError> {
        if let Some(value) = self.variables.get(text) {
            return Ok(Some(value.clone()));
        }
        if self.parents.parent_rule(tree, id) != Some(Rule::number) {
            return Ok(None);
        }

        let literal = text.trim();
        if let Ok(value) = literal.parse::<i64>() {
            return Ok(Some(Value::Integer(value)));
        }
        match literal.parse::<f64>() {
            Ok(value) => Ok(Some(Value::Double(value))),
            Err(_) => Err(EvalError::new(
                MalformedNumber {
                    text: text.to_string(),
                },
                element.span.clone(),
            )),
        }
    }

    fn eval_node(
        &self,
        tree: &SyntaxTree<'_>,
        element: &Element<'_>,
        children: &[ElementId],
    ) -> Result<Option<Value>, EvalError> {
        let production = element.rule.production();
        if production == Production::Operator {
            return Ok(None);
        }
        if let [only] = children {
            return self.value_of(tree, *only).cloned().map(Some);
        }

        match production {
            Production::Primary => self.eval_primary(tree, element, children).map(Some),
            Production::UnaryPrimary => match *children {
                [op, operand] => {
                    let symbol = self.operator_text(tree, op)?;
                    let value = self.value_of(tree, operand)?;
                    operators::eval_unary(symbol, value)
                        .map(Some)
                        .map_err(|kind| EvalError::new(kind, element.span.clone()))
                }
                _ => Err(malformed(element, "expected operator and operand")),
            },
            Production::BinaryTier => match *children {
                [left, many] => self.eval_tier(tree, left, many).map(Some),
                _ => Err(malformed(element, "expected operand and repetition")),
            },
            _ => Ok(None),
        }
    }

    fn eval_primary(
        &self,
        tree: &SyntaxTree<'_>,
        element: &Element<'_>,
        children: &[ElementId],
    ) -> Result<Value, EvalError> {
        match *children {
            // ( expression )
            [_, inner, _] => self.value_of(tree, inner).cloned(),
            // base [ index ]
            [base, _, index, _] => {
                let index_value = self.value_of(tree, index)?;
                let Value::Integer(position) = *index_value else {
                    return Err(EvalError::new(
                        IndexNotInteger {
                            found: index_value.value_type(),
                        },
                        self.span_of(tree, index),
                    ));
                };
                let base_value = self.value_of(tree, base)?;
                let Value::Array(array) = base_value else {
                    return Err(EvalError::new(
                        NotAnArray {
                            found: base_value.value_type(),
                        },
                        self.span_of(tree, base),
                    ));
                };
                array.get(position).ok_or_else(|| {
                    EvalError::new(
                        IndexOutOfBounds {
                            index: position,
                            len: array.len(),
                        },
                        element.span.clone(),
                    )
                })
            }
            _ => Err(malformed(element, "unexpected number of children")),
        }
    }

    /// Fold the repetition groups of one precedence tier into the running
    /// left value.
    fn eval_tier(&self, tree: &SyntaxTree<'_>, left: ElementId, many: ElementId) -> Result<Value, EvalError> {
        let mut acc = self.value_of(tree, left)?.clone();

        let Some(repetition) = tree.get(many) else {
            return Err(self.missing(tree, many));
        };
        let ElementKind::Repetition { groups } = repetition.kind else {
            return Err(malformed(repetition, "expected a repetition"));
        };

        let left_span = self.span_of(tree, left);
        for &RepeatedGroup { operator, operand } in groups {
            let symbol = self.operator_text(tree, operator)?;
            let right = self.value_of(tree, operand)?;
            acc = operators::eval_binary(&acc, symbol, right).map_err(|kind| {
                EvalError::new(kind, Span::combine(&left_span, &self.span_of(tree, operand)))
            })?;
        }
        Ok(acc)
    }

    fn value_of(&self, tree: &SyntaxTree<'_>, id: ElementId) -> Result<&Value, EvalError> {
        match self.memo.get(id.index()) {
            Some(Some(value)) => Ok(value),
            _ => Err(self.missing(tree, id)),
        }
    }

    /// Error for an element whose value was needed but never computed.
    fn missing(&self, tree: &SyntaxTree<'_>, id: ElementId) -> EvalError {
        let Some(element) = tree.get(id) else {
            return EvalError::new(
                MissingValue { rule: Rule::EOI },
                Span::new(0, tree.source().len()),
            );
        };
        let kind = match element.kind {
            ElementKind::Token { text } if element.rule == Rule::identifier => UndefinedVariable {
                name: text.to_string(),
            },
            _ => MissingValue { rule: element.rule },
        };
        EvalError::new(kind, element.span.clone())
    }

    /// Symbol held by an operator node's single token child.
    fn operator_text<'t>(&self, tree: &SyntaxTree<'t>, id: ElementId) -> Result<&'t str, EvalError> {
        let Some(element) = tree.get(id) else {
            return Err(self.missing(tree, id));
        };
        if !element.rule.is_operator() {
            return Err(malformed(element, "expected an operator"));
        }
        match element.kind {
            ElementKind::Node { children: [token] } => tree
                .get(*token)
                .and_then(Element::text)
                .ok_or_else(|| malformed(element, "operator without a symbol")),
            _ => Err(malformed(element, "operator without a symbol")),
        }
    }

    fn span_of(&self, tree: &SyntaxTree<'_>, id: ElementId) -> Span {
        tree.get(id)
            .map(|element| element.span.clone())
            .unwrap_or_else(|| Span::new(0, tree.source().len()))
    }
}

impl<'a> Visitor<'a> for Evaluator<'_> {
    type Error = EvalError;

    fn visit(&mut self, tree: &SyntaxTree<'a>, id: ElementId) -> Result<(), EvalError> {
        let Some(element) = tree.get(id) else {
            return Err(self.missing(tree, id));
        };
        let value = self.eval_element(tree, element, id)?;
        trace!(rule = ?element.rule, id = id.index(), value = ?value, "Visited element");
        if let Some(slot) = self.memo.get_mut(id.index()) {
            *slot = value;
        }
        Ok(())
    }
}

fn malformed(element: &Element<'_>, reason: &'static str) -> EvalError {
    EvalError::new(
        MalformedTree {
            rule: element.rule,
            reason,
        },
        element.span.clone(),
    )
}
