// Source spans and the operator vocabulary shared by the parser and evaluator.

use core::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start, b.0.end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Self(s.start()..s.end())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOp {
    Lt,
    Le,
    Ge,
    Gt,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// An operator appearing between two operands of a precedence tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOp {
    Arithmetic(BinaryOp),
    Comparison(ComparisonOp),
    BitAnd,
    Logical(BoolOp),
}

impl InfixOp {
    /// Map operator text, as it appears in the source, to an operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => InfixOp::Arithmetic(BinaryOp::Add),
            "-" => InfixOp::Arithmetic(BinaryOp::Sub),
            "*" => InfixOp::Arithmetic(BinaryOp::Mul),
            "/" => InfixOp::Arithmetic(BinaryOp::Div),
            "<" => InfixOp::Comparison(ComparisonOp::Lt),
            "<=" => InfixOp::Comparison(ComparisonOp::Le),
            ">=" => InfixOp::Comparison(ComparisonOp::Ge),
            ">" => InfixOp::Comparison(ComparisonOp::Gt),
            "&" => InfixOp::BitAnd,
            "&&" => InfixOp::Logical(BoolOp::And),
            "||" => InfixOp::Logical(BoolOp::Or),
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    Increment,
    Decrement,
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(UnaryOp::Plus),
            "-" => Some(UnaryOp::Neg),
            "++" => Some(UnaryOp::Increment),
            "--" => Some(UnaryOp::Decrement),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }
}
