use std::fmt::Display;

use cursor::{Col, SourceRange};
use strum::EnumDiscriminants;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub data: TokenData,
    pub range: SourceRange<'a>,
}

impl<'a> Token<'a> {
    pub fn new(data: TokenData, range: impl Into<SourceRange<'a>>) -> Token<'a> {
        Self { data, range: range.into() }
    }

    pub fn ty(&self) -> TokenType {
        (&self.data).into()
    }

    pub fn lexeme(&self) -> &'a str {
        self.range.lexeme()
    }

    pub fn col(&self) -> Col {
        self.range.col()
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(TokenType))]
pub enum TokenData {
    Equal,
    LeftParen,
    RightParen,
    Operator(Operator),
    Number(f64),
    // The name is not stored here, it's always the token's lexeme
    Identifier,
}

/// A binary arithmetic operator. The variant carries everything the
/// parser and the evaluator need to know about it: its binding
/// strength and its semantics on `f64` operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Binding strength, ordered weakest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Term,
    Factor,
}

impl Operator {
    pub fn precedence(self) -> Precedence {
        match self {
            Operator::Add | Operator::Sub => Precedence::Term,
            Operator::Mul | Operator::Div | Operator::Rem => Precedence::Factor,
        }
    }

    /// Applies the operator with native `f64` semantics. Division and
    /// remainder by zero follow IEEE 754 (infinity/NaN), they are not
    /// guarded here.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
            Operator::Rem => left % right,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Rem => '%',
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
