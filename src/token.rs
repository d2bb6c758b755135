//! Tokens of boolean expressions and the operator precedence table.
//!
//! The expression syntax uses single-letter variables and four operator symbols:
//!
//! | Symbol | Operator | Arity            | Precedence |
//! |--------|----------|------------------|------------|
//! | `'`    | NOT      | unary, postfix   | 3          |
//! | `*`    | AND      | binary, infix    | 2          |
//! | `+`    | OR       | binary, infix    | 1          |
//! | `^`    | XOR      | binary, infix    | 1          |
//!
//! Parentheses group subexpressions. They only live on the parser's operator
//! stack and never appear in a postfix sequence.

use std::fmt;

use crate::eval::Bit;

/// A boolean operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Xor,
}

impl Operator {
    /// Returns the operator denoted by `ch`, if any.
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Operator::Not),
            '*' => Some(Operator::And),
            '+' => Some(Operator::Or),
            '^' => Some(Operator::Xor),
            _ => None,
        }
    }

    /// Returns the source symbol of the operator.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Not => '\'',
            Operator::And => '*',
            Operator::Or => '+',
            Operator::Xor => '^',
        }
    }

    /// Binding strength of the operator. Higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Not => 3,
            Operator::And => 2,
            Operator::Or | Operator::Xor => 1,
        }
    }

    /// Number of operands consumed by the operator.
    pub const fn arity(self) -> usize {
        match self {
            Operator::Not => 1,
            Operator::And | Operator::Or | Operator::Xor => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Precedence of an arbitrary character.
///
/// Grouping symbols and anything that is not an operator have precedence 0,
/// which stops operator pops at an open-paren boundary.
pub fn precedence(ch: char) -> u8 {
    Operator::from_symbol(ch).map_or(0, Operator::precedence)
}

/// An element of a postfix sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    /// A single-letter variable, matching `[A-Za-z]`. Case-sensitive.
    Variable(char),
    /// A fixed value. Only lenient parsing emits these, for characters outside the syntax.
    Constant(Bit),
    Operator(Operator),
}

impl Token {
    pub fn is_variable(&self) -> bool {
        matches!(self, Token::Variable(_))
    }

    pub fn as_variable(&self) -> Option<char> {
        match *self {
            Token::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match *self {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Variable(name) => write!(f, "{}", name),
            Token::Constant(bit) => write!(f, "{}", bit),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Checks whether `ch` may name a variable.
pub fn is_variable_name(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}
