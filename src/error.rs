//! Error types for parsing, evaluation and K-map filling.

use std::fmt;

use crate::token::Operator;

/// Why a postfix sequence cannot be evaluated to a single value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MalformedKind {
    /// An operator found fewer operands on the stack than it needs.
    StackUnderflow { operator: Operator },
    /// More than one value was left after the whole sequence was consumed.
    Leftover { count: usize },
    /// The sequence had no tokens at all.
    Empty,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::StackUnderflow { operator } => {
                write!(f, "operator '{}' is missing an operand", operator)
            }
            MalformedKind::Leftover { count } => {
                write!(f, "{} values left on the stack, expected 1", count)
            }
            MalformedKind::Empty => write!(f, "empty expression"),
        }
    }
}

/// Errors produced while converting an infix expression to postfix.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// The expression contains nothing but whitespace.
    Empty,
    /// A `)` without a matching `(`, or a `(` that is never closed.
    ///
    /// `position` is the byte offset of the offending parenthesis.
    UnbalancedParentheses { position: usize },
    /// A character that is neither a variable, an operator, a parenthesis nor whitespace.
    UnexpectedCharacter { ch: char, position: usize },
    /// A variable, operator or parenthesis out of infix position, e.g. `*AB` or `AB`.
    Misplaced { ch: char, position: usize },
    /// Operators and operands do not line up.
    Malformed(MalformedKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Failed to parse boolean expression: empty input"),
            ParseError::UnbalancedParentheses { position } => write!(
                f,
                "Failed to parse boolean expression at position {}: unbalanced parentheses",
                position
            ),
            ParseError::UnexpectedCharacter { ch, position } => write!(
                f,
                "Failed to parse boolean expression at position {}: unexpected character {:?}",
                position, ch
            ),
            ParseError::Misplaced { ch, position } => write!(
                f,
                "Failed to parse boolean expression at position {}: misplaced {:?}",
                position, ch
            ),
            ParseError::Malformed(kind) => {
                write!(f, "Failed to parse boolean expression: {}", kind)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors produced while evaluating a postfix sequence.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EvalError {
    Malformed(MalformedKind),
    /// The variable has no value in the assignment (strict evaluation only).
    UnknownVariable(char),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Malformed(kind) => write!(f, "Malformed expression: {}", kind),
            EvalError::UnknownVariable(name) => write!(f, "Unknown variable '{}'", name),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<MalformedKind> for EvalError {
    fn from(kind: MalformedKind) -> Self {
        EvalError::Malformed(kind)
    }
}

/// Errors produced while reading a comma-separated term list.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TermsError {
    /// `term` is not a non-negative decimal integer. `position` is its index in the list.
    InvalidTerm { term: String, position: usize },
}

impl fmt::Display for TermsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermsError::InvalidTerm { term, position } => {
                write!(f, "Invalid term {:?} at position {}", term, position)
            }
        }
    }
}

impl std::error::Error for TermsError {}

/// Errors produced while building or filling a K-map.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KmapError {
    /// K-maps are drawn for 2, 3 or 4 variables only.
    UnsupportedVariableCount(usize),
    /// A term or don't-care index does not name a cell of the map.
    TermOutOfRange { term: u32, max: u32 },
    Parse(ParseError),
    Eval(EvalError),
    Terms(TermsError),
}

impl fmt::Display for KmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KmapError::UnsupportedVariableCount(n) => {
                write!(f, "K-maps support 2 to 4 variables, got {}", n)
            }
            KmapError::TermOutOfRange { term, max } => {
                write!(f, "Term {} is out of range (max {})", term, max)
            }
            KmapError::Parse(e) => write!(f, "{}", e),
            KmapError::Eval(e) => write!(f, "{}", e),
            KmapError::Terms(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for KmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KmapError::Parse(e) => Some(e),
            KmapError::Eval(e) => Some(e),
            KmapError::Terms(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for KmapError {
    fn from(err: ParseError) -> Self {
        KmapError::Parse(err)
    }
}

impl From<EvalError> for KmapError {
    fn from(err: EvalError) -> Self {
        KmapError::Eval(err)
    }
}

impl From<TermsError> for KmapError {
    fn from(err: TermsError) -> Self {
        KmapError::Terms(err)
    }
}
