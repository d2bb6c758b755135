//! Evaluation of postfix expressions over 0/1 variable assignments.

use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use log::trace;

use crate::error::{EvalError, MalformedKind};
use crate::parser::Postfix;
use crate::token::{Operator, Token};

/// A single binary digit, either 0 or 1.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Bit(u8);

impl Bit {
    pub const ZERO: Bit = Bit(0);
    pub const ONE: Bit = Bit(1);

    /// Returns the bit for `value`, or `None` unless `value` is 0 or 1.
    pub const fn new(value: u8) -> Option<Self> {
        match value {
            0 | 1 => Some(Bit(value)),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_one(self) -> bool {
        self.0 == 1
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit(value as u8)
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.0
    }
}

impl TryFrom<u8> for Bit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Bit::new(value).ok_or(value)
    }
}

impl BitAnd for Bit {
    type Output = Bit;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bit(self.0 & rhs.0)
    }
}

impl BitOr for Bit {
    type Output = Bit;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bit(self.0 | rhs.0)
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Bit(self.0 ^ rhs.0)
    }
}

impl Not for Bit {
    type Output = Bit;

    fn not(self) -> Self::Output {
        Bit(self.0 ^ 1)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values of variables at one evaluation point.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Assignment {
    values: HashMap<char, Bit>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the variables of a K-map cell or truth-table row.
    ///
    /// The `k`-th letter of the alphabet (`a` = 0) takes bit `k` of `index`
    /// written with `num_vars` binary digits, most significant first.
    /// Upper- and lower-case letters get the same value.
    ///
    /// ```
    /// use kmap_rs::eval::{Assignment, Bit};
    ///
    /// // 0b10 with two variables: a = 1, b = 0
    /// let assignment = Assignment::from_index(0b10, 2);
    /// assert_eq!(assignment.get_or_default('a'), Bit::ONE);
    /// assert_eq!(assignment.get_or_default('B'), Bit::ZERO);
    /// ```
    pub fn from_index(index: u32, num_vars: usize) -> Self {
        assert!(num_vars <= 26, "At most 26 variables can be named");
        let mut assignment = Self::new();
        for k in 0..num_vars {
            let shift = num_vars - 1 - k;
            let bit = Bit::from((index >> shift) & 1 == 1);
            let lower = (b'a' + k as u8) as char;
            assignment.set(lower, bit);
            assignment.set(lower.to_ascii_uppercase(), bit);
        }
        assignment
    }

    pub fn set(&mut self, name: char, value: Bit) {
        self.values.insert(name, value);
    }

    pub fn with(mut self, name: char, value: Bit) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: char) -> Option<Bit> {
        self.values.get(&name).copied()
    }

    /// Value of `name`, or 0 if it is not bound.
    pub fn get_or_default(&self, name: char) -> Bit {
        self.get(name).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(char, Bit)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (char, Bit)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(char, Bit); N]> for Assignment {
    fn from(pairs: [(char, Bit); N]) -> Self {
        pairs.into_iter().collect()
    }
}

fn run<F>(postfix: &Postfix, mut lookup: F) -> Result<Bit, EvalError>
where
    F: FnMut(char) -> Result<Bit, EvalError>,
{
    let mut stack: Vec<Bit> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match *token {
            Token::Variable(name) => stack.push(lookup(name)?),
            Token::Constant(bit) => stack.push(bit),
            Token::Operator(op) => {
                let underflow = || MalformedKind::StackUnderflow { operator: op };
                let right = stack.pop().ok_or_else(underflow)?;
                let value = match op {
                    Operator::Not => !right,
                    Operator::And | Operator::Or | Operator::Xor => {
                        let left = stack.pop().ok_or_else(underflow)?;
                        match op {
                            Operator::And => left & right,
                            Operator::Or => left | right,
                            _ => left ^ right,
                        }
                    }
                };
                stack.push(value);
            }
        }
    }

    match stack.len() {
        0 => Err(MalformedKind::Empty.into()),
        1 => Ok(stack[0]),
        count => Err(MalformedKind::Leftover { count }.into()),
    }
}

/// Evaluates `postfix` with the given variable values.
///
/// Variables missing from `assignment` evaluate to 0.
pub fn evaluate(postfix: &Postfix, assignment: &Assignment) -> Result<Bit, EvalError> {
    let result = run(postfix, |name| Ok(assignment.get_or_default(name)));
    trace!("evaluate({}, {:?}) -> {:?}", postfix, assignment, result);
    result
}

/// Like [`evaluate`], but a variable missing from `assignment` is an error.
pub fn evaluate_strict(postfix: &Postfix, assignment: &Assignment) -> Result<Bit, EvalError> {
    run(postfix, |name| {
        assignment.get(name).ok_or(EvalError::UnknownVariable(name))
    })
}

impl Postfix {
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Bit, EvalError> {
        evaluate(self, assignment)
    }
}
