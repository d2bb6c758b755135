//! Infix to postfix conversion of boolean expressions.
//!
//! The conversion is a single left-to-right scan with one operator stack
//! (Dijkstra's shunting-yard algorithm):
//!
//! - variables go straight to the output;
//! - an operator first pops every stacked operator of greater *or equal*
//!   precedence, then is pushed itself, so all operators are left-associative;
//! - `(` is pushed, `)` pops until the matching `(` which is discarded;
//! - at the end of input the remaining operators are popped.
//!
//! ```
//! use kmap_rs::parser::parse;
//!
//! let postfix = parse("(A+B)*C'").unwrap();
//! assert_eq!(postfix.to_string(), "A B + C ' *");
//! ```
//!
//! [`parse`] rejects unbalanced parentheses, stray characters, operators out of
//! infix position and operators lacking operands. [`parse_lenient`] never fails
//! and produces whatever the scan yields, which may then fail at evaluation time.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::{MalformedKind, ParseError};
use crate::eval::Bit;
use crate::token::{is_variable_name, Operator, Token};

/// A boolean expression in postfix (reverse Polish) order.
///
/// Immutable once built. Parse once, then evaluate as many times as needed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Postfix {
    tokens: Box<[Token]>,
}

impl Postfix {
    pub fn new(tokens: impl Into<Box<[Token]>>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Distinct variables in order of first appearance.
    pub fn variables(&self) -> Vec<char> {
        let mut vars: Vec<char> = Vec::new();
        for name in self.tokens.iter().filter_map(Token::as_variable) {
            if !vars.contains(&name) {
                vars.push(name);
            }
        }
        vars
    }

    /// Checks that the sequence evaluates to exactly one value.
    pub fn check_arity(&self) -> Result<(), MalformedKind> {
        if self.tokens.is_empty() {
            return Err(MalformedKind::Empty);
        }
        let mut depth: usize = 0;
        for token in self.tokens.iter() {
            match token {
                Token::Variable(_) | Token::Constant(_) => depth += 1,
                Token::Operator(op) => {
                    if depth < op.arity() {
                        return Err(MalformedKind::StackUnderflow { operator: *op });
                    }
                    depth = depth - op.arity() + 1;
                }
            }
        }
        if depth != 1 {
            return Err(MalformedKind::Leftover { count: depth });
        }
        Ok(())
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Postfix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Entry of the operator stack.
#[derive(Debug, Copy, Clone)]
enum Pending {
    /// Open parenthesis at the given byte offset.
    Open(usize),
    Op(Operator),
}

impl Pending {
    fn precedence(self) -> u8 {
        match self {
            Pending::Open(_) => 0,
            Pending::Op(op) => op.precedence(),
        }
    }
}

/// A non-whitespace character of the input.
#[derive(Debug, Copy, Clone)]
enum Symbol {
    Variable(char),
    Operator(Operator),
    Open,
    Close,
    Other(char),
}

/// Classifies the input, skipping whitespace. Offsets are in bytes.
fn symbols(expression: &str) -> impl Iterator<Item = (usize, Symbol)> + '_ {
    expression
        .char_indices()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, ch)| {
            let symbol = match ch {
                '(' => Symbol::Open,
                ')' => Symbol::Close,
                _ => match Operator::from_symbol(ch) {
                    Some(op) => Symbol::Operator(op),
                    None if is_variable_name(ch) => Symbol::Variable(ch),
                    None => Symbol::Other(ch),
                },
            };
            (position, symbol)
        })
}

#[derive(Default)]
struct ShuntingYard {
    output: Vec<Token>,
    stack: Vec<Pending>,
}

impl ShuntingYard {
    fn operand(&mut self, token: Token) {
        self.output.push(token);
    }

    fn operator(&mut self, op: Operator) {
        while let Some(&top) = self.stack.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.stack.pop();
            self.emit(top);
        }
        self.stack.push(Pending::Op(op));
    }

    fn open(&mut self, position: usize) {
        self.stack.push(Pending::Open(position));
    }

    /// Pops operators up to the matching `(`. Returns `false` if there is none.
    fn close(&mut self) -> bool {
        while let Some(top) = self.stack.pop() {
            match top {
                Pending::Open(_) => return true,
                Pending::Op(op) => self.output.push(Token::Operator(op)),
            }
        }
        false
    }

    /// Pops the remaining operators.
    ///
    /// Also returns the offsets of unclosed `(`, innermost first.
    fn finish(mut self) -> (Vec<Token>, Vec<usize>) {
        let mut unclosed = Vec::new();
        while let Some(top) = self.stack.pop() {
            match top {
                Pending::Open(position) => unclosed.push(position),
                Pending::Op(op) => self.output.push(Token::Operator(op)),
            }
        }
        (self.output, unclosed)
    }

    fn emit(&mut self, pending: Pending) {
        if let Pending::Op(op) = pending {
            self.output.push(Token::Operator(op));
        }
    }
}

fn convert_strict(expression: &str) -> Result<Vec<Token>, ParseError> {
    let mut yard = ShuntingYard::default();
    // Variables and `(` start an operand; binary operators need one next.
    let mut expect_operand = true;

    for (position, symbol) in symbols(expression) {
        let misplaced = |ch| ParseError::Misplaced { ch, position };
        match symbol {
            Symbol::Variable(name) => {
                if !expect_operand {
                    return Err(misplaced(name));
                }
                yard.operand(Token::Variable(name));
                expect_operand = false;
            }
            Symbol::Open => {
                if !expect_operand {
                    return Err(misplaced('('));
                }
                yard.open(position);
            }
            Symbol::Operator(op) => {
                if expect_operand {
                    return Err(misplaced(op.symbol()));
                }
                yard.operator(op);
                expect_operand = op.arity() == 2;
            }
            Symbol::Close => {
                if expect_operand {
                    return Err(misplaced(')'));
                }
                if !yard.close() {
                    return Err(ParseError::UnbalancedParentheses { position });
                }
            }
            Symbol::Other(ch) => return Err(ParseError::UnexpectedCharacter { ch, position }),
        }
    }

    let (tokens, unclosed) = yard.finish();
    if let Some(&position) = unclosed.first() {
        return Err(ParseError::UnbalancedParentheses { position });
    }
    Ok(tokens)
}

fn convert_lenient(expression: &str) -> Vec<Token> {
    let mut yard = ShuntingYard::default();

    for (position, symbol) in symbols(expression) {
        match symbol {
            Symbol::Variable(name) => yard.operand(Token::Variable(name)),
            Symbol::Operator(op) => yard.operator(op),
            Symbol::Open => yard.open(position),
            Symbol::Close => {
                if !yard.close() {
                    trace!("ignoring unmatched ')' at {}", position);
                }
            }
            Symbol::Other(ch) => {
                trace!("reading {:?} at {} as constant 0", ch, position);
                yard.operand(Token::Constant(Bit::ZERO));
            }
        }
    }

    let (tokens, unclosed) = yard.finish();
    if !unclosed.is_empty() {
        trace!("dropping unclosed '(' at {:?}", unclosed);
    }
    tokens
}

/// Converts an infix boolean expression into postfix order.
///
/// Fails on empty input, unbalanced parentheses, characters outside the
/// expression syntax, operators out of infix position (`*AB`, `'A`, `AB+`),
/// and operators with missing operands.
pub fn parse(expression: &str) -> Result<Postfix, ParseError> {
    debug!("parse(expression = {:?})", expression);

    if expression.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let postfix = Postfix::from(convert_strict(expression)?);
    postfix.check_arity().map_err(ParseError::Malformed)?;

    debug!("parse: postfix = {}", postfix);
    Ok(postfix)
}

/// Converts an infix boolean expression into postfix order without validation.
///
/// Unmatched `)` are ignored and unclosed `(` are dropped. Any other
/// character outside the syntax is read as an operand with value 0.
/// Misplaced operators are shunted as they come. The result is not
/// guaranteed to evaluate.
pub fn parse_lenient(expression: &str) -> Postfix {
    debug!("parse_lenient(expression = {:?})", expression);
    Postfix::from(convert_lenient(expression))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn var(name: char) -> Token {
        Token::Variable(name)
    }

    fn op(op: Operator) -> Token {
        Token::Operator(op)
    }

    #[test]
    fn test_parse_single_variable() {
        let postfix = parse("X").unwrap();
        assert_eq!(postfix.tokens(), &[var('X')]);
    }

    #[test]
    fn test_parse_not() {
        let postfix = parse("A'").unwrap();
        assert_eq!(postfix.tokens(), &[var('A'), op(Operator::Not)]);
    }

    #[test]
    fn test_parse_binary() {
        assert_eq!(
            parse("A*B").unwrap().tokens(),
            &[var('A'), var('B'), op(Operator::And)]
        );
        assert_eq!(
            parse("A+B").unwrap().tokens(),
            &[var('A'), var('B'), op(Operator::Or)]
        );
        assert_eq!(
            parse("A^B").unwrap().tokens(),
            &[var('A'), var('B'), op(Operator::Xor)]
        );
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(parse("A+B*C").unwrap().to_string(), "A B C * +");
        assert_eq!(parse("A*B+C").unwrap().to_string(), "A B * C +");
        assert_eq!(parse("A*B'").unwrap().to_string(), "A B ' *");
    }

    #[test]
    fn test_parse_parentheses() {
        assert_eq!(parse("(A+B)*C").unwrap().to_string(), "A B + C *");
        assert_eq!(parse("((A))").unwrap().to_string(), "A");
        assert_eq!(parse("(A^B)'").unwrap().to_string(), "A B ^ '");
    }

    #[test]
    fn test_parse_left_associative() {
        // Equal precedence pops: OR and XOR group from the left.
        assert_eq!(parse("A+B^C").unwrap().to_string(), "A B + C ^");
        assert_eq!(parse("A^B+C").unwrap().to_string(), "A B ^ C +");
        assert_eq!(parse("A*B*C").unwrap().to_string(), "A B * C *");
        assert_eq!(parse("A''").unwrap().to_string(), "A ' '");
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            parse(" a' * b +\ta * b' ").unwrap().to_string(),
            "a ' b * a b ' * +"
        );
    }

    #[test]
    fn test_parse_is_pure() {
        let first = parse("a'*b + (c ^ d)").unwrap();
        let second = parse("a'*b + (c ^ d)").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_case_sensitive() {
        let postfix = parse("a+A").unwrap();
        assert_eq!(postfix.variables(), vec!['a', 'A']);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_unmatched_close() {
        assert_eq!(
            parse("A+B)"),
            Err(ParseError::UnbalancedParentheses { position: 3 })
        );
    }

    #[test]
    fn test_parse_unclosed_open() {
        assert_eq!(
            parse("(A+(B"),
            Err(ParseError::UnbalancedParentheses { position: 3 })
        );
    }

    #[test]
    fn test_parse_unexpected_character() {
        assert_eq!(
            parse("A & B"),
            Err(ParseError::UnexpectedCharacter { ch: '&', position: 2 })
        );
        assert_eq!(
            parse("A+1"),
            Err(ParseError::UnexpectedCharacter { ch: '1', position: 2 })
        );
    }

    #[test]
    fn test_parse_missing_operand() {
        assert_eq!(
            parse("A+"),
            Err(ParseError::Malformed(MalformedKind::StackUnderflow {
                operator: Operator::Or
            }))
        );
        assert_eq!(
            parse("'"),
            Err(ParseError::Misplaced { ch: '\'', position: 0 })
        );
        assert_eq!(
            parse("()"),
            Err(ParseError::Misplaced { ch: ')', position: 1 })
        );
    }

    #[test]
    fn test_parse_missing_operator() {
        // Juxtaposition is not implicit AND.
        assert_eq!(
            parse("AB"),
            Err(ParseError::Misplaced { ch: 'B', position: 1 })
        );
        assert_eq!(
            parse("A(B)"),
            Err(ParseError::Misplaced { ch: '(', position: 1 })
        );
    }

    #[test]
    fn test_parse_misplaced_operator() {
        assert_eq!(
            parse("*AB"),
            Err(ParseError::Misplaced { ch: '*', position: 0 })
        );
        assert_eq!(
            parse("AB+"),
            Err(ParseError::Misplaced { ch: 'B', position: 1 })
        );
        assert_eq!(
            parse("'A"),
            Err(ParseError::Misplaced { ch: '\'', position: 0 })
        );
        assert_eq!(
            parse("A*'B"),
            Err(ParseError::Misplaced { ch: '\'', position: 2 })
        );
        assert_eq!(
            parse("(A)(B)^"),
            Err(ParseError::Misplaced { ch: '(', position: 3 })
        );
        assert_eq!(
            parse("A+*B"),
            Err(ParseError::Misplaced { ch: '*', position: 2 })
        );
        assert_eq!(
            parse("(+A)"),
            Err(ParseError::Misplaced { ch: '+', position: 1 })
        );
    }

    #[test]
    fn test_parse_operator_positions_accepted() {
        assert_eq!(parse("(A)'").unwrap().to_string(), "A '");
        assert_eq!(parse("A'*(B)'").unwrap().to_string(), "A ' B ' *");
        assert_eq!(parse("(A+B)*(C)").unwrap().to_string(), "A B + C *");
    }

    #[test]
    fn test_parse_lenient_unbalanced() {
        assert_eq!(parse_lenient("A+B)").to_string(), "A B +");
        assert_eq!(parse_lenient("(A+B").to_string(), "A B +");
        assert_eq!(parse_lenient("))A").to_string(), "A");
    }

    #[test]
    fn test_parse_lenient_unknown_is_zero() {
        assert_eq!(parse_lenient("A & B").to_string(), "A 0 B");
        assert_eq!(
            parse_lenient("A*1").tokens(),
            &[var('A'), Token::Constant(Bit::ZERO), op(Operator::And)]
        );
        assert!(parse_lenient("").is_empty());
    }

    #[test]
    fn test_parse_lenient_accepts_misplaced() {
        assert_eq!(parse_lenient("*AB").to_string(), "A B *");
        assert_eq!(parse_lenient("AB+").to_string(), "A B +");
        assert_eq!(parse_lenient("'A").to_string(), "A '");
        assert_eq!(parse_lenient("A*'B").to_string(), "A B ' *");
        assert_eq!(parse_lenient("(A)(B)^").to_string(), "A B ^");
    }

    #[test]
    fn test_parse_lenient_agrees_on_valid_input() {
        for expr in ["A", "A'", "a'*b + a*b'", "(A+B)*(C^D)'", "A+B*C"] {
            assert_eq!(parse_lenient(expr), parse(expr).unwrap());
        }
    }

    #[test]
    fn test_variables_order_of_appearance() {
        let postfix = parse("c*a + b'*a + c").unwrap();
        assert_eq!(postfix.variables(), vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_from_str() {
        let postfix: Postfix = "A*B".parse().unwrap();
        assert_eq!(postfix.len(), 3);
        assert!("A*".parse::<Postfix>().is_err());
    }

    #[test]
    fn test_check_arity() {
        assert!(Postfix::from(vec![var('A'), var('B'), op(Operator::And)])
            .check_arity()
            .is_ok());
        assert_eq!(
            Postfix::from(vec![op(Operator::Not)]).check_arity(),
            Err(MalformedKind::StackUnderflow {
                operator: Operator::Not
            })
        );
        assert_eq!(
            Postfix::from(vec![]).check_arity(),
            Err(MalformedKind::Empty)
        );
    }
}
