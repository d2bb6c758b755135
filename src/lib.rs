//! # kmap-rs: Karnaugh maps and boolean expressions in Rust
//!
//! **`kmap-rs`** fills and renders **Karnaugh maps** (K-maps) for boolean functions of 2 to 4 variables.
//! A map is driven by a list of minterms, a list of maxterms, or a boolean expression in infix notation.
//!
//! ## Expression Syntax
//!
//! - Variables are single letters `[A-Za-z]` (case-sensitive).
//! - `'` is NOT, written after its operand: `a'`, `(a+b)'`.
//! - `*` is AND, `+` is OR, `^` is XOR.
//! - Precedence: NOT > AND > OR = XOR. Operators of equal precedence group from the left.
//! - Parentheses group, whitespace is ignored.
//!
//! Expressions are converted once into postfix form with the shunting-yard algorithm,
//! and the resulting [`Postfix`][crate::parser::Postfix] is evaluated as many times as needed.
//!
//! ## Basic Usage
//!
//! ```rust
//! use kmap_rs::eval::{Assignment, Bit};
//! use kmap_rs::kmap::{KMap, Source};
//! use kmap_rs::parser::parse;
//!
//! // 1. Parse the expression once
//! let postfix = parse("a'*b + a*b'").unwrap();
//! assert_eq!(postfix.to_string(), "a ' b * a b ' * +");
//!
//! // 2. Evaluate it at a single point
//! let assignment = Assignment::from([('a', Bit::ONE), ('b', Bit::ZERO)]);
//! assert_eq!(postfix.evaluate(&assignment).unwrap(), Bit::ONE);
//!
//! // 3. Fill a 2-variable K-map
//! let kmap = KMap::new(2).unwrap();
//! let filled = kmap
//!     .fill(&Source::Expression { postfix: &postfix, dont_cares: &[] })
//!     .unwrap();
//! assert_eq!(filled.minterms(), vec![1, 2]);
//! println!("{}", filled);
//! ```
//!
//! ## Core Components
//!
//! - **[`parser`]**: infix to postfix conversion.
//! - **[`eval`]**: postfix evaluation over 0/1 assignments.
//! - **[`kmap`]**: K-map geometry, cell filling and rendering.
//! - **[`terms`]**: comma-separated term lists.
//! - **[`truth_table`]**: exhaustive evaluation of an expression.

pub mod error;
pub mod eval;
pub mod kmap;
pub mod parser;
pub mod terms;
pub mod token;
pub mod truth_table;
