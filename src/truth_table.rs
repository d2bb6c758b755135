//! Truth tables of parsed expressions.
//!
//! Row `i` of an `n`-variable table holds the value of the expression when the
//! variables `a`, `b`, ... take the bits of `i` written with `n` digits, most
//! significant first. This is the same numbering as the cells of a [`KMap`],
//! so the minterms of a table can be fed straight into a K-map.
//!
//! [`KMap`]: crate::kmap::KMap

use std::fmt;

use log::debug;

use crate::error::EvalError;
use crate::eval::{evaluate, Assignment, Bit};
use crate::parser::Postfix;

/// Largest number of variables a truth table is built for.
pub const MAX_VARS: usize = 8;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    num_vars: usize,
    values: Vec<Bit>,
}

impl TruthTable {
    /// Evaluates `postfix` at every assignment of `num_vars` variables.
    ///
    /// # Panics
    ///
    /// Panics if `num_vars` is 0 or greater than [`MAX_VARS`].
    pub fn from_postfix(postfix: &Postfix, num_vars: usize) -> Result<Self, EvalError> {
        assert!(
            (1..=MAX_VARS).contains(&num_vars),
            "Truth tables are built for 1 to {} variables, got {}",
            MAX_VARS,
            num_vars
        );
        debug!("TruthTable::from_postfix({}, num_vars = {})", postfix, num_vars);

        let values = (0..1u32 << num_vars)
            .map(|index| evaluate(postfix, &Assignment::from_index(index, num_vars)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { num_vars, values })
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at row `index`.
    pub fn value(&self, index: u32) -> Bit {
        self.values[index as usize]
    }

    /// Rows as `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Bit)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as u32, value))
    }

    /// Rows where the expression is 1.
    pub fn minterms(&self) -> Vec<u32> {
        self.iter()
            .filter(|(_, value)| value.is_one())
            .map(|(i, _)| i)
            .collect()
    }

    /// Rows where the expression is 0.
    pub fn maxterms(&self) -> Vec<u32> {
        self.iter()
            .filter(|(_, value)| value.is_zero())
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = (0..self.num_vars)
            .map(|k| (b'a' + k as u8) as char)
            .collect();
        writeln!(f, "{} | f", header)?;
        for (index, value) in self.iter() {
            writeln!(
                f,
                "{:0width$b} | {}",
                index,
                value,
                width = self.num_vars
            )?;
        }
        Ok(())
    }
}
