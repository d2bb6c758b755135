//! Karnaugh map geometry and cell filling.
//!
//! A K-map lays out the `2^n` input combinations of an `n`-variable function on
//! a grid whose rows and columns follow Gray-code order, so that neighbouring
//! cells differ in exactly one variable. Columns are labelled by the leading
//! variables and rows by the trailing ones:
//!
//! ```text
//!  vars | columns            | rows
//! ------+--------------------+--------------------
//!   2   | a:  0  1           | b:  0  1
//!   3   | ab: 00 01 11 10    | c:  0  1
//!   4   | ab: 00 01 11 10    | cd: 00 01 11 10
//! ```
//!
//! The index of a cell is the binary number formed by its column bits followed
//! by its row bits, `a` being the most significant bit. The same index
//! determines the cell's variable assignment (see [`Assignment::from_index`]).
//!
//! ```
//! use kmap_rs::kmap::{CellValue, KMap, Source};
//!
//! let kmap = KMap::new(3).unwrap();
//! let filled = kmap
//!     .fill(&Source::Minterms { terms: &[0, 2, 5], dont_cares: &[7] })
//!     .unwrap();
//! assert_eq!(filled.cell(5), CellValue::One);
//! assert_eq!(filled.cell(7), CellValue::DontCare);
//! assert_eq!(filled.minterms(), vec![0, 2, 5]);
//! ```

use std::fmt;

use log::{debug, trace};

use crate::error::KmapError;
use crate::eval::{evaluate, Assignment, Bit};
use crate::parser::Postfix;

/// Content of a K-map cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CellValue {
    Zero,
    One,
    DontCare,
}

impl CellValue {
    /// The cell's bit, or `None` for a don't-care.
    pub fn bit(self) -> Option<Bit> {
        match self {
            CellValue::Zero => Some(Bit::ZERO),
            CellValue::One => Some(Bit::ONE),
            CellValue::DontCare => None,
        }
    }
}

impl From<Bit> for CellValue {
    fn from(bit: Bit) -> Self {
        if bit.is_one() {
            CellValue::One
        } else {
            CellValue::Zero
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellValue::Zero => "0",
            CellValue::One => "1",
            CellValue::DontCare => "d",
        };
        f.pad(s)
    }
}

/// Where the cell values come from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Listed cells are 1, the others 0.
    Minterms { terms: &'a [u32], dont_cares: &'a [u32] },
    /// Listed cells are 0, the others 1.
    Maxterms { terms: &'a [u32], dont_cares: &'a [u32] },
    /// Each cell is the value of the expression at the cell's assignment.
    Expression { postfix: &'a Postfix, dont_cares: &'a [u32] },
}

impl<'a> Source<'a> {
    pub fn dont_cares(&self) -> &'a [u32] {
        match *self {
            Source::Minterms { dont_cares, .. }
            | Source::Maxterms { dont_cares, .. }
            | Source::Expression { dont_cares, .. } => dont_cares,
        }
    }

    fn terms(&self) -> &'a [u32] {
        match *self {
            Source::Minterms { terms, .. } | Source::Maxterms { terms, .. } => terms,
            Source::Expression { .. } => &[],
        }
    }
}

/// Gray-code sequence of `bits`-bit numbers: 0, 1, 3, 2, ...
fn gray_sequence(bits: usize) -> Vec<u32> {
    (0..1u32 << bits).map(|i| i ^ (i >> 1)).collect()
}

fn variable_names(range: std::ops::Range<usize>) -> String {
    range.map(|k| (b'a' + k as u8) as char).collect()
}

/// Layout of a K-map for 2, 3 or 4 variables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KMap {
    num_vars: usize,
    col_bits: usize,
    row_bits: usize,
    /// Gray-code labels of the columns, left to right.
    cols: Vec<u32>,
    /// Gray-code labels of the rows, top to bottom.
    rows: Vec<u32>,
}

impl KMap {
    pub fn new(num_vars: usize) -> Result<Self, KmapError> {
        let (col_bits, row_bits) = match num_vars {
            2 => (1, 1),
            3 => (2, 1),
            4 => (2, 2),
            _ => return Err(KmapError::UnsupportedVariableCount(num_vars)),
        };
        Ok(Self {
            num_vars,
            col_bits,
            row_bits,
            cols: gray_sequence(col_bits),
            rows: gray_sequence(row_bits),
        })
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    pub fn num_cells(&self) -> usize {
        1 << self.num_vars
    }

    /// Names of the column variables, e.g. `"ab"`.
    pub fn column_variables(&self) -> String {
        variable_names(0..self.col_bits)
    }

    /// Names of the row variables, e.g. `"cd"`.
    pub fn row_variables(&self) -> String {
        variable_names(self.col_bits..self.num_vars)
    }

    /// Binary labels of the columns, left to right.
    pub fn column_labels(&self) -> Vec<String> {
        self.cols
            .iter()
            .map(|&g| format!("{:0width$b}", g, width = self.col_bits))
            .collect()
    }

    /// Binary labels of the rows, top to bottom.
    pub fn row_labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|&g| format!("{:0width$b}", g, width = self.row_bits))
            .collect()
    }

    /// Index of the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the map.
    pub fn cell_index(&self, row: usize, col: usize) -> u32 {
        (self.cols[col] << self.row_bits) | self.rows[row]
    }

    /// Position (`row`, `col`) of the cell with the given index.
    pub fn cell_position(&self, index: u32) -> Option<(usize, usize)> {
        if index as usize >= self.num_cells() {
            return None;
        }
        let row_mask = (1u32 << self.row_bits) - 1;
        let row = self.rows.iter().position(|&g| g == index & row_mask)?;
        let col = self.cols.iter().position(|&g| g == index >> self.row_bits)?;
        Some((row, col))
    }

    /// Variable values of the cell at (`row`, `col`).
    pub fn assignment(&self, row: usize, col: usize) -> Assignment {
        Assignment::from_index(self.cell_index(row, col), self.num_vars)
    }

    fn check_range(&self, terms: &[u32]) -> Result<(), KmapError> {
        let max = self.num_cells() as u32 - 1;
        match terms.iter().find(|&&term| term > max) {
            Some(&term) => Err(KmapError::TermOutOfRange { term, max }),
            None => Ok(()),
        }
    }

    /// Computes the value of every cell.
    ///
    /// A cell listed as a don't-care is [`CellValue::DontCare`] whatever the
    /// terms or the expression say.
    pub fn fill(&self, source: &Source<'_>) -> Result<FilledKMap, KmapError> {
        debug!("fill(num_vars = {}, source = {:?})", self.num_vars, source);

        self.check_range(source.terms())?;
        self.check_range(source.dont_cares())?;

        let mut cells = Vec::with_capacity(self.num_cells());
        for index in 0..self.num_cells() as u32 {
            let value = if source.dont_cares().contains(&index) {
                CellValue::DontCare
            } else {
                match source {
                    Source::Minterms { terms, .. } => CellValue::from(Bit::from(terms.contains(&index))),
                    Source::Maxterms { terms, .. } => CellValue::from(Bit::from(!terms.contains(&index))),
                    Source::Expression { postfix, .. } => {
                        let assignment = Assignment::from_index(index, self.num_vars);
                        CellValue::from(evaluate(postfix, &assignment)?)
                    }
                }
            };
            trace!("cell {:0width$b} = {}", index, value, width = self.num_vars);
            cells.push(value);
        }

        Ok(FilledKMap {
            kmap: self.clone(),
            cells,
        })
    }
}

/// A K-map with a value in every cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FilledKMap {
    kmap: KMap,
    /// Cell values by cell index.
    cells: Vec<CellValue>,
}

impl FilledKMap {
    pub fn kmap(&self) -> &KMap {
        &self.kmap
    }

    /// Value of the cell with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a cell of the map.
    pub fn cell(&self, index: u32) -> CellValue {
        self.cells[index as usize]
    }

    /// Value of the cell at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> CellValue {
        self.cell(self.kmap.cell_index(row, col))
    }

    /// Cell values row by row, in display order.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        (0..self.kmap.num_rows())
            .map(|row| {
                (0..self.kmap.num_cols())
                    .map(|col| self.get(row, col))
                    .collect()
            })
            .collect()
    }

    fn indices_of(&self, value: CellValue) -> Vec<u32> {
        (0..self.cells.len() as u32)
            .filter(|&i| self.cells[i as usize] == value)
            .collect()
    }

    /// Indices of the cells holding 1, ascending.
    pub fn minterms(&self) -> Vec<u32> {
        self.indices_of(CellValue::One)
    }

    /// Indices of the cells holding 0, ascending.
    pub fn maxterms(&self) -> Vec<u32> {
        self.indices_of(CellValue::Zero)
    }

    /// Indices of the don't-care cells, ascending.
    pub fn dont_cares(&self) -> Vec<u32> {
        self.indices_of(CellValue::DontCare)
    }
}

impl fmt::Display for FilledKMap {
    /// Renders the map as a grid:
    ///
    /// ```text
    /// cd\ab  00  01  11  10
    ///    00   1   0   0   1
    ///    01   0   d   0   0
    ///    11   0   0   0   0
    ///    10   1   0   0   1
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner = format!("{}\\{}", self.kmap.row_variables(), self.kmap.column_variables());
        let width = corner.len();
        let cell_width = self.kmap.col_bits + 2;

        write!(f, "{}", corner)?;
        for label in self.kmap.column_labels() {
            write!(f, "{:>w$}", label, w = cell_width)?;
        }
        writeln!(f)?;

        for (row, label) in self.kmap.row_labels().into_iter().enumerate() {
            write!(f, "{:>w$}", label, w = width)?;
            for col in 0..self.kmap.num_cols() {
                write!(f, "{:>w$}", self.get(row, col), w = cell_width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
