//! End-to-end tests: parse terms or expressions, fill K-maps, cross-check with truth tables.

use kmap_rs::error::{KmapError, ParseError};
use kmap_rs::eval::{evaluate, Assignment, Bit};
use kmap_rs::kmap::{CellValue, KMap, Source};
use kmap_rs::parser::{parse, parse_lenient, Postfix};
use kmap_rs::terms::parse_terms;
use kmap_rs::token::{Operator, Token};
use kmap_rs::truth_table::TruthTable;

const BITS: [Bit; 2] = [Bit::ZERO, Bit::ONE];

// ─── Parser and Evaluator ──────────────────────────────────────────────────────

#[test]
fn single_variable() {
    let postfix = parse("X").unwrap();
    assert_eq!(postfix.tokens(), &[Token::Variable('X')]);
    assert_eq!(
        evaluate(&postfix, &Assignment::from([('X', Bit::ONE)])),
        Ok(Bit::ONE)
    );
    assert_eq!(
        evaluate(&postfix, &Assignment::from([('X', Bit::ZERO)])),
        Ok(Bit::ZERO)
    );
    assert_eq!(evaluate(&postfix, &Assignment::new()), Ok(Bit::ZERO));
}

#[test]
fn negation() {
    let postfix = parse("A'").unwrap();
    assert_eq!(
        postfix.tokens(),
        &[Token::Variable('A'), Token::Operator(Operator::Not)]
    );
    for a in BITS {
        let assignment = Assignment::from([('A', a)]);
        assert_eq!(evaluate(&postfix, &assignment), Ok(!a));
    }
}

#[test]
fn binary_operators() {
    let and = parse("A*B").unwrap();
    let or = parse("A+B").unwrap();
    let xor = parse("A^B").unwrap();
    for a in BITS {
        for b in BITS {
            let assignment = Assignment::from([('A', a), ('B', b)]);
            assert_eq!(evaluate(&and, &assignment), Ok(a & b));
            assert_eq!(evaluate(&or, &assignment), Ok(a | b));
            assert_eq!(evaluate(&xor, &assignment), Ok(a ^ b));
        }
    }
}

#[test]
fn grouping_changes_result() {
    let grouped = parse("(A+B)*C").unwrap();
    let plain = parse("A+B*C").unwrap();
    let assignment = Assignment::from([('A', Bit::ONE), ('B', Bit::ONE), ('C', Bit::ZERO)]);
    assert_eq!(grouped.evaluate(&assignment), Ok(Bit::ZERO));
    assert_eq!(plain.evaluate(&assignment), Ok(Bit::ONE));
}

#[test]
fn fail_fast_versus_lenient() {
    assert!(matches!(
        parse("(a+b"),
        Err(ParseError::UnbalancedParentheses { position: 0 })
    ));
    let lenient = parse_lenient("(a+b");
    let assignment = Assignment::from([('a', Bit::ONE)]);
    assert_eq!(lenient.evaluate(&assignment), Ok(Bit::ONE));

    // Lenient parsing keeps a dangling operator; evaluation reports it.
    assert!(parse_lenient("a*").evaluate(&assignment).is_err());
}

// ─── K-maps ────────────────────────────────────────────────────────────────────

#[test]
fn minterms_from_text() {
    let kmap = KMap::new(4).unwrap();
    let terms = parse_terms("0,1,2,5,6,7").unwrap();
    let dont_cares = parse_terms("").unwrap();
    let filled = kmap
        .fill(&Source::Minterms {
            terms: &terms,
            dont_cares: &dont_cares,
        })
        .unwrap();
    assert_eq!(filled.minterms(), vec![0, 1, 2, 5, 6, 7]);
    assert!(filled.dont_cares().is_empty());
}

#[test]
fn minterms_and_maxterms_are_dual() {
    let kmap = KMap::new(3).unwrap();
    let terms: [u32; 3] = [1, 4, 6];
    let from_min = kmap
        .fill(&Source::Minterms {
            terms: &terms,
            dont_cares: &[],
        })
        .unwrap();
    let from_max = kmap
        .fill(&Source::Maxterms {
            terms: &terms,
            dont_cares: &[],
        })
        .unwrap();
    assert_eq!(from_min.minterms(), from_max.maxterms());
    assert_eq!(from_min.maxterms(), from_max.minterms());
}

#[test]
fn dont_care_takes_precedence() {
    let kmap = KMap::new(4).unwrap();
    let filled = kmap
        .fill(&Source::Minterms {
            terms: &[3, 7],
            dont_cares: &[7, 9],
        })
        .unwrap();
    assert_eq!(filled.cell(3), CellValue::One);
    assert_eq!(filled.cell(7), CellValue::DontCare);
    assert_eq!(filled.cell(9), CellValue::DontCare);

    let postfix = parse("a+b+c+d").unwrap();
    let filled = kmap
        .fill(&Source::Expression {
            postfix: &postfix,
            dont_cares: &[15],
        })
        .unwrap();
    assert_eq!(filled.cell(15), CellValue::DontCare);
    assert_eq!(filled.cell(0), CellValue::Zero);
}

#[test]
fn expression_matches_truth_table() {
    let postfix = parse("(a ^ b)' * c + d'").unwrap();
    let kmap = KMap::new(4).unwrap();
    let filled = kmap
        .fill(&Source::Expression {
            postfix: &postfix,
            dont_cares: &[],
        })
        .unwrap();
    let table = TruthTable::from_postfix(&postfix, 4).unwrap();
    assert_eq!(filled.minterms(), table.minterms());

    // Feeding the minterms back in reproduces the same map.
    let minterms = table.minterms();
    let refilled = kmap
        .fill(&Source::Minterms {
            terms: &minterms,
            dont_cares: &[],
        })
        .unwrap();
    assert_eq!(refilled.rows(), filled.rows());
}

#[test]
fn each_cell_is_independent() {
    // The same postfix is shared by every cell evaluation.
    let postfix = parse("a*c'").unwrap();
    let kmap = KMap::new(3).unwrap();
    let filled = kmap
        .fill(&Source::Expression {
            postfix: &postfix,
            dont_cares: &[],
        })
        .unwrap();
    for row in 0..kmap.num_rows() {
        for col in 0..kmap.num_cols() {
            let expected = postfix.evaluate(&kmap.assignment(row, col)).unwrap();
            assert_eq!(filled.get(row, col), CellValue::from(expected));
        }
    }
}

#[test]
fn errors_propagate_to_kmap_error() {
    fn fill_from_text(vars: usize, expr: &str) -> Result<Vec<u32>, KmapError> {
        let kmap = KMap::new(vars)?;
        let postfix: Postfix = expr.parse()?;
        let filled = kmap.fill(&Source::Expression {
            postfix: &postfix,
            dont_cares: &[],
        })?;
        Ok(filled.minterms())
    }

    assert_eq!(fill_from_text(2, "a*b"), Ok(vec![3]));
    assert!(matches!(
        fill_from_text(5, "a"),
        Err(KmapError::UnsupportedVariableCount(5))
    ));
    assert!(matches!(
        fill_from_text(2, "a*"),
        Err(KmapError::Parse(ParseError::Malformed(_)))
    ));
}
