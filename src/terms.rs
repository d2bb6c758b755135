//! Comma-separated lists of minterm, maxterm and don't-care indices.

use log::debug;

use crate::error::TermsError;

/// Parses a list such as `"0, 1, 2, 5"` into term indices.
///
/// Entries are trimmed and empty entries are skipped, so an empty string gives
/// an empty list. Repeated indices are kept once, in order of first appearance.
///
/// ```
/// use kmap_rs::terms::parse_terms;
///
/// assert_eq!(parse_terms("0,1, 2,,5").unwrap(), vec![0, 1, 2, 5]);
/// assert!(parse_terms("").unwrap().is_empty());
/// assert!(parse_terms("1,x").is_err());
/// ```
pub fn parse_terms(input: &str) -> Result<Vec<u32>, TermsError> {
    debug!("parse_terms(input = {:?})", input);

    let mut terms = Vec::new();
    for (position, entry) in input.split(',').enumerate() {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let invalid = || TermsError::InvalidTerm {
            term: entry.to_string(),
            position,
        };
        // Digits only: `u32::from_str` would also take a leading `+`.
        if !entry.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let term: u32 = entry.parse().map_err(|_| invalid())?;
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    Ok(terms)
}
