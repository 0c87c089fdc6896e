//! Cartesian combination of generated sets.

use crate::error::GeneratorError;
use crate::merge::merge_all;
use crate::types::{Element, GeneratedSet};

/// Cross product of `sets`, merged left to right and de-duplicated.
///
/// The index counter advances like an odometer from the rightmost set, so
/// output order is fully determined by input order. A combined element equal
/// to an earlier one is dropped. Fewer than two sets, or any empty set, yields
/// no elements.
pub fn cartesian(sets: &[GeneratedSet]) -> Result<Vec<Element>, GeneratorError> {
    if sets.len() < 2 {
        return Ok(Vec::new());
    }

    let columns: Vec<Vec<Element>> = sets.iter().map(GeneratedSet::combinable).collect();
    if columns.iter().any(Vec::is_empty) {
        return Ok(Vec::new());
    }

    let mut counter = vec![0usize; columns.len()];
    let mut results: Vec<Element> = Vec::new();

    loop {
        let combined = merge_all(
            counter
                .iter()
                .zip(&columns)
                .map(|(index, column)| &column[*index]),
        )?;
        if !results.contains(&combined) {
            results.push(combined);
        }

        if !advance(&mut counter, &columns) {
            return Ok(results);
        }
    }
}

/// Step the counter; false once the leftmost digit overflows.
fn advance(counter: &mut [usize], columns: &[Vec<Element>]) -> bool {
    for digit in (0..counter.len()).rev() {
        counter[digit] += 1;
        if counter[digit] < columns[digit].len() {
            return true;
        }
        counter[digit] = 0;
    }
    false
}
