//! Structure search: pick the least ugly layout.
//!
//! A tree of depth `d` has `2^d` structures. Candidates are independent, so
//! they are built and scored in parallel; the pick itself is sequential so
//! that ties always go to the earliest structure in enumeration order.

use rayon::prelude::*;
use tracing::debug;

use crate::data::Data;
use crate::error::{Result, TableError};
use crate::geometry::final_length;
use crate::tree::{Axis, Structure, Table};

/// Deepest tree accepted by exhaustive search (`2^16` candidates).
pub const MAX_SEARCH_DEPTH: usize = 16;

/// Every structure of length `depth`.
///
/// Level 0 varies slowest and the deepest level fastest, rows before
/// columns, so the all-row structure comes first and all-column last.
///
/// # Errors
///
/// [`TableError::SearchDepth`] when `depth` exceeds [`MAX_SEARCH_DEPTH`].
pub fn all_structures(depth: usize) -> Result<Structures> {
    if depth > MAX_SEARCH_DEPTH {
        return Err(TableError::SearchDepth {
            depth,
            max: MAX_SEARCH_DEPTH,
        });
    }
    Ok(Structures {
        depth,
        next: 0,
        end: 1 << depth,
    })
}

/// Iterator returned by [`all_structures`].
#[derive(Clone, Debug)]
pub struct Structures {
    depth: usize,
    next: u32,
    end: u32,
}

impl Iterator for Structures {
    type Item = Structure;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(
            (0..self.depth)
                .map(|level| Axis::ALL[((index >> (self.depth - 1 - level)) & 1) as usize])
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Structures {}

/// `rows + columns + |rows - columns|`, counted in leaf headers.
///
/// Equal to `2 * max(rows, columns)`: long thin tables score worst.
pub fn ugliness(table: &Table) -> usize {
    let rows = final_length(table.row_headers());
    let columns = final_length(table.column_headers());
    rows + columns + rows.abs_diff(columns)
}

impl Table {
    pub fn ugliness(&self) -> usize {
        ugliness(self)
    }
}

/// A built table and its score.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub table: Table,
    pub ugliness: usize,
}

/// Build and score every structure `data` accepts, in enumeration order.
///
/// Structures rejected for mixed depth are skipped.
pub fn rank(data: &Data) -> Result<Vec<Candidate>> {
    let structures: Vec<Structure> = all_structures(data.depth())?.collect();

    let built: Vec<Result<Candidate>> = structures
        .into_par_iter()
        .map(|structure| {
            let table = Table::new(data, structure)?;
            let ugliness = table.ugliness();
            Ok(Candidate { table, ugliness })
        })
        .collect();

    let mut candidates = Vec::with_capacity(built.len());
    for result in built {
        match result {
            Ok(candidate) => {
                debug!(
                    structure = %candidate.table.structure(),
                    ugliness = candidate.ugliness,
                    "scored candidate"
                );
                candidates.push(candidate);
            }
            Err(e) if e.is_structure_specific() => {
                debug!(error = %e, "skipping candidate");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(candidates)
}

/// The candidate with the lowest ugliness; the earliest one on ties.
pub fn optimal(data: &Data) -> Result<Table> {
    let mut best: Option<Candidate> = None;
    for candidate in rank(data)? {
        if best.as_ref().is_none_or(|b| candidate.ugliness < b.ugliness) {
            best = Some(candidate);
        }
    }
    let best = best.ok_or(TableError::NoCandidate)?;
    debug!(structure = %best.table.structure(), ugliness = best.ugliness, "picked layout");
    Ok(best.table)
}
