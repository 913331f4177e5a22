//! Accessor paths and the data walker.
//!
//! An accessor path is the key sequence from the top of one axis's header
//! list down to a leaf header. A data cell is addressed by one row path and
//! one column path; the walker replays the table's structure, taking the
//! next key from whichever path the current level's axis names.
//!
//! ```text
//! structure = (column, row, column)
//! row path    = [r1]
//! column path = [c0, c2]
//!
//! level 0 -> column cursor -> c0
//! level 1 -> row cursor    -> r1
//! level 2 -> column cursor -> c2   => root[c0][r1][c2]
//! ```

use crate::data::{Key, Scalar};
use crate::headers::Header;
use crate::tree::{Axis, Entry, Table};

/// Keys from an axis root down to one leaf header.
pub type AccessorPath = Vec<Key>;

/// Stand-in path list for an axis without headers.
const NO_PATHS: &[AccessorPath] = &[Vec::new()];

/// A resolved data position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Value(&'a Scalar),
    Absent,
}

impl<'a> Cell<'a> {
    pub fn value(self) -> Option<&'a Scalar> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Cell::Absent)
    }
}

/// Every accessor path of `headers`, depth-first.
pub fn accessor_paths(headers: &[Header]) -> Vec<AccessorPath> {
    fn walk(headers: &[Header], prefix: &mut Vec<Key>, out: &mut Vec<AccessorPath>) {
        for header in headers {
            prefix.push(header.key().clone());
            match header {
                Header::Leaf(_) => out.push(prefix.clone()),
                Header::Group(_, children) => walk(children, prefix, out),
            }
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    walk(headers, &mut Vec::new(), &mut out);
    out
}

impl Table {
    pub fn row_paths(&self) -> &[AccessorPath] {
        self.row_paths.get_or_init(|| accessor_paths(self.row_headers()))
    }

    pub fn column_paths(&self) -> &[AccessorPath] {
        self.column_paths.get_or_init(|| accessor_paths(self.column_headers()))
    }

    /// Resolve the cell at (`row`, `column`).
    ///
    /// Any path that runs out early, a missing key, a node left over once the
    /// structure is exhausted, or a scalar reached with keys left over all
    /// resolve to [`Cell::Absent`].
    pub fn resolve<'a>(&'a self, row: &[Key], column: &[Key]) -> Cell<'a> {
        let mut node = self.root();
        let mut rows = row.iter();
        let mut columns = column.iter();

        for axis in self.structure().iter() {
            let cursor = match axis {
                Axis::Row => &mut rows,
                Axis::Column => &mut columns,
            };
            let Some(key) = cursor.next() else {
                return Cell::Absent;
            };
            match node.get(key) {
                Some(Entry::Node(child)) => node = child,
                Some(Entry::Scalar(scalar)) => {
                    let consumed = rows.as_slice().is_empty() && columns.as_slice().is_empty();
                    return if consumed && !scalar.is_absent() {
                        Cell::Value(scalar)
                    } else {
                        Cell::Absent
                    };
                }
                None => return Cell::Absent,
            }
        }

        Cell::Absent
    }

    /// All cells, row path outer and column path inner.
    pub fn cells(&self) -> Cells<'_> {
        let rows = match self.row_paths() {
            [] => NO_PATHS,
            paths => paths,
        };
        let columns = match self.column_paths() {
            [] => NO_PATHS,
            paths => paths,
        };
        Cells {
            table: self,
            rows,
            columns,
            row: 0,
            column: 0,
        }
    }
}

/// Iterator over the row-major cell sequence of a [`Table`].
#[derive(Clone, Debug)]
pub struct Cells<'a> {
    table: &'a Table,
    rows: &'a [AccessorPath],
    columns: &'a [AccessorPath],
    row: usize,
    column: usize,
}

impl<'a> Iterator for Cells<'a> {
    type Item = Cell<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.get(self.row)?;
        let column = self.columns.get(self.column)?;
        let cell = self.table.resolve(row, column);

        self.column += 1;
        if self.column == self.columns.len() {
            self.column = 0;
            self.row += 1;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.rows.len() * self.columns.len();
        let done = self.row * self.columns.len() + self.column;
        let left = total.saturating_sub(done);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cells<'_> {}
