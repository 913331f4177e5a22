//! # Nested HTML Tables (nested-tables)
//!
//! Renders an ordered tree of labeled categories with scalar leaves as an
//! HTML table whose headers merge to reflect the nesting, and picks the
//! least ugly layout among all row/column assignments.
//!
//! ## Design
//!
//! Each nesting level is assigned an [`Axis`]. The list of per-level axes is
//! a [`Structure`]:
//!
//! ```text
//!                    structure = (row, column)
//!
//! data                              table
//! ┌──────────────────────┐          ┌───┬────┬────┬────┐
//! │ a: { x: 1, y: 2 }    │    →     │   │ x  │ y  │ z  │
//! │ b: { x: 3, z: 4 }    │          ├───┼────┼────┼────┤
//! └──────────────────────┘          │ a │ 1  │ 2  │ -  │
//!                                   │ b │ 3  │ -  │ 4  │
//!                                   └───┴────┴────┴────┘
//! ```
//!
//! Headers shared by sibling subtrees collapse into one column (`x` above).
//! Positions without data render as a placeholder.
//!
//! ## Usage
//!
//! ```
//! use nested_tables::{build_optimal_table, build_table, nested, Axis};
//!
//! let data = nested! {
//!     "a" { "x" => 1; "y" => 2; }
//!     "b" { "x" => 3; "z" => 4; }
//! };
//!
//! let table = build_table(&data, [Axis::Row, Axis::Column]).unwrap();
//! assert_eq!(table.ugliness(), 6);
//! assert!(table.generate_html().starts_with("<table>"));
//!
//! let best = build_optimal_table(&data).unwrap();
//! assert_eq!(best.ugliness(), 6);
//! ```

extern crate self as nested_tables;

pub mod accessor;
pub mod data;
pub mod error;
pub mod geometry;
pub mod headers;
pub mod iter;
pub mod render;
pub mod search;
pub mod tree;

pub use accessor::{AccessorPath, Cell, Cells, accessor_paths};
pub use data::{Data, Key, Scalar, Value};
pub use error::{Result, TableError};
pub use geometry::{depth, final_length};
pub use headers::Header;
pub use iter::{HeaderCell, Span};
pub use render::{DEFAULT_PLACEHOLDER, HtmlRenderer, RenderOptions};
pub use search::{Candidate, MAX_SEARCH_DEPTH, all_structures, rank, ugliness};
pub use tree::{Axis, Entry, Structure, Table, TableNode};

pub use nested_tables_macro::nested;

/// Apply `structure` to `data`. See [`Table::new`].
pub fn build_table(data: &Data, structure: impl Into<Structure>) -> Result<Table> {
    Table::new(data, structure)
}

/// Build the least ugly table for `data`. See [`search::optimal`].
pub fn build_optimal_table(data: &Data) -> Result<Table> {
    search::optimal(data)
}
