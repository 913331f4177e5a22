//! Error types for table construction and structure search.
//!
//! Missing data is never an error: it degrades to an absent cell. The
//! variants below cover inputs that cannot produce a consistent table.

use thiserror::Error;

use crate::tree::{Axis, Structure};

/// Errors raised while building or searching tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The structure does not assign exactly one axis per nesting level.
    #[error("structure has {found} axes but the data is {expected} levels deep")]
    StructureLength { expected: usize, found: usize },

    /// A scalar sits above the deepest level and the levels below it switch axis.
    #[error(
        "key '{key}' holds a scalar at level {level}, but structure {structure} changes axis below it"
    )]
    MixedDepth {
        key: String,
        level: usize,
        structure: Structure,
    },

    /// Sibling subtrees merged onto one axis use a key both as a leaf header
    /// and as a header group.
    #[error("key '{key}' is both a leaf and a group among merged {axis} headers")]
    HeaderConflict { key: String, axis: Axis },

    /// Exhaustive search was requested for a tree deeper than the supported bound.
    #[error("cannot search all layouts of a {depth}-level tree (limit is {max})")]
    SearchDepth { depth: usize, max: usize },

    /// The same key appears twice within one mapping.
    #[error("duplicate key '{key}' in nested data")]
    DuplicateKey { key: String },

    /// Every candidate structure was rejected.
    #[error("no structure can render this data")]
    NoCandidate,
}

impl TableError {
    /// Whether another structure for the same data might still succeed.
    pub fn is_structure_specific(&self) -> bool {
        matches!(
            self,
            TableError::MixedDepth { .. } | TableError::HeaderConflict { .. }
        )
    }
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
