//! Axis-tagged tree nodes and the [`Table`] built from them.
//!
//! ## Design
//!
//! Every nested mapping of the input becomes a [`TableNode`] carrying the
//! [`Axis`] of its depth. The axis decides whether the node's own keys become
//! row headers or column headers:
//!
//! ```text
//! structure = (column, row)
//!
//! level 0 (column):   a           b
//! level 1 (row):    aa  ab     ba  bb
//!
//!            a    b
//!      aa   11    -
//!      ab   12    -
//!      ba    -   21
//!      bb    -   22
//! ```
//!
//! Nodes are immutable once built, so derived header lists are cached in
//! `OnceLock`s and computed at most once per node. [`Table::new`] fills them
//! up front, since merging sibling headers can reject a structure.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::accessor::AccessorPath;
use crate::data::{Data, Key, Scalar, Value};
use crate::error::{Result, TableError};
use crate::headers::{self, Header};

/// Which side of the table a node's keys are laid out on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Keys become row headers (vertical, left of the data).
    #[serde(alias = "v", alias = "vertical")]
    Row,
    /// Keys become column headers (horizontal, above the data).
    #[serde(alias = "h", alias = "horizontal")]
    Column,
}

impl Axis {
    /// Both axes, in enumeration order.
    pub const ALL: [Axis; 2] = [Axis::Row, Axis::Column];

    /// One-letter form: `v` for rows, `h` for columns.
    pub const fn symbol(self) -> char {
        match self {
            Axis::Row => 'v',
            Axis::Column => 'h',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// One axis per nesting level, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Structure(Vec<Axis>);

impl Structure {
    pub fn new(axes: Vec<Axis>) -> Self {
        Self(axes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.0
    }

    pub fn get(&self, level: usize) -> Option<Axis> {
        self.0.get(level).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        self.0.iter().copied()
    }

    /// True when every level from `level` downward uses the same axis.
    pub fn is_uniform_from(&self, level: usize) -> bool {
        match self.0.get(level..) {
            Some([first, rest @ ..]) => rest.iter().all(|a| a == first),
            _ => true,
        }
    }

    /// Compact form such as `vhv`.
    pub fn symbols(&self) -> String {
        self.0.iter().map(|a| a.symbol()).collect()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, axis) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", axis)?;
        }
        f.write_str(")")
    }
}

impl From<Vec<Axis>> for Structure {
    fn from(axes: Vec<Axis>) -> Self {
        Self(axes)
    }
}

impl<const N: usize> From<[Axis; N]> for Structure {
    fn from(axes: [Axis; N]) -> Self {
        Self(axes.to_vec())
    }
}

impl From<&[Axis]> for Structure {
    fn from(axes: &[Axis]) -> Self {
        Self(axes.to_vec())
    }
}

impl FromIterator<Axis> for Structure {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A child of a [`TableNode`]: a terminal scalar or a nested node.
#[derive(Clone, Debug)]
pub enum Entry {
    Scalar(Scalar),
    Node(TableNode),
}

/// A mapping tagged with the axis its keys are laid out on.
#[derive(Clone, Debug)]
pub struct TableNode {
    axis: Axis,
    entries: Vec<(Key, Entry)>,
    index: HashMap<Key, usize>,
    row_headers: OnceLock<Vec<Header>>,
    column_headers: OnceLock<Vec<Header>>,
}

impl TableNode {
    /// Wrap `data` (found at `level`) and everything below it.
    ///
    /// `structure` must already have one axis per level of the full tree.
    fn wrap(data: &Data, structure: &Structure, level: usize) -> Result<Self> {
        let axis = structure
            .get(level)
            .ok_or(TableError::StructureLength {
                expected: level + 1,
                found: structure.len(),
            })?;

        let mut entries = Vec::with_capacity(data.len());
        for (key, value) in data {
            let entry = match value {
                Value::Nested(child) => Entry::Node(Self::wrap(child, structure, level + 1)?),
                Value::Scalar(scalar) => {
                    if level + 1 < structure.len() && !structure.is_uniform_from(level) {
                        return Err(TableError::MixedDepth {
                            key: key.to_string(),
                            level,
                            structure: structure.clone(),
                        });
                    }
                    Entry::Scalar(scalar.clone())
                }
            };
            entries.push((key.clone(), entry));
        }

        Ok(Self {
            axis,
            entries,
            index: data.index().clone(),
            row_headers: OnceLock::new(),
            column_headers: OnceLock::new(),
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Entry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    pub fn get(&self, key: &Key) -> Option<&Entry> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nested header list contributed by this subtree on `axis`.
    ///
    /// Filled for every node while the owning [`Table`] is built.
    pub fn headers(&self, axis: Axis) -> &[Header] {
        self.header_cache(axis)
            .get()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Extract and cache headers on first call.
    pub(crate) fn try_headers(&self, axis: Axis) -> Result<&[Header]> {
        let cache = self.header_cache(axis);
        if let Some(headers) = cache.get() {
            return Ok(headers);
        }
        let headers = headers::extract(self, axis)?;
        Ok(cache.get_or_init(|| headers))
    }

    fn header_cache(&self, axis: Axis) -> &OnceLock<Vec<Header>> {
        match axis {
            Axis::Row => &self.row_headers,
            Axis::Column => &self.column_headers,
        }
    }
}

/// A tree with a structure applied, ready to render.
#[derive(Clone, Debug)]
pub struct Table {
    root: TableNode,
    structure: Structure,
    pub(crate) row_paths: OnceLock<Vec<AccessorPath>>,
    pub(crate) column_paths: OnceLock<Vec<AccessorPath>>,
}

impl Table {
    /// Apply `structure` to `data`.
    ///
    /// # Errors
    ///
    /// - [`TableError::StructureLength`] unless the structure has exactly one
    ///   axis per level of `data`
    /// - [`TableError::MixedDepth`] when a scalar sits above the deepest level
    ///   and the structure changes axis below it
    /// - [`TableError::HeaderConflict`] when merged sibling headers use one key
    ///   both as a leaf and as a group
    pub fn new(data: &Data, structure: impl Into<Structure>) -> Result<Self> {
        let structure = structure.into();
        let depth = data.depth();
        if structure.len() != depth {
            return Err(TableError::StructureLength {
                expected: depth,
                found: structure.len(),
            });
        }

        let root = TableNode::wrap(data, &structure, 0)?;
        root.try_headers(Axis::Row)?;
        root.try_headers(Axis::Column)?;
        trace!(structure = %structure, depth, "built table");

        Ok(Self {
            root,
            structure,
            row_paths: OnceLock::new(),
            column_paths: OnceLock::new(),
        })
    }

    pub fn root(&self) -> &TableNode {
        &self.root
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn row_headers(&self) -> &[Header] {
        self.root.headers(Axis::Row)
    }

    pub fn column_headers(&self) -> &[Header] {
        self.root.headers(Axis::Column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Axis::{Column, Row};

    fn two_levels() -> Data {
        let a = Data::from_pairs([("aa", 11), ("ab", 12)]).unwrap();
        let b = Data::from_pairs([("ba", 21)]).unwrap();
        Data::from_pairs([("a", a), ("b", b)]).unwrap()
    }

    fn mixed() -> Data {
        let a = Data::from_pairs([("aa", 11), ("ab", 12)]).unwrap();
        let mut data = Data::new();
        data.push("a", a).unwrap();
        data.push("b", 2).unwrap();
        data
    }

    #[test]
    fn axis_per_level() {
        let table = Table::new(&two_levels(), [Column, Row]).unwrap();
        assert_eq!(table.root().axis(), Column);
        for (_, entry) in table.root().iter() {
            match entry {
                Entry::Node(child) => assert_eq!(child.axis(), Row),
                Entry::Scalar(_) => panic!("expected nested node"),
            }
        }
    }

    #[test]
    fn scalars_stay_unwrapped() {
        let table = Table::new(&two_levels(), [Row, Row]).unwrap();
        let Some(Entry::Node(a)) = table.root().get(&"a".into()) else {
            panic!("missing a");
        };
        assert!(matches!(a.get(&"aa".into()), Some(Entry::Scalar(Scalar::Int(11)))));
    }

    #[test]
    fn short_structure_is_rejected() {
        let err = Table::new(&two_levels(), [Row]).unwrap_err();
        assert_eq!(err, TableError::StructureLength { expected: 2, found: 1 });
    }

    #[test]
    fn long_structure_is_rejected() {
        let err = Table::new(&two_levels(), [Row, Row, Column]).unwrap_err();
        assert_eq!(err, TableError::StructureLength { expected: 2, found: 3 });
    }

    #[test]
    fn mixed_depth_accepted_on_uniform_structures() {
        assert!(Table::new(&mixed(), [Row, Row]).is_ok());
        assert!(Table::new(&mixed(), [Column, Column]).is_ok());
    }

    #[test]
    fn mixed_depth_rejected_when_axis_changes() {
        for structure in [[Row, Column], [Column, Row]] {
            let err = Table::new(&mixed(), structure).unwrap_err();
            assert!(matches!(err, TableError::MixedDepth { level: 0, ref key, .. } if key == "b"));
        }
    }

    #[test]
    fn leaf_and_group_with_one_key_conflict_when_merged() {
        let p = Data::from_pairs([("q", 1)]).unwrap();
        let a = Data::from_pairs([("p", p)]).unwrap();
        let b = Data::from_pairs([("p", 2)]).unwrap();
        let data = Data::from_pairs([("a", a), ("b", b)]).unwrap();
        let err = Table::new(&data, [Row, Column, Column]).unwrap_err();
        assert_eq!(
            err,
            TableError::HeaderConflict {
                key: "p".into(),
                axis: Column
            }
        );
        assert!(err.is_structure_specific());

        // Kept apart under their parents, the two `p`s are fine.
        assert!(Table::new(&data, [Column, Column, Column]).is_ok());
        assert!(Table::new(&data, [Row, Row, Row]).is_ok());
    }

    #[test]
    fn lookup_by_key_on_nodes() {
        let table = Table::new(&two_levels(), [Row, Column]).unwrap();
        let root = table.root();
        assert!(root.contains_key(&"b".into()));
        assert!(!root.contains_key(&"z".into()));
        let Some(Entry::Node(b)) = root.get(&"b".into()) else {
            panic!("missing b");
        };
        assert!(matches!(b.get(&"ba".into()), Some(Entry::Scalar(Scalar::Int(21)))));
    }

    #[test]
    fn structure_display_and_symbols() {
        let s = Structure::from([Row, Column, Column]);
        assert_eq!(s.to_string(), "(row, column, column)");
        assert_eq!(s.symbols(), "vhh");
        assert!(s.is_uniform_from(1));
        assert!(!s.is_uniform_from(0));
        assert!(s.is_uniform_from(3));
    }

    #[test]
    fn structure_deserializes_long_and_short_names() {
        let s: Structure = serde_json::from_str(r#"["row", "h", "column", "v"]"#).unwrap();
        assert_eq!(s, Structure::from([Row, Column, Column, Row]));
    }

    #[test]
    fn headers_are_cached() {
        let table = Table::new(&two_levels(), [Column, Column]).unwrap();
        let first = table.column_headers().as_ptr();
        let second = table.column_headers().as_ptr();
        assert_eq!(first, second);
    }
}
