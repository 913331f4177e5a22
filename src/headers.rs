//! Header extraction: nested header lists per axis.
//!
//! A header list mixes bare keys and groups:
//!
//! ```text
//! [a, b]                       two leaf headers
//! [(a, [aa, ab]), (b, [ba])]   two groups, each spanning its children
//! ```
//!
//! Sibling subtrees that share header keys on an axis whose parent lies on
//! the other axis collapse into a single header, keeping first-seen order.
//! Shared groups merge their children the same way.

use std::collections::HashMap;

use crate::data::Key;
use crate::error::{Result, TableError};
use crate::geometry;
use crate::tree::{Axis, Entry, TableNode};

/// A leaf header or a header grouping nested sub-headers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Header {
    Leaf(Key),
    Group(Key, Vec<Header>),
}

impl Header {
    pub fn leaf(key: impl Into<Key>) -> Self {
        Header::Leaf(key.into())
    }

    pub fn group(key: impl Into<Key>, children: Vec<Header>) -> Self {
        Header::Group(key.into(), children)
    }

    pub fn key(&self) -> &Key {
        match self {
            Header::Leaf(k) | Header::Group(k, _) => k,
        }
    }

    /// Sub-headers; empty for a leaf.
    pub fn children(&self) -> &[Header] {
        match self {
            Header::Leaf(_) => &[],
            Header::Group(_, children) => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Header::Leaf(_))
    }

    /// Levels occupied by this header and its descendants.
    pub fn depth(&self) -> usize {
        match self {
            Header::Leaf(_) => 1,
            Header::Group(_, children) => 1 + geometry::depth(children),
        }
    }
}

/// Headers contributed by `node` on `axis`.
///
/// Prefer [`TableNode::headers`], which caches the result.
///
/// # Errors
///
/// [`TableError::HeaderConflict`] when headers merged from sibling subtrees
/// use one key both as a leaf and as a group.
pub(crate) fn extract(node: &TableNode, axis: Axis) -> Result<Vec<Header>> {
    let own_axis = node.axis() == axis;
    let mut headers: Vec<Header> = Vec::new();
    let mut index: HashMap<Key, usize> = HashMap::new();

    for (key, entry) in node.iter() {
        if let Entry::Node(child) = entry {
            let child_headers = child.try_headers(axis)?;
            if !child_headers.is_empty() {
                if own_axis {
                    headers.push(Header::Group(key.clone(), child_headers.to_vec()));
                } else {
                    for header in child_headers {
                        merge(&mut headers, &mut index, header, axis)?;
                    }
                }
                continue;
            }
        }

        // Keys are unique within a node, so own-axis leaves never repeat.
        if own_axis {
            headers.push(Header::Leaf(key.clone()));
        }
    }

    Ok(headers)
}

/// Add `incoming` to `headers`, folding it into an existing header with the
/// same key. Groups merge their children recursively.
fn merge(
    headers: &mut Vec<Header>,
    index: &mut HashMap<Key, usize>,
    incoming: &Header,
    axis: Axis,
) -> Result<()> {
    let Some(&i) = index.get(incoming.key()) else {
        index.insert(incoming.key().clone(), headers.len());
        headers.push(incoming.clone());
        return Ok(());
    };

    match (&mut headers[i], incoming) {
        (Header::Leaf(_), Header::Leaf(_)) => Ok(()),
        (Header::Group(_, children), Header::Group(_, more)) => {
            let mut child_index = children
                .iter()
                .enumerate()
                .map(|(j, h)| (h.key().clone(), j))
                .collect();
            for header in more {
                merge(children, &mut child_index, header, axis)?;
            }
            Ok(())
        }
        _ => Err(TableError::HeaderConflict {
            key: incoming.key().to_string(),
            axis,
        }),
    }
}
