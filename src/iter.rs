//! Header traversal in rendering order.
//!
//! HTML emits column headers one row at a time, so they are walked
//! breadth-first. Row headers share a `<tr>` with their first child, so they
//! are walked depth-first (pre-order).
//!
//! Both iterators borrow the header list and are cheap to recreate.

use std::mem;

use crate::data::Key;
use crate::geometry::{depth, final_length};
use crate::headers::Header;

/// Cell extent in table slots. `1` means no span attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub colspan: usize,
    pub rowspan: usize,
}

impl Span {
    pub const UNIT: Span = Span {
        colspan: 1,
        rowspan: 1,
    };

    pub const fn cols(n: usize) -> Self {
        Span {
            colspan: n,
            rowspan: 1,
        }
    }

    pub const fn rows(n: usize) -> Self {
        Span {
            colspan: 1,
            rowspan: n,
        }
    }
}

/// One header cell as the renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub key: &'a Key,
    /// 0 for the outermost headers.
    pub depth: usize,
    pub span: Span,
    /// True for headers without sub-headers.
    pub is_leaf: bool,
}

/// Breadth-first walk over column headers.
///
/// Groups span their leaf count horizontally. Leaves above the deepest level
/// stretch down to the first data row.
#[derive(Clone, Debug)]
pub struct ColumnHeaders<'a> {
    level: Vec<&'a Header>,
    pos: usize,
    next_level: Vec<&'a Header>,
    depth: usize,
    max_depth: usize,
}

pub fn column_headers(headers: &[Header]) -> ColumnHeaders<'_> {
    ColumnHeaders {
        level: headers.iter().collect(),
        pos: 0,
        next_level: Vec::new(),
        depth: 0,
        max_depth: depth(headers),
    }
}

impl<'a> Iterator for ColumnHeaders<'a> {
    type Item = HeaderCell<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&header) = self.level.get(self.pos) {
                self.pos += 1;
                let cell = match header {
                    Header::Group(key, children) => {
                        self.next_level.extend(children.iter());
                        HeaderCell {
                            key,
                            depth: self.depth,
                            span: Span::cols(final_length(children)),
                            is_leaf: false,
                        }
                    }
                    Header::Leaf(key) => HeaderCell {
                        key,
                        depth: self.depth,
                        span: Span::rows(self.max_depth - self.depth),
                        is_leaf: true,
                    },
                };
                return Some(cell);
            }

            if self.next_level.is_empty() {
                return None;
            }
            self.level = mem::take(&mut self.next_level);
            self.pos = 0;
            self.depth += 1;
        }
    }
}

/// Depth-first walk over row headers.
///
/// Groups span their leaf count vertically. Leaves above the deepest level
/// stretch right to the first data column.
#[derive(Clone, Debug)]
pub struct RowHeaders<'a> {
    stack: Vec<std::slice::Iter<'a, Header>>,
    max_depth: usize,
}

pub fn row_headers(headers: &[Header]) -> RowHeaders<'_> {
    RowHeaders {
        stack: vec![headers.iter()],
        max_depth: depth(headers),
    }
}

impl<'a> Iterator for RowHeaders<'a> {
    type Item = HeaderCell<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            match self.stack.last_mut()?.next() {
                None => {
                    self.stack.pop();
                }
                Some(Header::Group(key, children)) => {
                    self.stack.push(children.iter());
                    return Some(HeaderCell {
                        key,
                        depth,
                        span: Span::rows(final_length(children)),
                        is_leaf: false,
                    });
                }
                Some(Header::Leaf(key)) => {
                    return Some(HeaderCell {
                        key,
                        depth,
                        span: Span::cols(self.max_depth - depth),
                        is_leaf: true,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Header> {
        vec![
            Header::group(
                "a",
                vec![
                    Header::group("a1", vec![Header::leaf("x"), Header::leaf("y")]),
                    Header::leaf("a2"),
                ],
            ),
            Header::leaf("b"),
        ]
    }

    fn summary<'a>(
        cells: impl Iterator<Item = HeaderCell<'a>>,
    ) -> Vec<(String, usize, Span, bool)> {
        cells
            .map(|c| (c.key.to_string(), c.depth, c.span, c.is_leaf))
            .collect()
    }

    #[test]
    fn columns_are_breadth_first() {
        let headers = sample();
        assert_eq!(
            summary(column_headers(&headers)),
            [
                ("a".to_string(), 0, Span::cols(3), false),
                ("b".to_string(), 0, Span::rows(3), true),
                ("a1".to_string(), 1, Span::cols(2), false),
                ("a2".to_string(), 1, Span::rows(2), true),
                ("x".to_string(), 2, Span::UNIT, true),
                ("y".to_string(), 2, Span::UNIT, true),
            ]
        );
    }

    #[test]
    fn rows_are_depth_first() {
        let headers = sample();
        assert_eq!(
            summary(row_headers(&headers)),
            [
                ("a".to_string(), 0, Span::rows(3), false),
                ("a1".to_string(), 1, Span::rows(2), false),
                ("x".to_string(), 2, Span::UNIT, true),
                ("y".to_string(), 2, Span::UNIT, true),
                ("a2".to_string(), 1, Span::cols(2), true),
                ("b".to_string(), 0, Span::cols(3), true),
            ]
        );
    }

    #[test]
    fn flat_headers_have_no_spans() {
        let headers = vec![Header::leaf("a"), Header::leaf("b")];
        assert!(column_headers(&headers).all(|c| c.span == Span::UNIT && c.depth == 0));
        assert!(row_headers(&headers).all(|c| c.span == Span::UNIT && c.is_leaf));
    }

    #[test]
    fn empty_headers_yield_nothing() {
        assert_eq!(column_headers(&[]).count(), 0);
        assert_eq!(row_headers(&[]).count(), 0);
    }

    #[test]
    fn iterators_restart_from_the_same_list() {
        let headers = sample();
        assert_eq!(column_headers(&headers).count(), column_headers(&headers).count());
        assert_eq!(row_headers(&headers).count(), 6);
    }
}
