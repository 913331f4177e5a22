//! Header geometry: nesting depth and leaf counts.

use crate::headers::Header;

/// Deepest nesting of `headers`; an empty list still occupies one level.
#[inline]
pub fn depth(headers: &[Header]) -> usize {
    headers.iter().map(Header::depth).max().unwrap_or(1)
}

/// Number of leaf headers under `headers`.
///
/// This is the span of a header group and the number of data cells along
/// its axis.
pub fn final_length(headers: &[Header]) -> usize {
    headers
        .iter()
        .map(|h| match h {
            Header::Leaf(_) => 1,
            Header::Group(_, children) => final_length(children),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(keys: &[&str]) -> Vec<Header> {
        keys.iter().map(|k| Header::leaf(*k)).collect()
    }

    #[test]
    fn depth_of_flat_list() {
        assert_eq!(depth(&leaves(&["a", "b", "c"])), 1);
    }

    #[test]
    fn depth_of_empty_list_is_one() {
        assert_eq!(depth(&[]), 1);
    }

    #[test]
    fn depth_of_nested_groups() {
        let two = vec![
            Header::group("1", leaves(&["11", "12"])),
            Header::group("2", leaves(&["21", "22"])),
        ];
        assert_eq!(depth(&two), 2);

        let three = vec![Header::group(
            "1",
            vec![Header::group("11", leaves(&["111", "112"]))],
        )];
        assert_eq!(depth(&three), 3);
    }

    #[test]
    fn depth_takes_the_deepest_branch() {
        let uneven = vec![
            Header::leaf("a"),
            Header::group("b", vec![Header::group("bb", leaves(&["bbb"]))]),
        ];
        assert_eq!(depth(&uneven), 3);
    }

    #[test]
    fn final_length_counts_leaves() {
        let headers = vec![
            Header::leaf("a"),
            Header::group("x", leaves(&["1", "2", "3"])),
            Header::leaf("b"),
            Header::group("y", leaves(&["4", "5"])),
        ];
        assert_eq!(final_length(&headers), 7);
        assert_eq!(final_length(&[]), 0);
    }
}
