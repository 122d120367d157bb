//! Frequency-ordered static Huffman tree builder.
//!
//! Builds a binary tree from a frequency table and derives a prefix-free
//! code map from it. Used by [`crate::ha`] to build one tree per block.

use std::collections::BTreeMap;

/// A node in the Huffman tree. Leaves carry the single code point they
/// encode; internal nodes only exist to combine two children.
enum Node {
    Leaf(u32),
    Internal(Box<Node>, Box<Node>),
}

struct Weighted {
    freq: f64,
    node: Node,
}

/// Builds a Huffman tree over `sorted_by_freq`, a `(code point, frequency)`
/// table already sorted by ascending frequency (ties preserving first-seen
/// order, matching [`core::analysis::frequency_map`]'s `BTreeMap` iteration
/// order for equal frequencies).
///
/// # Panics
///
/// Panics if `sorted_by_freq` is empty; callers must handle the empty-input
/// case before reaching the tree builder.
fn build_tree(sorted_by_freq: &[(u32, f64)]) -> Node {
    assert!(!sorted_by_freq.is_empty(), "Huffman tree needs a non-empty alphabet");

    if sorted_by_freq.len() == 1 {
        return Node::Leaf(sorted_by_freq[0].0);
    }

    let mut free: Vec<Weighted> = sorted_by_freq
        .iter()
        .map(|&(cp, freq)| Weighted {
            freq,
            node: Node::Leaf(cp),
        })
        .collect();

    while free.len() > 1 {
        let left = free.remove(0);
        let right = free.remove(0);
        let parent = Weighted {
            freq: left.freq + right.freq,
            node: Node::Internal(Box::new(left.node), Box::new(right.node)),
        };

        // Insert in ascending order; ties go after equal-frequency nodes so
        // that newly combined nodes don't jump ahead of older ones of the
        // same weight.
        let pos = free
            .iter()
            .position(|w| parent.freq < w.freq)
            .unwrap_or(free.len());
        free.insert(pos, parent);
    }

    free.pop().expect("exactly one node remains").node
}

/// Derives a code point → bit-string code map from `sorted_by_freq` by
/// pre-order traversal of the built tree (left edge `'0'`, right edge
/// `'1'`). A single-symbol alphabet receives the code `"0"`.
#[must_use]
pub fn build_code_map(sorted_by_freq: &[(u32, f64)]) -> BTreeMap<u32, String> {
    let mut codes = BTreeMap::new();
    if sorted_by_freq.len() == 1 {
        codes.insert(sorted_by_freq[0].0, "0".to_string());
        return codes;
    }

    let root = build_tree(sorted_by_freq);
    fill_codes(&root, String::new(), &mut codes);
    codes
}

fn fill_codes(node: &Node, prefix: String, codes: &mut BTreeMap<u32, String>) {
    match node {
        Node::Leaf(cp) => {
            codes.insert(*cp, prefix);
        }
        Node::Internal(left, right) => {
            fill_codes(left, format!("{prefix}0"), codes);
            fill_codes(right, format!("{prefix}1"), codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_symbol_alphabet_gets_code_zero() {
        let codes = build_code_map(&[('A' as u32, 1.0)]);
        assert_eq!(codes.get(&('A' as u32)).unwrap(), "0");
    }

    #[test]
    fn no_code_is_a_prefix_of_another() {
        let table = vec![
            ('a' as u32, 0.1),
            ('b' as u32, 0.15),
            ('c' as u32, 0.2),
            ('d' as u32, 0.25),
            ('e' as u32, 0.3),
        ];
        let codes = build_code_map(&table);
        let values: Vec<&String> = codes.values().collect();
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{b} has prefix {a}");
                }
            }
        }
    }

    #[test]
    fn max_code_length_is_bounded_by_alphabet_size_minus_one() {
        let table: Vec<(u32, f64)> = (0..8).map(|i| (i, 1.0 / 2f64.powi(i as i32 + 1))).collect();
        let codes = build_code_map(&table);
        let max_len = codes.values().map(String::len).max().unwrap();
        assert!(max_len <= table.len() - 1);
    }
}
