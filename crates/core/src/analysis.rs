//! Text analysis utilities shared by the codecs: alphabet extraction,
//! frequency tables, and index lookups over sorted or mutable-order
//! alphabets.

use std::collections::BTreeMap;

/// Returns the ascending-sorted, deduplicated set of code points appearing
/// in `seq`.
#[must_use]
pub fn alphabet(seq: &[u32]) -> Vec<u32> {
    let mut set: Vec<u32> = seq.to_vec();
    set.sort_unstable();
    set.dedup();
    set
}

/// Maps every code point in `alphabet` to its relative frequency in `seq`
/// (occurrences divided by `seq.len()`), computed in double precision.
///
/// Frequencies sum to 1 under floating-point precision. `seq` must not be
/// empty; callers are responsible for handling the empty-input case per
/// each codec's documented policy before reaching here.
#[must_use]
pub fn frequency_map(alphabet: &[u32], seq: &[u32]) -> BTreeMap<u32, f64> {
    let mut counts: BTreeMap<u32, u64> = alphabet.iter().map(|&cp| (cp, 0)).collect();
    for &cp in seq {
        if let Some(count) = counts.get_mut(&cp) {
            *count += 1;
        }
    }
    let total = seq.len() as f64;
    counts
        .into_iter()
        .map(|(cp, count)| (cp, count as f64 / total))
        .collect()
}

/// Finds `cp`'s position in a strictly ascending-sorted `alphabet` via
/// binary search.
#[must_use]
pub fn index_of_sorted(alphabet: &[u32], cp: u32) -> Option<usize> {
    alphabet.binary_search(&cp).ok()
}

/// Finds `cp`'s position in `list` via linear scan.
///
/// Used where the list's order carries meaning beyond sortedness (e.g. the
/// move-to-front alphabet, whose order is mutated on every emission).
#[must_use]
pub fn index_of_linear(list: &[u32], cp: u32) -> Option<usize> {
    list.iter().position(|&c| c == cp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_sorted_and_deduplicated() {
        let seq: Vec<u32> = "banana".chars().map(|c| c as u32).collect();
        let a = alphabet(&seq);
        let expected: Vec<u32> = vec!['a', 'b', 'n'].into_iter().map(|c| c as u32).collect();
        assert_eq!(a, expected);
    }

    #[test]
    fn frequency_map_sums_to_one() {
        let seq: Vec<u32> = "aabbc".chars().map(|c| c as u32).collect();
        let a = alphabet(&seq);
        let freqs = frequency_map(&a, &seq);
        let sum: f64 = freqs.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((freqs[&('a' as u32)] - 0.4).abs() < 1e-9);
        assert!((freqs[&('c' as u32)] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn index_of_sorted_matches_binary_search() {
        let a = alphabet(&"abcdef".chars().map(|c| c as u32).collect::<Vec<_>>());
        assert_eq!(index_of_sorted(&a, 'd' as u32), Some(3));
        assert_eq!(index_of_sorted(&a, 'z' as u32), None);
    }

    #[test]
    fn index_of_linear_respects_list_order() {
        let list = vec!['c' as u32, 'a' as u32, 'b' as u32];
        assert_eq!(index_of_linear(&list, 'a' as u32), Some(1));
        assert_eq!(index_of_linear(&list, 'z' as u32), None);
    }
}
