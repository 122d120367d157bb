//! # Overview
//!
//! Burrows-Wheeler transform over the whole input as a single block. The
//! forward transform sorts all cyclic rotations of the input and emits the
//! last column plus the row index of the original string; the inverse walks
//! the LF-mapping back to the original in `O(N)`.
//!
//! # Wire Format
//!
//! ```text
//! u64 length N
//! utf8 lastColumn           -- N code points
//! u64 originalIndex
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::collections::BTreeMap;

use core::binio::{append_u64, read_u64};
use core::error::CodecError;
use core::utf8::{decode_sequence_from_bytes, encode_sequence_to_bytes};
use core::Result;

/// Builds the suffix array of `s` using prefix doubling: `O(N log^2 N)`,
/// comfortably subquadratic.
fn suffix_array(s: &[u32]) -> Vec<usize> {
    let n = s.len();
    let mut sa: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return sa;
    }

    let mut rank: Vec<i64> = s.iter().map(|&c| i64::from(c)).collect();
    let mut next_rank = vec![0i64; n];
    let mut k = 1usize;

    loop {
        let key = |i: usize| -> (i64, i64) {
            let second = if i + k < n { rank[i + k] } else { -1 };
            (rank[i], second)
        };
        sa.sort_by(|&a, &b| key(a).cmp(&key(b)));

        next_rank[sa[0]] = 0;
        for i in 1..n {
            let bump = if key(sa[i - 1]) < key(sa[i]) { 1 } else { 0 };
            next_rank[sa[i]] = next_rank[sa[i - 1]] + bump;
        }
        rank.copy_from_slice(&next_rank);

        if rank[sa[n - 1]] as usize == n - 1 || k >= n {
            break;
        }
        k *= 2;
    }

    sa
}

/// Builds the circular suffix array (i.e. the sorted order of all rotations)
/// of `s` by computing the suffix array of `s` doubled onto itself and
/// keeping only the starting positions below `s.len()`, in order.
fn circular_suffix_array(s: &[u32]) -> Vec<usize> {
    let n = s.len();
    if n == 0 {
        return Vec::new();
    }
    let mut doubled = s.to_vec();
    doubled.extend_from_slice(s);
    suffix_array(&doubled)
        .into_iter()
        .filter(|&i| i < n)
        .collect()
}

/// Reads the UTF-8 text file at `input`, transforms it, and writes the
/// binary container to `output`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] on file failures.
pub fn encode(input: &Path, output: &Path) -> Result<()> {
    let seq = core::binio::read_all_to_code_points(input)?;
    let n = seq.len();
    tracing::info!(path = %input.display(), len = n, "bwt: encoding");

    let file = File::create(output).map_err(|e| CodecError::io(output, e))?;
    let mut writer = BufWriter::new(file);

    if n == 0 {
        append_u64(&mut writer, 0).map_err(|e| CodecError::io(output, e))?;
        append_u64(&mut writer, 0).map_err(|e| CodecError::io(output, e))?;
        return Ok(());
    }

    let sa = circular_suffix_array(&seq);
    let mut last_column = Vec::with_capacity(n);
    let mut original_index = 0u64;
    for (i, &start) in sa.iter().enumerate() {
        last_column.push(seq[(start + n - 1) % n]);
        if start == 0 {
            original_index = i as u64;
        }
    }

    append_u64(&mut writer, n as u64).map_err(|e| CodecError::io(output, e))?;
    writer
        .write_all(&encode_sequence_to_bytes(&last_column)?)
        .map_err(|e| CodecError::io(output, e))?;
    append_u64(&mut writer, original_index).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// Reads the BWT container at `input` and writes the recovered UTF-8 text
/// to `output`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidContainer`] if `originalIndex` is out of
/// range, and [`CodecError::Io`] on file failures.
pub fn decode(input: &Path, output: &Path) -> Result<()> {
    let bytes = std::fs::read(input).map_err(|e| CodecError::io(input, e))?;
    let mut cursor = &bytes[..];

    let n = read_u64(&mut cursor)? as usize;
    let (last_column, consumed) = decode_sequence_from_bytes(cursor, n)?;
    cursor = &cursor[consumed..];
    let original_index = read_u64(&mut cursor)? as usize;

    if n == 0 {
        std::fs::write(output, []).map_err(|e| CodecError::io(output, e))?;
        return Ok(());
    }
    if original_index >= n {
        return Err(CodecError::invalid_container(format!(
            "originalIndex {original_index} out of range for length {n}"
        )));
    }

    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for &c in &last_column {
        *counts.entry(c).or_insert(0) += 1;
    }
    let mut cumulative: BTreeMap<u32, u64> = BTreeMap::new();
    let mut running = 0u64;
    for (&c, &count) in &counts {
        cumulative.insert(c, running);
        running += count;
    }

    let mut occurrence_so_far: BTreeMap<u32, u64> = BTreeMap::new();
    let mut lf = vec![0usize; n];
    for (i, &c) in last_column.iter().enumerate() {
        let rank = *occurrence_so_far.get(&c).unwrap_or(&0);
        lf[i] = (cumulative[&c] + rank) as usize;
        *occurrence_so_far.entry(c).or_insert(0) += 1;
    }

    let mut out = vec![0u32; n];
    let mut pos = original_index;
    for k in 0..n {
        out[n - 1 - k] = last_column[pos];
        pos = lf[pos];
    }

    let out_bytes = encode_sequence_to_bytes(&out)?;
    std::fs::write(output, out_bytes).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// The [`crate::Codec`] implementor for the Burrows-Wheeler transform.
pub struct Bwt;

impl crate::Codec for Bwt {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        encode(input, output)
    }

    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        decode(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banana_matches_the_documented_transform() {
        let seq: Vec<u32> = "banana".chars().map(|c| c as u32).collect();
        let sa = circular_suffix_array(&seq);
        let n = seq.len();
        let last_column: Vec<u32> = sa.iter().map(|&start| seq[(start + n - 1) % n]).collect();
        let last_column_str: String = last_column.iter().map(|&c| char::from_u32(c).unwrap()).collect();
        assert_eq!(last_column_str, "nnbaaa");

        let original_index = sa.iter().position(|&start| start == 0).unwrap();
        assert_eq!(original_index, 3);
    }

    fn round_trip(text: &str) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let encoded = dir.path().join("enc.bin");
        let decoded = dir.path().join("out.txt");
        std::fs::write(&input, text).unwrap();

        encode(&input, &encoded).unwrap();
        decode(&encoded, &decoded).unwrap();

        assert_eq!(std::fs::read_to_string(&decoded).unwrap(), text);
    }

    #[test]
    fn banana_round_trips_through_the_full_codec() {
        round_trip("banana");
    }

    #[test]
    fn round_trips_ascii_multibyte_empty_and_long_runs() {
        round_trip("the quick brown fox jumps over the lazy dog");
        round_trip("héllo wörld \u{1F600}\u{1F600}");
        round_trip("");
        round_trip(&"mississippi".repeat(50));
    }

    #[test]
    fn single_symbol_repeated_round_trips_across_cap_boundary() {
        for n in [1usize, 2, 126, 127, 128, 1_000] {
            round_trip(&"q".repeat(n));
        }
    }

    #[test]
    fn ten_kib_random_like_input_round_trips() {
        let text: String = (0..10 * 1024)
            .map(|i| char::from_u32(32 + (i * 2654435761u32.wrapping_add(i)) % 95).unwrap())
            .collect();
        round_trip(&text);
    }

    #[test]
    fn out_of_range_original_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.bin");
        let mut bytes = Vec::new();
        append_u64(&mut bytes, 3).unwrap();
        bytes.extend(encode_sequence_to_bytes(&['a' as u32, 'b' as u32, 'c' as u32]).unwrap());
        append_u64(&mut bytes, 99).unwrap();
        std::fs::write(&bogus, bytes).unwrap();

        let out = dir.path().join("out.txt");
        assert!(matches!(decode(&bogus, &out), Err(CodecError::InvalidContainer { .. })));
    }

    #[test]
    fn encoding_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "mississippi").unwrap();
        let out1 = dir.path().join("out1.bin");
        let out2 = dir.path().join("out2.bin");
        encode(&input, &out1).unwrap();
        encode(&input, &out2).unwrap();
        assert_eq!(std::fs::read(out1).unwrap(), std::fs::read(out2).unwrap());
    }
}
