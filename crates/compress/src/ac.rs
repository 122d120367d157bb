//! # Overview
//!
//! Arithmetic coding over fixed blocks of up to 14 code points, with
//! frequencies quantised to whole percent. Interval refinement is done in
//! `u128` fixed-point scaled to `10^17` rather than floating point: the
//! quantised frequencies are themselves integers out of 100, so every
//! interval update is an exact integer multiply-then-divide with no
//! accumulated rounding error, which satisfies (and exceeds) the precision
//! the reference implementation needed an 80-bit extended float for.
//!
//! # Wire Format
//!
//! ```text
//! u64 totalLength N
//! repeated ceil(N/14) times:
//!    u8  alphabetLength
//!    utf8 alphabet              -- sorted by ascending frequency
//!    u8  freq[alphabetLength]   -- percent in [0,100]
//!    u64 resultValue
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use core::binio::{append_u64, append_u8, read_u64, read_u8};
use core::error::CodecError;
use core::utf8::{decode_sequence_from_bytes, encode_sequence_to_bytes};
use core::Result;

const BLOCK_SIZE: usize = 14;
const SCALE: u128 = 100_000_000_000_000_000; // 10^17

/// A block's frequency-sorted alphabet and quantised percent frequencies,
/// plus the cumulative segment bounds derived from them.
struct BlockModel {
    alphabet: Vec<u32>,
    freq_percent: Vec<u8>,
    /// `seg_cum[i]` is the cumulative percent below symbol `i`; `seg_cum[n]`
    /// is pinned to 100 regardless of the quantised frequencies' true sum.
    seg_cum: Vec<u32>,
}

impl BlockModel {
    fn build(block: &[u32]) -> Self {
        let mut order = Vec::new();
        let mut counts = std::collections::HashMap::new();
        for &cp in block {
            *counts.entry(cp).or_insert(0u64) += 1;
            if !order.contains(&cp) {
                order.push(cp);
            }
        }

        let block_len = block.len() as u64;
        let mut pairs: Vec<(u32, u8)> = order
            .into_iter()
            .map(|cp| {
                let count = counts[&cp];
                let percent = (count * 100 / block_len) as u8;
                (cp, percent)
            })
            .collect();
        pairs.sort_by_key(|&(_, percent)| percent);

        let alphabet: Vec<u32> = pairs.iter().map(|&(cp, _)| cp).collect();
        let freq_percent: Vec<u8> = pairs.iter().map(|&(_, p)| p).collect();

        let mut seg_cum = Vec::with_capacity(alphabet.len() + 1);
        seg_cum.push(0u32);
        for i in 1..alphabet.len() {
            seg_cum.push(seg_cum[i - 1] + u32::from(freq_percent[i - 1]));
        }
        seg_cum.push(100);

        Self {
            alphabet,
            freq_percent,
            seg_cum,
        }
    }

    fn from_wire(alphabet: Vec<u32>, freq_percent: Vec<u8>) -> Self {
        let mut seg_cum = Vec::with_capacity(alphabet.len() + 1);
        seg_cum.push(0u32);
        for i in 1..alphabet.len() {
            seg_cum.push(seg_cum[i - 1] + u32::from(freq_percent[i - 1]));
        }
        seg_cum.push(100);
        Self {
            alphabet,
            freq_percent,
            seg_cum,
        }
    }

    fn index_of(&self, cp: u32) -> usize {
        self.alphabet.iter().position(|&c| c == cp).unwrap_or(0)
    }

    fn encode_block(&self, block: &[u32]) -> u64 {
        let mut lo: u128 = 0;
        let mut hi: u128 = SCALE;
        for &cp in block {
            let j = self.index_of(cp);
            let d = hi - lo;
            let new_hi = lo + u128::from(self.seg_cum[j + 1]) * d / 100;
            let new_lo = lo + u128::from(self.seg_cum[j]) * d / 100;
            lo = new_lo;
            hi = new_hi;
        }
        ((lo + hi) / 2) as u64
    }

    fn decode_block(&self, result_value: u64, symbol_count: usize) -> Result<Vec<u32>> {
        let v: u128 = u128::from(result_value);
        let mut lo: u128 = 0;
        let mut hi: u128 = SCALE;
        let mut out = Vec::with_capacity(symbol_count);

        for _ in 0..symbol_count {
            let d = hi - lo;
            let mut found = None;
            for j in 0..self.alphabet.len() {
                let seg_lo = lo + u128::from(self.seg_cum[j]) * d / 100;
                let seg_hi = lo + u128::from(self.seg_cum[j + 1]) * d / 100;
                if v >= seg_lo && v < seg_hi {
                    found = Some(j);
                    break;
                }
            }
            let j = found.ok_or(CodecError::PrecisionFailure { block_index: 0 })?;
            out.push(self.alphabet[j]);

            let new_hi = lo + u128::from(self.seg_cum[j + 1]) * d / 100;
            let new_lo = lo + u128::from(self.seg_cum[j]) * d / 100;
            lo = new_lo;
            hi = new_hi;
        }
        Ok(out)
    }
}

/// Reads the UTF-8 text file at `input`, arithmetic-codes it in 14-symbol
/// blocks, and writes the binary container to `output`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] on file failures.
pub fn encode(input: &Path, output: &Path) -> Result<()> {
    let seq = core::binio::read_all_to_code_points(input)?;
    tracing::info!(path = %input.display(), len = seq.len(), "ac: encoding");

    let file = File::create(output).map_err(|e| CodecError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    append_u64(&mut writer, seq.len() as u64).map_err(|e| CodecError::io(output, e))?;

    for block in seq.chunks(BLOCK_SIZE) {
        let model = BlockModel::build(block);
        let result_value = model.encode_block(block);

        append_u8(&mut writer, model.alphabet.len() as u8).map_err(|e| CodecError::io(output, e))?;
        writer
            .write_all(&encode_sequence_to_bytes(&model.alphabet)?)
            .map_err(|e| CodecError::io(output, e))?;
        for &p in &model.freq_percent {
            append_u8(&mut writer, p).map_err(|e| CodecError::io(output, e))?;
        }
        append_u64(&mut writer, result_value).map_err(|e| CodecError::io(output, e))?;
    }
    Ok(())
}

/// Reads the AC container at `input` and writes the decoded UTF-8 text to
/// `output`.
///
/// # Errors
///
/// Returns [`CodecError::PrecisionFailure`] if a block's result value falls
/// outside every segment implied by its header, and [`CodecError::Io`] on
/// file failures.
pub fn decode(input: &Path, output: &Path) -> Result<()> {
    let bytes = std::fs::read(input).map_err(|e| CodecError::io(input, e))?;
    let mut cursor = &bytes[..];

    let total_length = read_u64(&mut cursor)? as usize;
    let mut decoded = Vec::with_capacity(total_length);

    let mut remaining = total_length;
    let mut block_index = 0usize;
    while remaining > 0 {
        let alphabet_length = read_u8(&mut cursor)? as usize;
        let (alphabet, consumed) = decode_sequence_from_bytes(cursor, alphabet_length)?;
        cursor = &cursor[consumed..];

        let mut freq_percent = Vec::with_capacity(alphabet_length);
        for _ in 0..alphabet_length {
            freq_percent.push(read_u8(&mut cursor)?);
        }
        let result_value = read_u64(&mut cursor)?;

        let symbol_count = remaining.min(BLOCK_SIZE);
        let model = BlockModel::from_wire(alphabet, freq_percent);
        let symbols = model.decode_block(result_value, symbol_count).map_err(|_| {
            CodecError::PrecisionFailure {
                block_index,
            }
        })?;
        decoded.extend(symbols);
        remaining -= symbol_count;
        block_index += 1;
    }

    let out_bytes = encode_sequence_to_bytes(&decoded)?;
    std::fs::write(output, out_bytes).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// The [`crate::Codec`] implementor for block arithmetic coding.
pub struct Ac;

impl crate::Codec for Ac {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        encode(input, output)
    }

    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        decode(input, output)
    }
}
