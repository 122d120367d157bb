//! # Overview
//!
//! Move-to-front transform. Each code point is replaced by its current
//! position in a mutable alphabet list; after emitting the index, the
//! alphabet is shifted so the just-seen symbol moves to the front. Index
//! width is chosen once per file from the alphabet size so small alphabets
//! don't pay for a 32-bit index per symbol.
//!
//! # Wire Format
//!
//! ```text
//! u32 alphabetLength
//! utf8 alphabet              -- alphabetLength code points, ascending order
//! u64 strLength
//! repeated strLength times:
//!    index                   -- u8 if alphabetLength <= 256
//!                               u16 if alphabetLength <= 65536
//!                               u32 otherwise
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use core::binio::{append_u16, append_u32, append_u64, append_u8, read_u16, read_u32, read_u64, read_u8};
use core::error::CodecError;
use core::utf8::{decode_sequence_from_bytes, encode_scalar_to_bytes, encode_sequence_to_bytes};
use core::Result;

#[derive(Clone, Copy, Eq, PartialEq)]
enum Width {
    U8,
    U16,
    U32,
}

fn width_for(alphabet_length: u32) -> Width {
    if alphabet_length <= 256 {
        Width::U8
    } else if alphabet_length <= 65536 {
        Width::U16
    } else {
        Width::U32
    }
}

/// Moves `alphabet[index]` to the front, shifting the intervening entries
/// right by one. Mirrors the reference shift: only entries `0..=index` move.
fn shift_to_front(alphabet: &mut [u32], index: usize) {
    let symbol = alphabet[index];
    alphabet.copy_within(0..index, 1);
    alphabet[0] = symbol;
}

fn index_of(alphabet: &[u32], symbol: u32) -> usize {
    alphabet.iter().position(|&c| c == symbol).unwrap_or(0)
}

/// Reads the UTF-8 text file at `input`, move-to-front encodes it, and
/// writes the binary container to `output`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] on file failures.
pub fn encode(input: &Path, output: &Path) -> Result<()> {
    let seq = core::binio::read_all_to_code_points(input)?;
    let sorted_alphabet = core::analysis::alphabet(&seq);
    let alphabet_length = sorted_alphabet.len() as u32;
    let str_length = seq.len() as u64;

    tracing::info!(path = %input.display(), alphabet_length, str_length, "mtf: encoding");

    let mut alphabet = sorted_alphabet.clone();
    let mut codes = Vec::with_capacity(seq.len());
    for &symbol in &seq {
        let index = index_of(&alphabet, symbol);
        codes.push(index as u32);
        shift_to_front(&mut alphabet, index);
    }

    let file = File::create(output).map_err(|e| CodecError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    append_u32(&mut writer, alphabet_length).map_err(|e| CodecError::io(output, e))?;
    writer
        .write_all(&encode_sequence_to_bytes(&sorted_alphabet)?)
        .map_err(|e| CodecError::io(output, e))?;
    append_u64(&mut writer, str_length).map_err(|e| CodecError::io(output, e))?;

    let width = width_for(alphabet_length);
    for code in codes {
        match width {
            Width::U8 => append_u8(&mut writer, code as u8).map_err(|e| CodecError::io(output, e))?,
            Width::U16 => append_u16(&mut writer, code as u16).map_err(|e| CodecError::io(output, e))?,
            Width::U32 => append_u32(&mut writer, code).map_err(|e| CodecError::io(output, e))?,
        }
    }
    Ok(())
}

/// Reads the move-to-front container at `input` and writes the decoded
/// UTF-8 text to `output`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidContainer`] if a decoded index is out of
/// range for the declared alphabet, and [`CodecError::Io`] on file
/// failures.
pub fn decode(input: &Path, output: &Path) -> Result<()> {
    let bytes = std::fs::read(input).map_err(|e| CodecError::io(input, e))?;
    let mut cursor = &bytes[..];

    let alphabet_length = read_u32(&mut cursor)?;
    let (alphabet_vec, consumed) = decode_sequence_from_bytes(cursor, alphabet_length as usize)?;
    cursor = &cursor[consumed..];
    let mut alphabet = alphabet_vec;

    let str_length = read_u64(&mut cursor)?;
    let width = width_for(alphabet_length);

    let mut decoded = Vec::with_capacity(str_length as usize);
    for _ in 0..str_length {
        let index = match width {
            Width::U8 => read_u8(&mut cursor)? as usize,
            Width::U16 => read_u16(&mut cursor)? as usize,
            Width::U32 => read_u32(&mut cursor)? as usize,
        };
        let symbol = *alphabet
            .get(index)
            .ok_or_else(|| CodecError::invalid_container(format!("index {index} out of range for alphabet of length {alphabet_length}")))?;
        decoded.push(symbol);
        shift_to_front(&mut alphabet, index);
    }

    let out_bytes = encode_sequence_to_bytes(&decoded)?;
    std::fs::write(output, out_bytes).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// The [`crate::Codec`] implementor for move-to-front encoding.
pub struct Mtf;

impl crate::Codec for Mtf {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        encode(input, output)
    }

    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        decode(input, output)
    }
}
