//! # Overview
//!
//! Static Huffman coding over the whole input as a single block: one tree,
//! one code table, one bit stream. Code lengths are stored as a single byte
//! per symbol, which covers every alphabet this format can express, since
//! the container's `alphabetLength` header field is itself a `u8` and caps
//! the whole-file alphabet at 255 distinct code points. Unlike `mtf`, which
//! widens its index field as the alphabet grows, this container's width is
//! fixed, so [`encode`] rejects an oversized alphabet outright rather than
//! truncating it into the header.
//!
//! # Wire Format
//!
//! ```text
//! u64 strLength
//! u8  alphabetLength
//! utf8 alphabet                      -- alphabetLength code points
//! repeated alphabetLength times:
//!    u8  codeLength
//!    bits codeBits                   -- MSB-first, codeLength bits, byte-padded
//! u8  trailingBitCount               -- valid bits in the stream's final byte
//! bytes encodedStream
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use core::binio::{append_u64, append_u8, read_u64, read_u8};
use core::error::CodecError;
use core::utf8::{decode_sequence_from_bytes, encode_sequence_to_bytes};
use core::Result;

use crate::huffman::build_code_map;

struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            current: 0,
            filled: 0,
        }
    }

    fn push_bit(&mut self, bit: u8) {
        self.current = (self.current << 1) | bit;
        self.filled += 1;
        if self.filled == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    fn push_code(&mut self, code: &str) {
        for b in code.bytes() {
            self.push_bit(if b == b'1' { 1 } else { 0 });
        }
    }

    /// Returns the packed bytes and the number of valid bits in the final
    /// byte (0 if the stream is empty or ends on a byte boundary).
    fn finish(mut self) -> (Vec<u8>, u8) {
        let trailing = self.filled;
        if self.filled > 0 {
            self.current <<= 8 - self.filled;
            self.bytes.push(self.current);
        }
        (self.bytes, trailing)
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    byte_index: usize,
    bit_index: u8,
    total_bits: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8], trailing_bit_count: u8) -> Self {
        let total_bits = if bytes.is_empty() {
            0
        } else if trailing_bit_count == 0 {
            bytes.len() * 8
        } else {
            (bytes.len() - 1) * 8 + trailing_bit_count as usize
        };
        Self {
            bytes,
            byte_index: 0,
            bit_index: 0,
            total_bits,
        }
    }

    fn bits_read(&self) -> usize {
        self.byte_index * 8 + self.bit_index as usize
    }

    fn next_bit(&mut self) -> Option<u8> {
        if self.bits_read() >= self.total_bits {
            return None;
        }
        let byte = self.bytes[self.byte_index];
        let bit = (byte >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.byte_index += 1;
        }
        Some(bit)
    }
}

/// Reads the UTF-8 text file at `input`, Huffman-codes it as a single
/// block, and writes the binary container to `output`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] on file failures, and
/// [`CodecError::InvalidContainer`] if `input` contains more than 255
/// distinct code points, since the container's `alphabetLength` header field
/// is a single byte.
pub fn encode(input: &Path, output: &Path) -> Result<()> {
    let seq = core::binio::read_all_to_code_points(input)?;
    let str_length = seq.len() as u64;

    let file = File::create(output).map_err(|e| CodecError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    append_u64(&mut writer, str_length).map_err(|e| CodecError::io(output, e))?;

    if seq.is_empty() {
        append_u8(&mut writer, 0).map_err(|e| CodecError::io(output, e))?;
        append_u8(&mut writer, 0).map_err(|e| CodecError::io(output, e))?;
        return Ok(());
    }

    let alphabet = core::analysis::alphabet(&seq);
    if alphabet.len() > u8::MAX as usize {
        return Err(CodecError::invalid_container(format!(
            "alphabet of {} distinct code points exceeds this codec's 255-symbol header width",
            alphabet.len()
        )));
    }
    let freqs = core::analysis::frequency_map(&alphabet, &seq);
    let mut sorted_by_freq: Vec<(u32, f64)> = alphabet.iter().map(|&cp| (cp, freqs[&cp])).collect();
    sorted_by_freq.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

    let codes = build_code_map(&sorted_by_freq);
    tracing::info!(path = %input.display(), alphabet_length = alphabet.len(), str_length, "ha: encoding");

    append_u8(&mut writer, alphabet.len() as u8).map_err(|e| CodecError::io(output, e))?;
    writer
        .write_all(&encode_sequence_to_bytes(&alphabet)?)
        .map_err(|e| CodecError::io(output, e))?;

    for &cp in &alphabet {
        let code = &codes[&cp];
        append_u8(&mut writer, code.len() as u8).map_err(|e| CodecError::io(output, e))?;
        let mut bw = BitWriter::new();
        bw.push_code(code);
        let (packed, _trailing) = bw.finish();
        writer.write_all(&packed).map_err(|e| CodecError::io(output, e))?;
    }

    let mut stream = BitWriter::new();
    for &cp in &seq {
        stream.push_code(&codes[&cp]);
    }
    let (encoded_bytes, trailing_bit_count) = stream.finish();
    append_u8(&mut writer, trailing_bit_count).map_err(|e| CodecError::io(output, e))?;
    writer.write_all(&encoded_bytes).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// Reads the Huffman container at `input` and writes the decoded UTF-8
/// text to `output`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidContainer`] if the bit stream runs out
/// before `strLength` symbols have been decoded, and [`CodecError::Io`] on
/// file failures.
pub fn decode(input: &Path, output: &Path) -> Result<()> {
    let bytes = std::fs::read(input).map_err(|e| CodecError::io(input, e))?;
    let mut cursor = &bytes[..];

    let str_length = read_u64(&mut cursor)?;
    let alphabet_length = read_u8(&mut cursor)? as usize;

    if str_length == 0 {
        std::fs::write(output, []).map_err(|e| CodecError::io(output, e))?;
        return Ok(());
    }

    let (alphabet, consumed) = decode_sequence_from_bytes(cursor, alphabet_length)?;
    cursor = &cursor[consumed..];

    // Each symbol's code is stored as its bit length followed by that many
    // packed bits, byte-padded with trailing zeros the same way the
    // encoder wrote them.
    let mut codes: std::collections::BTreeMap<u32, String> = std::collections::BTreeMap::new();
    for &cp in &alphabet {
        let len = read_u8(&mut cursor)?;
        let byte_len = (len as usize).div_ceil(8);
        let mut reader = BitReader::new(&cursor[..byte_len], if len as usize % 8 == 0 { 0 } else { len });
        let mut bits = String::with_capacity(len as usize);
        for _ in 0..len {
            bits.push(if reader.next_bit().unwrap_or(0) == 1 { '1' } else { '0' });
        }
        cursor = &cursor[byte_len..];
        codes.insert(cp, bits);
    }

    let trailing_bit_count = read_u8(&mut cursor)?;
    let stream = cursor;

    let mut by_code: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
    for (&cp, code) in &codes {
        by_code.insert(code.clone(), cp);
    }

    let mut reader = BitReader::new(stream, trailing_bit_count);
    let mut decoded = Vec::with_capacity(str_length as usize);
    let mut current = String::new();
    while (decoded.len() as u64) < str_length {
        let bit = reader
            .next_bit()
            .ok_or_else(|| CodecError::invalid_container("bit stream ended before strLength was satisfied"))?;
        current.push(if bit == 1 { '1' } else { '0' });
        if let Some(&cp) = by_code.get(&current) {
            decoded.push(cp);
            current.clear();
        }
    }

    let out_bytes = encode_sequence_to_bytes(&decoded)?;
    std::fs::write(output, out_bytes).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// The [`crate::Codec`] implementor for static per-file Huffman coding.
pub struct Ha;

impl crate::Codec for Ha {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        encode(input, output)
    }

    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        decode(input, output)
    }
}
