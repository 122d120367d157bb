//! # Overview
//!
//! Run-length encoding with a signed run-length convention: positive counts
//! are runs of one repeated code point, negative counts are runs of
//! distinct-adjacent (literal) code points. Runs are capped at 127 so the
//! signed count fits in one byte.
//!
//! # Wire Format
//!
//! ```text
//! u64 strLength              -- number of code points in the original
//! repeated:
//!    i8 chunkCount           -- signed; +k identical, -k literal
//!    utf8 payload            -- 1 code point if +k, |k| code points if -k
//! ```
//!
//! # Errors
//!
//! Decoding returns [`core::error::CodecError::MalformedChunk`] if a chunk's
//! count is zero or if reading a chunk would exceed the declared length.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use core::binio::{append_i8, append_u64, read_u64};
use core::error::CodecError;
use core::utf8::{decode_scalar_from_bytes, encode_scalar_to_bytes, encode_sequence_to_bytes};
use core::Result;

const MAX_RUN: i32 = 127;

enum Run {
    /// `count` copies of a single code point.
    Identical { count: u8, symbol: u32 },
    /// `|count|` distinct-adjacent code points.
    Literal { symbols: Vec<u32> },
}

fn classify(seq: &[u32]) -> Vec<Run> {
    let mut runs = Vec::new();
    if seq.is_empty() {
        return runs;
    }

    let mut literal: Vec<u32> = vec![seq[0]];
    let mut ident_len: u32 = 1;
    let mut prev = seq[0];

    let flush_identical = |runs: &mut Vec<Run>, symbol: u32, mut len: u32| {
        while len > MAX_RUN as u32 {
            runs.push(Run::Identical {
                count: MAX_RUN as u8,
                symbol,
            });
            len -= MAX_RUN as u32;
        }
        if len > 0 {
            runs.push(Run::Identical {
                count: len as u8,
                symbol,
            });
        }
    };

    let flush_literal = |runs: &mut Vec<Run>, symbols: Vec<u32>| {
        if !symbols.is_empty() {
            runs.push(Run::Literal { symbols });
        }
    };

    for &c in &seq[1..] {
        if c == prev {
            if ident_len == 1 {
                // We were in a literal run; the symbol just seen (`prev`)
                // belongs to the new identical run, so pop it back off.
                literal.pop();
                flush_literal(&mut runs, std::mem::take(&mut literal));
            }
            ident_len += 1;
        } else {
            if ident_len > 1 {
                flush_identical(&mut runs, prev, ident_len);
                ident_len = 1;
                literal.clear();
            } else {
                ident_len = 1;
            }
            literal.push(c);
            if literal.len() as i32 == MAX_RUN {
                flush_literal(&mut runs, std::mem::take(&mut literal));
            }
        }
        prev = c;
    }

    if ident_len > 1 {
        flush_identical(&mut runs, prev, ident_len);
    } else {
        flush_literal(&mut runs, literal);
    }

    runs
}

/// Reads the UTF-8 text file at `input`, run-length encodes it, and writes
/// the binary container to `output`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] on file failures and propagates decode errors
/// from malformed source UTF-8.
pub fn encode(input: &Path, output: &Path) -> Result<()> {
    let seq = core::binio::read_all_to_code_points(input)?;
    tracing::info!(path = %input.display(), len = seq.len(), "rle: encoding");

    let runs = classify(&seq);
    tracing::debug!(run_count = runs.len(), "rle: classified runs");

    let file = File::create(output).map_err(|e| CodecError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    append_u64(&mut writer, seq.len() as u64).map_err(|e| CodecError::io(output, e))?;

    for run in runs {
        match run {
            Run::Identical { count, symbol } => {
                append_i8(&mut writer, count as i8).map_err(|e| CodecError::io(output, e))?;
                writer
                    .write_all(&encode_scalar_to_bytes(symbol)?)
                    .map_err(|e| CodecError::io(output, e))?;
            }
            Run::Literal { symbols } => {
                append_i8(&mut writer, -(symbols.len() as i8)).map_err(|e| CodecError::io(output, e))?;
                writer
                    .write_all(&encode_sequence_to_bytes(&symbols)?)
                    .map_err(|e| CodecError::io(output, e))?;
            }
        }
    }
    Ok(())
}

/// Reads the RLE container at `input` and writes the decoded UTF-8 text to
/// `output`.
///
/// # Errors
///
/// Returns [`CodecError::MalformedChunk`] for a zero-count chunk or a chunk
/// that would read past the declared length, and [`CodecError::Io`] on
/// file failures.
pub fn decode(input: &Path, output: &Path) -> Result<()> {
    let bytes = std::fs::read(input).map_err(|e| CodecError::io(input, e))?;
    let mut offset = 0usize;

    let mut read_u64_at = || -> Result<u64> {
        let mut cursor = &bytes[offset..];
        let v = read_u64(&mut cursor)?;
        offset += 8;
        Ok(v)
    };
    let str_length = read_u64_at()?;

    let mut decoded: Vec<u32> = Vec::with_capacity(str_length as usize);
    let mut counter: u64 = 0;

    while counter < str_length {
        if offset >= bytes.len() {
            return Err(CodecError::malformed_chunk("reached end of file before strLength was satisfied"));
        }
        let count = bytes[offset] as i8;
        offset += 1;
        if count == 0 {
            return Err(CodecError::malformed_chunk("chunk count is zero"));
        }

        if count < 0 {
            let n = (-count) as u64;
            if counter + n > str_length {
                return Err(CodecError::malformed_chunk("literal run would exceed strLength"));
            }
            for _ in 0..n {
                let (cp, consumed) = decode_scalar_from_bytes(&bytes[offset..])?;
                decoded.push(cp);
                offset += consumed;
            }
            counter += n;
        } else {
            let n = count as u64;
            if counter + n > str_length {
                return Err(CodecError::malformed_chunk("identical run would exceed strLength"));
            }
            let (cp, consumed) = decode_scalar_from_bytes(&bytes[offset..])?;
            offset += consumed;
            for _ in 0..n {
                decoded.push(cp);
            }
            counter += n;
        }
    }

    let out_bytes = encode_sequence_to_bytes(&decoded)?;
    std::fs::write(output, out_bytes).map_err(|e| CodecError::io(output, e))?;
    Ok(())
}

/// The [`crate::Codec`] implementor for run-length encoding.
pub struct Rle;

impl crate::Codec for Rle {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        encode(input, output)
    }

    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        decode(input, output)
    }
}
