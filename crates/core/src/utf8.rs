//! UTF-8 scalar codec: the single I/O unit every higher codec builds on.
//!
//! Encodes and decodes one Unicode scalar value at a time between its
//! code-point form and its 1-4 byte UTF-8 representation, per RFC 3629.
//! No byte-order mark is ever emitted or consumed.

use crate::error::{CodecError, Utf8Error};

/// Encodes a single Unicode scalar value to its UTF-8 byte representation.
///
/// # Errors
///
/// Returns [`Utf8Error::InvalidCodePoint`] when `cp` is outside
/// `0..=0x10FFFF` or falls inside the surrogate range `0xD800..=0xDFFF`.
pub fn encode_scalar_to_bytes(cp: u32) -> Result<Vec<u8>, Utf8Error> {
    if cp > 0x10FFFF || (0xD800..=0xDFFF).contains(&cp) {
        return Err(Utf8Error::InvalidCodePoint { code_point: cp });
    }

    let mut out = Vec::with_capacity(4);
    match cp {
        0x0000..=0x007F => out.push(cp as u8),
        0x0080..=0x07FF => {
            out.push(0xC0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
        0x0800..=0xFFFF => {
            out.push(0xE0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
        _ => {
            out.push(0xF0 | (cp >> 18) as u8);
            out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
    }
    Ok(out)
}

/// Decodes a single Unicode scalar value from the front of `bytes`.
///
/// Returns the decoded code point and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`Utf8Error::Truncated`] when fewer continuation bytes are
/// available than the leading byte declares, and
/// [`Utf8Error::InvalidContinuation`] when the leading byte's high bits
/// don't match a valid sequence length or a continuation byte isn't of the
/// form `10xxxxxx`.
pub fn decode_scalar_from_bytes(bytes: &[u8]) -> Result<(u32, usize), Utf8Error> {
    let lead = *bytes
        .first()
        .ok_or(Utf8Error::Truncated { expected: 1, found: 0 })?;

    let len = if lead & 0x80 == 0x00 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        return Err(Utf8Error::InvalidContinuation { offset: 0 });
    };

    if bytes.len() < len {
        return Err(Utf8Error::Truncated {
            expected: len,
            found: bytes.len(),
        });
    }

    let mut cp = match len {
        1 => u32::from(lead),
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };

    for (i, &b) in bytes[1..len].iter().enumerate() {
        if b & 0xC0 != 0x80 {
            return Err(Utf8Error::InvalidContinuation { offset: i + 1 });
        }
        cp = (cp << 6) | u32::from(b & 0x3F);
    }

    Ok((cp, len))
}

/// Encodes a sequence of scalar values into their concatenated UTF-8 bytes.
///
/// # Errors
///
/// Propagates [`Utf8Error::InvalidCodePoint`] from the first scalar that
/// fails to encode.
pub fn encode_sequence_to_bytes(seq: &[u32]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    for &cp in seq {
        out.extend(encode_scalar_to_bytes(cp)?);
    }
    Ok(out)
}

/// Decodes `length` scalar values from the front of `bytes`, returning the
/// decoded sequence and the number of bytes consumed.
///
/// # Errors
///
/// Propagates [`Utf8Error::Truncated`] or [`Utf8Error::InvalidContinuation`]
/// from the underlying per-scalar decode.
pub fn decode_sequence_from_bytes(bytes: &[u8], length: usize) -> Result<(Vec<u32>, usize), CodecError> {
    let mut seq = Vec::with_capacity(length);
    let mut offset = 0;
    for _ in 0..length {
        let (cp, consumed) = decode_scalar_from_bytes(&bytes[offset..])?;
        seq.push(cp);
        offset += consumed;
    }
    Ok((seq, offset))
}

impl From<Utf8Error> for CodecError {
    fn from(value: Utf8Error) -> Self {
        CodecError::InvalidUtf8(value)
    }
}
