//! Fixed-width little-endian binary I/O primitives.
//!
//! Every container format in this workspace is pinned to little-endian so
//! that encoded files round-trip byte-for-byte across platforms; spec.md
//! leaves the byte order an implementer choice but requires it fixed and
//! documented. This module is that choice.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::CodecError;
use crate::utf8::decode_sequence_from_bytes;

macro_rules! binio_pair {
    ($append:ident, $read:ident, $ty:ty) => {
        /// Appends a little-endian
        #[doc = concat!(stringify!($ty), " to `writer`.")]
        pub fn $append<W: Write>(writer: &mut W, value: $ty) -> io::Result<()> {
            writer.write_all(&value.to_le_bytes())
        }

        /// Reads a little-endian
        #[doc = concat!(stringify!($ty), " from `reader`.")]
        pub fn $read<R: Read>(reader: &mut R) -> Result<$ty, CodecError> {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            reader.read_exact(&mut buf).map_err(|_| CodecError::UnexpectedEof {
                what: stringify!($ty),
            })?;
            Ok(<$ty>::from_le_bytes(buf))
        }
    };
}

binio_pair!(append_u8, read_u8, u8);
binio_pair!(append_u16, read_u16, u16);
binio_pair!(append_u32, read_u32, u32);
binio_pair!(append_u64, read_u64, u64);
binio_pair!(append_i8, read_i8, i8);
binio_pair!(append_i16, read_i16, i16);
binio_pair!(append_i32, read_i32, i32);
binio_pair!(append_i64, read_i64, i64);

/// Reads the whole contents of `path` as UTF-8 and decodes it into a
/// sequence of Unicode scalar values.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be opened or read, and
/// propagates [`crate::error::Utf8Error`] if the bytes aren't valid UTF-8.
pub fn read_all_to_code_points(path: &Path) -> Result<Vec<u32>, CodecError> {
    let mut file = File::open(path).map_err(|e| CodecError::io(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| CodecError::io(path, e))?;

    let mut scalars = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (seq, consumed) = decode_sequence_from_bytes(&bytes[offset..], 1)?;
        scalars.extend(seq);
        offset += consumed;
    }
    Ok(scalars)
}
