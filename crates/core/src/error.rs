//! Error kinds shared by every codec in the workspace.
//!
//! The source this workspace is grounded on printed diagnostics to stdout
//! and returned sentinel values (`-1`, empty strings) on failure. Every
//! fallible operation here instead returns a `Result<_, CodecError>`; callers
//! decide how to report it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The error surface shared by every codec's `encode`/`decode` entry points.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Opening, reading, or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the file the failing operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A binary reader ran out of input before satisfying a fixed-width read
    /// or the declared container length.
    #[error("unexpected end of file while reading {what}")]
    UnexpectedEof {
        /// What the reader was trying to read when input ran out.
        what: &'static str,
    },

    /// A UTF-8 byte sequence in a container or source file was malformed.
    #[error(transparent)]
    InvalidUtf8(#[from] Utf8Error),

    /// A container's header declared a length, count, or index that cannot
    /// be satisfied by the rest of the file.
    #[error("invalid container: {reason}")]
    InvalidContainer {
        /// Human-readable description of what failed validation.
        reason: String,
    },

    /// An RLE chunk had a zero signed count, or reading it would overrun the
    /// declared string length.
    #[error("malformed RLE chunk: {reason}")]
    MalformedChunk {
        /// Human-readable description of the malformed chunk.
        reason: String,
    },

    /// Arithmetic-coding decode produced a value outside the interval
    /// implied by the block header; indicates insufficient decode precision.
    #[error("arithmetic decode precision failure in block {block_index}")]
    PrecisionFailure {
        /// Index (0-based) of the offending block.
        block_index: usize,
    },

    /// The codec was asked to encode or decode a zero-length input and its
    /// documented empty-input policy is to surface an error rather than emit
    /// an empty container.
    #[error("empty input is not permitted by this codec")]
    EmptyInput,
}

impl CodecError {
    /// Wraps an [`io::Error`] with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds an [`CodecError::InvalidContainer`] from a formatted reason.
    pub fn invalid_container(reason: impl Into<String>) -> Self {
        Self::InvalidContainer {
            reason: reason.into(),
        }
    }

    /// Builds a [`CodecError::MalformedChunk`] from a formatted reason.
    pub fn malformed_chunk(reason: impl Into<String>) -> Self {
        Self::MalformedChunk {
            reason: reason.into(),
        }
    }
}

/// Failure modes specific to decoding a UTF-8 byte stream back into scalar
/// values.
#[derive(Debug, Error)]
pub enum Utf8Error {
    /// The leading byte's high bits do not match any valid UTF-8 sequence
    /// length, or a continuation byte isn't of the form `10xxxxxx`.
    #[error("invalid UTF-8 continuation byte at offset {offset}")]
    InvalidContinuation {
        /// Byte offset (within the current read) of the offending byte.
        offset: usize,
    },

    /// Fewer continuation bytes were available than the leading byte
    /// declared.
    #[error("truncated UTF-8 sequence: expected {expected} bytes, found {found}")]
    Truncated {
        /// Bytes the leading byte declared the sequence would need.
        expected: usize,
        /// Bytes actually available before the stream ended.
        found: usize,
    },

    /// A scalar value fell outside `0..=0x10FFFF` or inside the surrogate
    /// range `0xD800..=0xDFFF`.
    #[error("{code_point:#x} is not a valid Unicode scalar value")]
    InvalidCodePoint {
        /// The out-of-range or surrogate code point.
        code_point: u32,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, CodecError>;
