//! CLI-specific error kinds layered over [`core::error::CodecError`].

use thiserror::Error;

/// Failure modes specific to argument parsing and dispatch, distinct from
/// the codec-internal errors in [`core::error::CodecError`].
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing failed; the message is clap's own rendered error.
    #[error("{0}")]
    Usage(String),

    /// The requested algorithm name didn't match any of [`compress::Algorithm::all`].
    #[error("unknown algorithm {name:?}; expected one of rle, mtf, bwt, ac, ha")]
    UnknownAlgorithm {
        /// The unrecognised name as typed by the caller.
        name: String,
    },

    /// A codec's `encode`/`decode` call failed.
    #[error(transparent)]
    Codec(#[from] core::error::CodecError),
}
