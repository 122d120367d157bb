#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Shared primitives for the text-codecs workspace: a UTF-8 scalar codec,
//! fixed-width little-endian binary I/O, text analysis utilities (alphabet
//! extraction, frequency tables, index lookups), the error taxonomy every
//! codec returns, and the reporting helpers (entropy, compression/decoding
//! ratio, mean repeat length) the CLI surfaces after a run.
//!
//! # Design
//!
//! Every higher-level codec in `compress` is built from these pieces:
//! `binio::read_all_to_code_points` loads a file into a
//! [`CodePointSequence`], `analysis` derives the alphabet and frequency
//! table a block needs, and `utf8` is the single unit every container
//! format serializes its payload through.
//!
//! # Errors
//!
//! All fallible operations return [`error::CodecError`] or one of its
//! nested variants; nothing in this crate panics on malformed input.

pub mod analysis;
pub mod binio;
pub mod error;
pub mod report;
pub mod utf8;

pub use error::{CodecError, Result, Utf8Error};

/// An ordered sequence of Unicode scalar values materialised from a text
/// file. Borrowed as `&[u32]` everywhere a codec only needs to read it.
pub type CodePointSequence = Vec<u32>;

/// An ascending-sorted, deduplicated set of code points, as returned by
/// [`analysis::alphabet`].
pub type Alphabet = Vec<u32>;

/// A code point's relative frequency within the block it was derived from,
/// as returned by [`analysis::frequency_map`].
pub type FrequencyTable = std::collections::BTreeMap<u32, f64>;
