#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Five lossless text codecs over self-describing binary containers: run
//! length encoding ([`rle`]), move-to-front ([`mtf`]), the Burrows-Wheeler
//! transform ([`bwt`]), block arithmetic coding ([`ac`]), and static
//! per-file Huffman coding ([`ha`]). Each stands alone; none composes with
//! another in this crate.
//!
//! # Design
//!
//! Every codec reads its input as a [`core::CodePointSequence`] via
//! [`core::binio::read_all_to_code_points`], transforms it, and writes a
//! fixed binary layout documented at the top of its module. Decoding
//! reverses the same layout. [`Algorithm`] names the five, and [`Codec`]
//! is the capability set (`encode`/`decode`) each module's unit struct
//! implements, so callers can select an algorithm at runtime without a
//! match on every call site.
//!
//! # Errors
//!
//! All fallible operations return [`core::error::CodecError`]; nothing in
//! this crate panics on malformed input.

pub mod ac;
pub mod bwt;
mod huffman;
pub mod ha;
pub mod mtf;
pub mod rle;

use std::path::Path;

use core::Result;

/// The text codecs this workspace implements.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// Run-length encoding.
    Rle,
    /// Move-to-front.
    Mtf,
    /// Burrows-Wheeler transform.
    Bwt,
    /// Block arithmetic coding.
    Ac,
    /// Static per-file Huffman coding.
    Ha,
}

impl Algorithm {
    /// Returns the canonical lowercase name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rle => "rle",
            Self::Mtf => "mtf",
            Self::Bwt => "bwt",
            Self::Ac => "ac",
            Self::Ha => "ha",
        }
    }

    /// Parses a canonical algorithm name, returning `None` for anything
    /// else.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "rle" => Some(Self::Rle),
            "mtf" => Some(Self::Mtf),
            "bwt" => Some(Self::Bwt),
            "ac" => Some(Self::Ac),
            "ha" => Some(Self::Ha),
            _ => None,
        }
    }

    /// Returns the set of all algorithms this crate implements.
    #[must_use]
    pub const fn all() -> &'static [Algorithm] {
        &[Self::Rle, Self::Mtf, Self::Bwt, Self::Ac, Self::Ha]
    }

    /// Returns the [`Codec`] implementor for this algorithm.
    #[must_use]
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Self::Rle => Box::new(rle::Rle),
            Self::Mtf => Box::new(mtf::Mtf),
            Self::Bwt => Box::new(bwt::Bwt),
            Self::Ac => Box::new(ac::Ac),
            Self::Ha => Box::new(ha::Ha),
        }
    }
}

/// The capability set every codec in this crate implements: encode a
/// UTF-8 text file to its binary container, and decode it back.
pub trait Codec {
    /// Reads UTF-8 text from `input` and writes the binary container to
    /// `output`.
    ///
    /// # Errors
    ///
    /// Returns [`core::error::CodecError`] on I/O failure or malformed
    /// source text.
    fn encode(&self, input: &Path, output: &Path) -> Result<()>;

    /// Reads the binary container at `input` and writes decoded UTF-8
    /// text to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`core::error::CodecError`] on I/O failure or a malformed
    /// container.
    fn decode(&self, input: &Path, output: &Path) -> Result<()>;
}
