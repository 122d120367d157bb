#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! The thin command-line front-end over the [`compress`] codecs:
//! `codecs <algorithm> <encode|decode> <input> <output>`. Parsing lives in
//! [`frontend`]; this module wires a parsed [`frontend::Request`] into a
//! codec invocation and an optional statistics report.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator and a writer pair so it can be
//! exercised directly from tests without touching process-global state;
//! the binary in `src/bin/codecs.rs` is a thin wrapper that forwards
//! `std::env::args_os()` and the real stdout/stderr.
//!
//! # Errors
//!
//! Parsing failures and codec failures are both reported on `stderr` with
//! exit code 1; there is no other failure exit code.

mod error;
mod frontend;

use std::ffi::OsString;
use std::io::Write;

use frontend::Direction;

pub use error::CliError;
pub use frontend::Request;

/// Parses `args`, dispatches the requested codec, and writes diagnostics
/// and (optionally) a statistics report to `stdout`/`stderr`.
///
/// Returns the process exit code: `0` on success, `1` on any parse or
/// codec failure.
pub fn run<I, T>(args: I, stdout: &mut impl Write, stderr: &mut impl Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let request = match frontend::parse(args) {
        Ok(request) => request,
        Err(e) => {
            let _ = writeln!(stderr, "{e}");
            return 1;
        }
    };

    logging::init(request.verbosity);

    if let Err(e) = dispatch(&request, stdout) {
        let _ = writeln!(stderr, "{e}");
        return 1;
    }
    0
}

fn dispatch(request: &Request, stdout: &mut impl Write) -> Result<(), CliError> {
    let codec = request.algorithm.codec();
    match request.direction {
        Direction::Encode => codec.encode(&request.input, &request.output)?,
        Direction::Decode => codec.decode(&request.input, &request.output)?,
    }

    if request.stats {
        print_stats(request, stdout)?;
    }
    Ok(())
}

fn print_stats(request: &Request, stdout: &mut impl Write) -> Result<(), CliError> {
    let (original, container) = match request.direction {
        Direction::Encode => (&request.input, &request.output),
        Direction::Decode => (&request.output, &request.input),
    };

    let ratio = core::report::encoding_ratio(original, container)?;
    let seq = core::binio::read_all_to_code_points(original)?;
    let entropy = core::report::text_entropy(&seq);
    let mean_repeat = core::report::mean_repeat_length(&seq);
    let repeat_ratio = core::report::repeating_char_seq_ratio(&seq);

    let _ = writeln!(
        stdout,
        "{}: encoding ratio {ratio:.4}, entropy {entropy:.4} bits/symbol, mean repeat length {mean_repeat:.4}, repeating-sequence ratio {repeat_ratio:.4}",
        request.algorithm.name()
    );
    Ok(())
}
