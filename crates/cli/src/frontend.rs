//! Command-line parsing: turns a raw argument list into a [`Request`] the
//! caller in [`crate::run`] executes.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::error::CliError;
use compress::Algorithm;
use logging::Verbosity;

/// Which direction a codec invocation runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Read plain text, write a binary container.
    Encode,
    /// Read a binary container, write plain text.
    Decode,
}

/// A fully parsed invocation, ready for [`crate::run`] to dispatch.
#[derive(Debug)]
pub struct Request {
    /// Which codec to run.
    pub algorithm: Algorithm,
    /// Encode or decode.
    pub direction: Direction,
    /// Source file path.
    pub input: PathBuf,
    /// Destination file path.
    pub output: PathBuf,
    /// Whether to print size/entropy statistics after the run.
    pub stats: bool,
    /// Resolved verbosity level for the `logging` crate.
    pub verbosity: Verbosity,
}

fn command() -> Command {
    Command::new("codecs")
        .about("Lossless text codecs: RLE, MTF, BWT, AC, and static Huffman")
        .arg(
            Arg::new("algorithm")
                .help("rle | mtf | bwt | ac | ha")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("direction")
                .help("encode | decode")
                .required(true)
                .index(2),
        )
        .arg(Arg::new("input").help("Source file path").required(true).index(3))
        .arg(Arg::new("output").help("Destination file path").required(true).index(4))
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print size, ratio, and entropy statistics after the run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only warnings and errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase verbosity; repeat for more")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Trace-level output")
                .action(ArgAction::SetTrue),
        )
}

/// Parses `args` (the full argv, including argv\[0\]) into a [`Request`].
///
/// # Errors
///
/// Returns [`CliError::Usage`] if clap rejects the arguments, and
/// [`CliError::UnknownAlgorithm`] if the algorithm positional doesn't match
/// a known codec name.
pub fn parse<I, T>(args: I) -> Result<Request, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args).map_err(|e| CliError::Usage(e.to_string()))?;

    let algorithm_name = matches.get_one::<String>("algorithm").expect("required");
    let algorithm = Algorithm::parse(algorithm_name).ok_or_else(|| CliError::UnknownAlgorithm {
        name: algorithm_name.clone(),
    })?;

    let direction_name = matches.get_one::<String>("direction").expect("required");
    let direction = match direction_name.as_str() {
        "encode" => Direction::Encode,
        "decode" => Direction::Decode,
        other => {
            return Err(CliError::Usage(format!(
                "unknown direction {other:?}; expected \"encode\" or \"decode\""
            )))
        }
    };

    let input = PathBuf::from(matches.get_one::<String>("input").expect("required"));
    let output = PathBuf::from(matches.get_one::<String>("output").expect("required"));
    let stats = matches.get_flag("stats");

    let quiet = matches.get_flag("quiet");
    let verbose_count = matches.get_count("verbose");
    let debug = matches.get_flag("debug");
    let verbosity = Verbosity::from_flags(quiet, verbose_count, debug);

    Ok(Request {
        algorithm,
        direction,
        input,
        output,
        stats,
        verbosity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_encode_invocation() {
        let req = parse(["codecs", "rle", "encode", "in.txt", "out.bin"]).unwrap();
        assert_eq!(req.algorithm, Algorithm::Rle);
        assert_eq!(req.direction, Direction::Encode);
        assert_eq!(req.input, PathBuf::from("in.txt"));
        assert_eq!(req.output, PathBuf::from("out.bin"));
        assert!(!req.stats);
        assert_eq!(req.verbosity, Verbosity::Normal);
    }

    #[test]
    fn parses_stats_and_verbosity_flags() {
        let req = parse(["codecs", "ha", "decode", "a", "b", "--stats", "-vv"]).unwrap();
        assert!(req.stats);
        assert_eq!(req.verbosity, Verbosity::Debug);
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = parse(["codecs", "gzip", "encode", "a", "b"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownAlgorithm { .. }));
    }

    #[test]
    fn missing_arguments_is_a_usage_error() {
        let err = parse(["codecs", "rle"]).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let err = parse(["codecs", "rle", "encode", "a", "b", "-q", "-v"]).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }
}
