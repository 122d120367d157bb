#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! A small verbosity-flag system and `tracing-subscriber` init facade.
//! Library crates in this workspace only emit `tracing` events; the CLI is
//! the single place that decides how verbose the output is and installs a
//! global subscriber, so exactly one init happens per process.
//!
//! # Design
//!
//! [`Verbosity`] maps a `-q`/`-v`/`--debug` style CLI flag set onto a
//! `tracing` filter directive. [`init`] installs a subscriber writing to
//! stderr; codec libraries never call it themselves.

use tracing_subscriber::EnvFilter;

/// Output verbosity levels recognised by the CLI.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Only warnings and errors.
    Quiet,
    /// Warnings, errors, and top-level progress (`info!`).
    Normal,
    /// `Normal` plus per-block diagnostics (`debug!`).
    Verbose,
    /// Everything, including per-symbol tracing (`trace!`).
    Debug,
}

impl Verbosity {
    /// Maps a `(quiet, verbose_count, debug)` CLI flag combination onto a
    /// [`Verbosity`] level. `verbose_count` is how many times `-v` was
    /// given; two or more promotes to [`Verbosity::Debug`].
    #[must_use]
    pub fn from_flags(quiet: bool, verbose_count: u8, debug: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if debug || verbose_count >= 2 {
            Self::Debug
        } else if verbose_count == 1 {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// The `tracing` directive string this level maps to.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// Installs a global `tracing-subscriber` writing to stderr at the given
/// [`Verbosity`]. Safe to call at most once per process; later calls are
/// ignored rather than panicking, matching `tracing`'s own
/// `set_global_default` semantics for a process that embeds this crate in
/// tests.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_new(verbosity.directive()).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_flag_wins_over_verbose_count() {
        assert_eq!(Verbosity::from_flags(true, 3, true), Verbosity::Quiet);
    }

    #[test]
    fn default_flags_map_to_normal() {
        assert_eq!(Verbosity::from_flags(false, 0, false), Verbosity::Normal);
    }

    #[test]
    fn single_verbose_flag_maps_to_verbose() {
        assert_eq!(Verbosity::from_flags(false, 1, false), Verbosity::Verbose);
    }

    #[test]
    fn double_verbose_flag_maps_to_debug() {
        assert_eq!(Verbosity::from_flags(false, 2, false), Verbosity::Debug);
    }

    #[test]
    fn debug_flag_maps_to_debug_regardless_of_verbose_count() {
        assert_eq!(Verbosity::from_flags(false, 0, true), Verbosity::Debug);
    }

    #[test]
    fn verbosity_levels_are_ordered() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert!(Verbosity::Verbose < Verbosity::Debug);
    }

    #[test]
    fn directives_map_to_expected_tracing_levels() {
        assert_eq!(Verbosity::Quiet.directive(), "warn");
        assert_eq!(Verbosity::Normal.directive(), "info");
        assert_eq!(Verbosity::Verbose.directive(), "debug");
        assert_eq!(Verbosity::Debug.directive(), "trace");
    }
}
