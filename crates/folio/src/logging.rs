//! Logging setup for the `folio` binary.
//!
//! Library code logs through `tracing` macros and never installs a
//! subscriber itself. The CLI calls [`init_logging`] once; the browser crate
//! writes to the console instead.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Crates whose events the default filter lets through.
const CRATES: [&str; 2] = ["folio", "folio_web"];

/// How chatty the CLI is, chosen by `-q` and repeated `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Activations, loads and other milestones.
    #[default]
    Normal,
    /// Every dispatched event and no-op.
    Verbose,
    /// Per-element reveal and scroll-spy detail.
    Trace,
}

impl Verbosity {
    /// Verbosity selected by `-q` and the number of `-v` flags.
    /// `-q` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Most detailed level let through.
    #[must_use]
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Filter directives scoping the level to this workspace's crates.
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.level();
        CRATES
            .iter()
            .map(|name| format!("{name}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber.
///
/// A non-empty `RUST_LOG` replaces the verbosity-derived directives. Events
/// go to stderr, so JSON printed on stdout stays parseable. Calling this
/// again after a subscriber is installed does nothing.
///
/// # Examples
///
/// ```no_run
/// use folio::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(verbosity.directives()),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbosity >= Verbosity::Verbose)
        .try_init();
}

/// Initialize logging for tests.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("folio=warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
    }

    #[test]
    fn test_verbose_flag_count() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(false, 9), Verbosity::Trace);
    }

    #[test]
    fn test_levels() {
        assert_eq!(Verbosity::Quiet.level(), LevelFilter::ERROR);
        assert_eq!(Verbosity::default().level(), LevelFilter::INFO);
        assert_eq!(Verbosity::Trace.level(), LevelFilter::TRACE);
    }

    #[test]
    fn test_directives_cover_both_crates() {
        assert_eq!(
            Verbosity::Verbose.directives(),
            "folio=debug,folio_web=debug"
        );
        assert_eq!(Verbosity::Quiet.directives(), "folio=error,folio_web=error");
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        init_logging(Verbosity::Trace);
        init_logging(Verbosity::Quiet);
    }

    #[test]
    fn test_init_test_logging() {
        init_test_logging();
    }
}
