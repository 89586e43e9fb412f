//! # StdLogger: default logger
//!
//! Writes one timestamped line per call: `INFO` lines go to stdout, `ERROR`
//! lines go to stderr. `fatal` writes an `ERROR` line tagged `fatal=true`
//! before exiting.
//!
//! ## Example output
//! ```text
//! 2026-10-16T20:48:00.123456Z  INFO received SIGINT for process 4242, shutting down
//! 2026-10-16T20:48:00.345678Z ERROR panic in cleanup process "flush": boom
//! ```

use std::fmt;

use tracing::Dispatch;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use super::Logger;

/// Logger backed by a private `tracing-subscriber` formatter.
///
/// The dispatcher is scoped to each call, so it never replaces or conflicts
/// with a global subscriber installed by the application.
#[derive(Clone)]
pub struct StdLogger {
    dispatch: Dispatch,
}

impl StdLogger {
    /// Construct a new [`StdLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_sinks(
            BoxMakeWriter::new(std::io::stdout),
            BoxMakeWriter::new(std::io::stderr),
        )
    }

    /// Info lines go to `out`; error and fatal lines go to `err`.
    fn with_sinks(out: BoxMakeWriter, err: BoxMakeWriter) -> Self {
        let writer = err.with_max_level(tracing::Level::WARN).or_else(out);

        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_target(false)
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Error line tagged `fatal=true`.
    fn write_fatal(&self, args: fmt::Arguments<'_>) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::error!(fatal = true, "{}", args);
        });
    }
}

impl Default for StdLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdLogger").finish_non_exhaustive()
    }
}

impl Logger for StdLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::info!("{}", args);
        });
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::error!("{}", args);
        });
    }

    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.write_fatal(args);
        std::process::exit(1)
    }
}
