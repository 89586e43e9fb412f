use std::fmt;

/// Leveled logging interface used by the coordinator.
///
/// Every method takes pre-formatted [`fmt::Arguments`], so call sites use
/// `format_args!` both for plain messages and for formatted ones.
pub trait Logger: Send + Sync + 'static {
    /// Logs an informational line.
    fn info(&self, args: fmt::Arguments<'_>);

    /// Logs an error line.
    fn error(&self, args: fmt::Arguments<'_>);

    /// Logs an error line and terminates the process with exit status 1.
    ///
    /// Meant for unrecoverable bootstrap errors. The coordinator itself never
    /// calls it: task failures are recorded, not fatal.
    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.error(args);
        std::process::exit(1)
    }
}

/// Forwards to the application's global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    /// Construct a new [`TracingLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "lifeline", "{}", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target: "lifeline", "{}", args);
    }
}
