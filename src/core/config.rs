//! # Coordinator configuration.
//!
//! Provides [`Config`], the plain settings for a [`Coordinator`](crate::Coordinator).
//! The parent token and the logger are supplied through
//! [`CoordinatorBuilder`](crate::CoordinatorBuilder) because they are handles,
//! not settings.

/// Settings for the coordinator runtime.
///
/// ## Field semantics
/// - `handle_signals`: install OS listeners for interrupt/terminate (`false` =
///   only the parent token or an explicit [`shutdown`](crate::Coordinator::shutdown)
///   can stop the run)
/// - `handle_pause`: also observe the pause signal (SIGTSTP) and log it
///   instead of letting the shell suspend the process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Listen for interrupt and terminate signals.
    pub handle_signals: bool,

    /// Listen for the pause signal. Ignored when `handle_signals` is `false`.
    ///
    /// Pause never triggers shutdown; it is only logged.
    pub handle_pause: bool,
}

impl Config {
    /// Config that never installs OS signal listeners.
    ///
    /// Useful when the embedding application owns signal handling and calls
    /// [`shutdown`](crate::Coordinator::shutdown) itself.
    #[must_use]
    pub fn without_signals() -> Self {
        Self {
            handle_signals: false,
            handle_pause: false,
        }
    }

    /// Returns `true` if the pause listener should be installed.
    #[inline]
    pub fn listens_for_pause(&self) -> bool {
        self.handle_signals && self.handle_pause
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `handle_signals = true`
    /// - `handle_pause = true`
    fn default() -> Self {
        Self {
            handle_signals: true,
            handle_pause: true,
        }
    }
}
