//! Error types used by the coordinator and by tasks.
//!
//! This module defines three types:
//!
//! - [`TaskError`]: what a long-running or cleanup task returns.
//! - [`Failure`]: one entry of the coordinator's failure sequence (a returned
//!   error or an intercepted panic, tagged with the task that produced it).
//! - [`RuntimeError`]: errors raised by the coordinator itself.
//!
//! All of them provide `as_label` for logs.

use std::fmt;

use thiserror::Error;

/// # Errors produced by the coordinator.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A task was registered after shutdown had already begun.
    #[error("coordinator is shutting down; task {task:?} rejected")]
    ShuttingDown {
        /// Name of the rejected task.
        task: String,
    },

    /// OS signal listeners could not be installed.
    #[error("failed to install signal handlers: {source}")]
    SignalSetup {
        /// The underlying I/O error reported by the signal driver.
        #[from]
        source: std::io::Error,
    },

    /// No tokio runtime was supplied and none is running on this thread.
    #[error("no tokio runtime available: {source}")]
    NoRuntime {
        /// The lookup error reported by tokio.
        #[from]
        source: tokio::runtime::TryCurrentError,
    },

    /// The coordinator finished, but at least one task failed or panicked.
    #[error("{} task(s) failed during the run", .failures.len())]
    TasksFailed {
        /// Every recorded failure, in arrival order.
        failures: Vec<Failure>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use lifeline::RuntimeError;
    ///
    /// let err = RuntimeError::ShuttingDown { task: "flush".into() };
    /// assert_eq!(err.as_label(), "runtime_shutting_down");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::ShuttingDown { .. } => "runtime_shutting_down",
            RuntimeError::SignalSetup { .. } => "runtime_signal_setup",
            RuntimeError::NoRuntime { .. } => "runtime_no_runtime",
            RuntimeError::TasksFailed { .. } => "runtime_tasks_failed",
        }
    }
}

/// # Errors returned by task execution.
///
/// A task that noticed the stop token and wants to say so explicitly returns
/// [`TaskError::Canceled`]. Like any other error it is recorded as a failure;
/// a task that wants a clean exit returns `Ok(())`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task stopped because shutdown was requested.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Builds a [`TaskError::Fail`] from anything printable.
    ///
    /// ```
    /// use lifeline::TaskError;
    ///
    /// let err = TaskError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(error: impl fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }
}

/// Which registration path a task came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Registered with [`Coordinator::register_task`](crate::Coordinator::register_task).
    LongRunning,
    /// Registered with [`Coordinator::register_cleanup`](crate::Coordinator::register_cleanup).
    Cleanup,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::LongRunning => f.write_str("running process"),
            TaskKind::Cleanup => f.write_str("cleanup process"),
        }
    }
}

/// # One entry of the failure sequence.
///
/// Returned failures and intercepted panics are kept apart so callers can
/// tell a task that reported an error from one that blew up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The task returned an error.
    #[error("{kind} {task:?} failed: {error}")]
    Failed {
        /// Task name.
        task: String,
        /// Registration path.
        kind: TaskKind,
        /// The returned error.
        error: TaskError,
    },

    /// The task panicked; the panic was caught at its spawn boundary.
    #[error("panic in {kind} {task:?}: {message}")]
    Panicked {
        /// Task name.
        task: String,
        /// Registration path.
        kind: TaskKind,
        /// Rendered panic payload.
        message: String,
    },
}

impl Failure {
    /// Name of the task that produced this failure.
    pub fn task(&self) -> &str {
        match self {
            Failure::Failed { task, .. } | Failure::Panicked { task, .. } => task,
        }
    }

    /// Registration path of the task that produced this failure.
    pub fn kind(&self) -> TaskKind {
        match self {
            Failure::Failed { kind, .. } | Failure::Panicked { kind, .. } => *kind,
        }
    }

    /// `true` when the failure is an intercepted panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Failure::Panicked { .. })
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Failure::Failed { .. } => "task_failed",
            Failure::Panicked { .. } => "task_panicked",
        }
    }
}
