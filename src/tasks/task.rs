//! # Long-running and cleanup task traits.
//!
//! A [`Task`] runs from registration until it notices the stop token (or
//! finishes on its own). A [`Cleanup`] is stored at registration and only runs
//! once shutdown has begun.
//!
//! Cancellation is cooperative: the coordinator never interrupts a task, it
//! only cancels the token the task was handed. A task that ignores the token
//! keeps the coordinator from ever reaching `Done`.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// # Shared handle to a long-running task.
pub type TaskRef = std::sync::Arc<dyn Task>;

/// # Shared handle to a cleanup task.
pub type CleanupRef = std::sync::Arc<dyn Cleanup>;

/// # Asynchronous, cancelable unit started at registration.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use lifeline::{Task, TaskError};
///
/// struct Poller;
///
/// #[async_trait]
/// impl Task for Poller {
///     fn name(&self) -> &str { "poller" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         while !ctx.is_cancelled() {
///             // poll something...
///             tokio::time::sleep(std::time::Duration::from_millis(100)).await;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task until completion or cancellation.
    ///
    /// Implementations should check `ctx.is_cancelled()` (or await
    /// `ctx.cancelled()`) and return promptly once it fires. Return `Ok(())`
    /// for a clean stop: any error, [`TaskError::Canceled`] included, is
    /// recorded as a failure.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}

/// # Teardown unit run after shutdown begins.
///
/// Cleanup tasks get no token of their own. Use
/// [`Coordinator::cleanup_token`](crate::Coordinator::cleanup_token) to observe
/// that shutdown is in progress.
#[async_trait]
pub trait Cleanup: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Performs the teardown work.
    async fn run(&self) -> Result<(), TaskError>;
}
