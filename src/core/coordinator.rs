//! # Coordinator: runs long-lived tasks, drives two-phase shutdown, collects failures.
//!
//! The [`Coordinator`] owns two tokens, a failure list, the registered cleanup
//! tasks, and a [`TaskGroup`] tracking everything it spawned.
//!
//! ## High-level architecture
//! ```text
//! register_task(t) ──► group.run(guarded(t.run(stop)))        (starts now)
//! register_cleanup(c) ──► state.cleanups.push(c)              (stored)
//!
//! SignalBridge / shutdown() caller
//!             └─► shutdown()   (first call only)
//!                    ├─► phase = ShuttingDown, snapshot cleanups   (under lock)
//!                    ├─► stop.cancel()           → tasks observe it cooperatively
//!                    ├─► group.run(guarded(c.run())) for every cleanup
//!                    ├─► phase = Draining
//!                    └─► spawn: group.wait() ─► done.cancel()   (under lock)
//! ```
//!
//! ## Rules
//! - `stop` is cancelled strictly before any cleanup task is spawned.
//! - `done` is cancelled strictly after every task spawned by this coordinator
//!   (long-running and cleanup) has returned, failed, or panicked.
//! - Every spawned unit runs behind `catch_unwind`; a panic becomes a
//!   [`Failure::Panicked`] and never reaches the runtime.
//! - Registration after shutdown began is rejected with
//!   [`RuntimeError::ShuttingDown`]; the phase check and the spawn/append share
//!   the lock with the cleanup snapshot, so nothing slips in behind it.
//! - The lock is never held across an `.await`.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::core::{Config, CoordinatorBuilder, TaskGroup};
use crate::error::{Failure, RuntimeError, TaskError, TaskKind};
use crate::logging::Logger;
use crate::tasks::{CleanupRef, TaskRef};

/// Lifecycle phase of a [`Coordinator`].
///
/// Transitions only move forward: `Running → ShuttingDown → Draining → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Accepting registrations; long-running tasks are executing.
    Running,
    /// Shutdown was triggered; the stop token is being cancelled.
    ShuttingDown,
    /// Cleanup tasks are spawned; waiting for every task to return.
    Draining,
    /// The done token fired.
    Done,
}

/// Mutable state guarded by a single lock.
struct State {
    phase: Phase,
    failures: Vec<Failure>,
    cleanups: Vec<CleanupRef>,
}

/// State shared with every spawned unit.
struct Shared {
    logger: Arc<dyn Logger>,
    state: Mutex<State>,
}

impl Shared {
    /// Locks the state, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, failure: Failure) {
        self.logger.error(format_args!("{failure}"));
        self.lock().failures.push(failure);
    }
}

/// Process-lifecycle coordinator.
///
/// Build it with [`Coordinator::builder`] (or [`Coordinator::new`]) inside a
/// tokio runtime, register tasks, then await [`Coordinator::done`].
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use lifeline::{CleanupFn, Config, Coordinator, TaskError, TaskFn};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let parent = CancellationToken::new();
///     let coordinator = Coordinator::builder(Config::without_signals())
///         .with_parent(parent.clone())
///         .build()?;
///
///     coordinator.register_task(TaskFn::arc("worker", |ctx: CancellationToken| async move {
///         ctx.cancelled().await;
///         Ok::<_, TaskError>(())
///     }))?;
///     coordinator.register_cleanup(CleanupFn::arc("flush", || async {
///         Ok::<_, TaskError>(())
///     }))?;
///
///     parent.cancel();
///     coordinator.wait().await?;
///     Ok(())
/// }
/// ```
pub struct Coordinator {
    cfg: Config,
    /// Cancelled when shutdown begins; handed to long-running tasks.
    stop: CancellationToken,
    /// Cancelled once every spawned task has returned.
    done: CancellationToken,
    group: TaskGroup,
    shared: Arc<Shared>,
}

impl Coordinator {
    /// Returns a builder for a coordinator with the given configuration.
    pub fn builder(cfg: Config) -> CoordinatorBuilder {
        CoordinatorBuilder::new(cfg)
    }

    /// Builds a coordinator with default configuration, a root parent token,
    /// and the default logger, on the current tokio runtime.
    pub fn new() -> Result<Arc<Self>, RuntimeError> {
        CoordinatorBuilder::new(Config::default()).build()
    }

    /// Builds a coordinator whose stop token is derived from `parent`.
    ///
    /// Cancelling `parent` starts the shutdown sequence.
    pub fn with_parent(parent: CancellationToken) -> Result<Arc<Self>, RuntimeError> {
        CoordinatorBuilder::new(Config::default())
            .with_parent(parent)
            .build()
    }

    pub(crate) fn new_internal(
        cfg: Config,
        parent: &CancellationToken,
        logger: Arc<dyn Logger>,
        runtime: Handle,
    ) -> Self {
        Self {
            cfg,
            stop: parent.child_token(),
            done: CancellationToken::new(),
            group: TaskGroup::with_handle(runtime),
            shared: Arc::new(Shared {
                logger,
                state: Mutex::new(State {
                    phase: Phase::Running,
                    failures: Vec::new(),
                    cleanups: Vec::new(),
                }),
            }),
        }
    }

    /// Starts a long-running task now, handing it the stop token.
    ///
    /// May be called from any thread; the task runs on the coordinator's
    /// runtime.
    ///
    /// A returned error or a panic is recorded in [`errors`](Self::errors);
    /// it never affects sibling tasks.
    pub fn register_task(&self, task: TaskRef) -> Result<(), RuntimeError> {
        let state = self.shared.lock();
        if state.phase != Phase::Running {
            return Err(RuntimeError::ShuttingDown {
                task: task.name().to_string(),
            });
        }

        let ctx = self.stop.clone();
        let name = task.name().to_string();
        self.spawn_guarded(TaskKind::LongRunning, name, async move {
            task.run(ctx).await
        });
        drop(state);
        Ok(())
    }

    /// Stores a cleanup task to be run once shutdown begins.
    pub fn register_cleanup(&self, task: CleanupRef) -> Result<(), RuntimeError> {
        let mut state = self.shared.lock();
        if state.phase != Phase::Running {
            return Err(RuntimeError::ShuttingDown {
                task: task.name().to_string(),
            });
        }
        state.cleanups.push(task);
        Ok(())
    }

    /// Starts the shutdown sequence.
    ///
    /// Returns `true` for the call that actually started it; every later call
    /// (from any thread, signal, or parent cancellation) is a no-op returning
    /// `false`.
    ///
    /// Safe to call from threads outside the runtime: every spawn goes
    /// through the coordinator's runtime handle.
    pub fn shutdown(&self) -> bool {
        let cleanups = {
            let mut state = self.shared.lock();
            if state.phase != Phase::Running {
                return false;
            }
            state.phase = Phase::ShuttingDown;
            std::mem::take(&mut state.cleanups)
        };

        self.shared.logger.info(format_args!(
            "shutting down: cancelling running processes, {} cleanup process(es) queued",
            cleanups.len()
        ));
        self.stop.cancel();

        for cleanup in cleanups {
            let name = cleanup.name().to_string();
            self.spawn_guarded(TaskKind::Cleanup, name, async move { cleanup.run().await });
        }
        self.shared.lock().phase = Phase::Draining;

        let group = self.group.clone();
        let shared = Arc::clone(&self.shared);
        let done = self.done.clone();
        self.group.handle().spawn(async move {
            group.wait().await;

            let mut state = shared.lock();
            state.phase = Phase::Done;
            done.cancel();
            let failed = state.failures.len();
            drop(state);

            shared.logger.info(format_args!(
                "shutdown complete, {failed} failure(s) recorded"
            ));
        });
        true
    }

    /// Waits until shutdown has fully completed.
    pub async fn done(&self) {
        self.done.cancelled().await;
    }

    /// Waits until shutdown has fully completed and reports recorded failures.
    ///
    /// Returns [`RuntimeError::TasksFailed`] if any task failed or panicked.
    pub async fn wait(&self) -> Result<(), RuntimeError> {
        self.done().await;
        let failures = self.errors();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(RuntimeError::TasksFailed { failures })
        }
    }

    /// Clone of the token cancelled once shutdown has fully completed.
    pub fn done_token(&self) -> CancellationToken {
        self.done.clone()
    }

    /// Clone of the stop token.
    ///
    /// Cleanup tasks (or anything else) can await it to learn that shutdown
    /// has begun without being cancelled themselves.
    pub fn cleanup_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Snapshot of the failures recorded so far, in arrival order.
    ///
    /// Most meaningful after [`done`](Self::done) resolves.
    pub fn errors(&self) -> Vec<Failure> {
        self.shared.lock().failures.clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.shared.lock().phase
    }

    /// `true` once shutdown has been triggered.
    pub fn is_shutting_down(&self) -> bool {
        self.phase() != Phase::Running
    }

    /// Configuration this coordinator was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The logging collaborator.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.shared.logger
    }

    /// Spawns `fut` into the group behind the panic boundary.
    fn spawn_guarded<F>(&self, kind: TaskKind, name: String, fut: F)
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        self.group.run(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => shared.record(Failure::Failed {
                    task: name,
                    kind,
                    error,
                }),
                Err(panic) => shared.record(Failure::Panicked {
                    task: name,
                    kind,
                    message: panic_message(panic.as_ref()),
                }),
            }
        });
    }
}

/// Renders a panic payload as text.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
