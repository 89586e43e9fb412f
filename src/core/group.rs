//! # TaskGroup: join primitive for in-flight units.
//!
//! Tracks how many spawned units are still running and lets any number of
//! callers wait until that count drops to zero.
//!
//! ## Rules
//! - The count is incremented **before** the unit is spawned, so a concurrent
//!   [`TaskGroup::wait`] can never observe zero while a unit is about to start.
//! - The count is decremented by a drop guard owned by the spawned future, so
//!   it is released on return, on panic, and when the runtime drops the task.
//! - Units are spawned through the runtime [`Handle`] captured at construction,
//!   so [`TaskGroup::run`] works from any thread, inside the runtime or not.
//! - No ordering, priority, or error handling: unit outcomes are the caller's
//!   business.

use std::future::Future;
use std::sync::Arc;

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

/// Cloneable set of in-flight units.
///
/// Clones share the same counter.
#[derive(Clone, Debug)]
pub struct TaskGroup {
    inflight: Arc<watch::Sender<usize>>,
    runtime: Handle,
}

impl TaskGroup {
    /// Creates an empty group bound to the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime; use
    /// [`TaskGroup::with_handle`] there.
    #[must_use]
    pub fn new() -> Self {
        Self::with_handle(Handle::current())
    }

    /// Creates an empty group that spawns onto `runtime`.
    #[must_use]
    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            inflight: Arc::new(watch::Sender::new(0)),
            runtime,
        }
    }

    /// Runtime the group spawns onto.
    pub fn handle(&self) -> &Handle {
        &self.runtime
    }

    /// Registers one more unit and spawns it on the group's runtime.
    ///
    /// May be called from any thread.
    pub fn run<F>(&self, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inflight.send_modify(|n| *n += 1);
        let guard = InflightGuard {
            inflight: Arc::clone(&self.inflight),
        };

        self.runtime.spawn(async move {
            let _guard = guard;
            fut.await;
        })
    }

    /// Waits until no unit is in flight.
    ///
    /// Returns immediately when the group is empty.
    pub async fn wait(&self) {
        let mut rx = self.inflight.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Number of units started but not yet finished.
    pub fn len(&self) -> usize {
        *self.inflight.borrow()
    }

    /// `true` when no unit is in flight.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TaskGroup {
    /// Same as [`TaskGroup::new`].
    fn default() -> Self {
        Self::new()
    }
}

/// Releases one in-flight slot on drop.
struct InflightGuard {
    inflight: Arc<watch::Sender<usize>>,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.inflight.send_modify(|n| *n = n.saturating_sub(1));
    }
}
