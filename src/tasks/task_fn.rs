//! # Function-backed tasks (`TaskFn`, `CleanupFn`)
//!
//! Both wrap a closure that *creates* a fresh future per run. Shared state
//! belongs in an explicit `Arc<...>` cloned inside the closure.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use tokio_util::sync::CancellationToken;
//! use lifeline::{CleanupFn, CleanupRef, TaskError, TaskFn, TaskRef};
//!
//! let ticks = Arc::new(AtomicU32::new(0));
//!
//! let t: TaskRef = TaskFn::arc("ticker", {
//!     let ticks = ticks.clone();
//!     move |ctx: CancellationToken| {
//!         let ticks = ticks.clone();
//!         async move {
//!             while !ctx.is_cancelled() {
//!                 ticks.fetch_add(1, Ordering::SeqCst);
//!                 tokio::time::sleep(std::time::Duration::from_millis(10)).await;
//!             }
//!             Ok::<_, TaskError>(())
//!         }
//!     }
//! });
//!
//! let c: CleanupRef = CleanupFn::arc("flush", || async { Ok::<_, TaskError>(()) });
//!
//! assert_eq!(t.name(), "ticker");
//! assert_eq!(c.name(), "flush");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::task::{Cleanup, CleanupRef, Task, TaskRef};

/// Function-backed long-running task.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F, Fut> TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> TaskRef {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        (self.f)(ctx).await
    }
}

/// Function-backed cleanup task.
#[derive(Debug)]
pub struct CleanupFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F, Fut> CleanupFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    /// Creates a new function-backed cleanup task.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the cleanup task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> CleanupRef {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Cleanup for CleanupFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), TaskError> {
        (self.f)().await
    }
}
