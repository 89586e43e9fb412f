//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for long-running, cancelable tasks
//! - [`Cleanup`] - trait for teardown tasks run after shutdown begins
//! - [`TaskFn`], [`CleanupFn`] - closure-backed implementations
//! - [`TaskRef`], [`CleanupRef`] - shared handles (`Arc<dyn ...>`)

mod task;
mod task_fn;

pub use task::{Cleanup, CleanupRef, Task, TaskRef};
pub use task_fn::{CleanupFn, TaskFn};
