//! # lifeline
//!
//! **Lifeline** coordinates the lifecycle of a long-running process: it runs
//! a set of long-lived tasks, and when the process is asked to stop it cancels
//! them, runs the registered cleanup tasks, and then reports that everything
//! is finished, together with every failure seen along the way.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   register_task(t1)   register_task(t2)    register_cleanup(c1, c2)
//!          │                    │                        │
//!          ▼                    ▼                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Coordinator                                                      │
//! │  - stop token   (handed to long-running tasks)                    │
//! │  - done token   (fires when everything has returned)              │
//! │  - TaskGroup    (counts in-flight tasks)                          │
//! │  - failures     (returned errors + caught panics, arrival order)  │
//! └──────▲────────────────────────────────────────────────────────────┘
//!        │ shutdown()  (first call only)
//! ┌──────┴───────────────────────────┐
//! │  SignalBridge                    │
//! │  SIGINT / SIGTERM / parent token │
//! │  SIGTSTP → logged only           │
//! └──────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Running ──► ShuttingDown ──► Draining ──► Done
//!              stop.cancel()    cleanups      done.cancel()
//!                               spawned       (after group drained)
//! ```
//!
//! Cancellation is cooperative: tasks are handed a token and are expected to
//! return once it fires. A task that ignores it delays `Done` forever.
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                      |
//! |-------------------|--------------------------------------------------------------|-----------------------------------------|
//! | **Coordination**  | Register tasks, trigger shutdown, await completion.          | [`Coordinator`], [`Phase`]              |
//! | **Tasks**         | Long-running and cleanup units, closure-backed helpers.      | [`Task`], [`Cleanup`], [`TaskFn`], [`CleanupFn`] |
//! | **Join**          | Count in-flight units and wait for zero.                     | [`TaskGroup`]                           |
//! | **Errors**        | Typed task errors and recorded failures.                     | [`TaskError`], [`Failure`], [`RuntimeError`] |
//! | **Logging**       | Pluggable leveled logger.                                    | [`Logger`], [`StdLogger`], [`TracingLogger`] |
//! | **Configuration** | Signal handling switches, parent token, logger.              | [`Config`], [`CoordinatorBuilder`]      |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use lifeline::{CleanupFn, Coordinator, TaskError, TaskFn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coordinator = Coordinator::new()?;
//!
//!     coordinator.register_task(TaskFn::arc("ticker", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!         }
//!         Ok::<_, TaskError>(())
//!     }))?;
//!
//!     coordinator.register_cleanup(CleanupFn::arc("flush", || async {
//!         Ok::<_, TaskError>(())
//!     }))?;
//!
//!     // Normally SIGINT/SIGTERM does this.
//!     coordinator.shutdown();
//!
//!     coordinator.done().await;
//!     assert!(coordinator.errors().is_empty());
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod logging;
mod tasks;

pub mod global;

// ---- Public re-exports ----

pub use crate::core::{Config, Coordinator, CoordinatorBuilder, OsSignal, Phase, TaskGroup};
pub use error::{Failure, RuntimeError, TaskError, TaskKind};
pub use logging::{Logger, StdLogger, TracingLogger};
pub use tasks::{Cleanup, CleanupFn, CleanupRef, Task, TaskFn, TaskRef};
