//! # Logging collaborator.
//!
//! The coordinator reports lifecycle events (signals, shutdown, task failures)
//! through the [`Logger`] trait. Two implementations ship with the crate:
//!
//! - [`StdLogger`] (default): timestamped lines, info to stdout and errors to
//!   stderr, rendered by a private `tracing-subscriber` formatter so it works
//!   whether or not the application installed a global subscriber.
//! - [`TracingLogger`]: forwards to the application's global `tracing`
//!   subscriber.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use lifeline::{Logger, StdLogger};
//!
//! let logger: Arc<dyn Logger> = Arc::new(StdLogger::new());
//! logger.info(format_args!("service {} ready", "api"));
//! ```

mod logger;
mod std_logger;

pub use logger::{Logger, TracingLogger};
pub use std_logger::StdLogger;
