//! Runtime core: coordination and lifecycle.
//!
//! Internal modules:
//! - [`coordinator`]: owns the tokens, failure list, and shutdown sequencing;
//! - [`builder`]: resolves parent token and logger, starts the signal bridge;
//! - [`config`]: plain coordinator settings;
//! - [`group`]: join primitive for in-flight tasks;
//! - [`signals`]: OS signal / parent-token bridge to `shutdown()`.

mod builder;
mod config;
mod coordinator;
mod group;
mod signals;

pub use builder::CoordinatorBuilder;
pub use config::Config;
pub use coordinator::{Coordinator, Phase};
pub use group::TaskGroup;
pub use signals::OsSignal;
