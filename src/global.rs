//! # Process-wide coordinator slot.
//!
//! Convenience for applications that prefer a global over passing an
//! `Arc<Coordinator>` around. Libraries should take the coordinator as a
//! parameter instead.
//!
//! ## Rules
//! - [`init`] builds the coordinator on its first call only; later calls
//!   ignore their builder and return the same instance.
//! - [`get`] before [`init`] is a programmer error and panics.
//!
//! ## Example
//! ```rust
//! use lifeline::{Config, Coordinator, global};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), lifeline::RuntimeError> {
//!     let first = global::init(Coordinator::builder(Config::without_signals()))?;
//!     let again = global::init(Coordinator::builder(Config::default()))?;
//!     assert!(std::sync::Arc::ptr_eq(&first, &again));
//!     assert!(std::sync::Arc::ptr_eq(&first, &global::get()));
//!     Ok(())
//! }
//! ```

use std::sync::{Arc, RwLock};

use crate::core::{Coordinator, CoordinatorBuilder};
use crate::error::RuntimeError;

static SLOT: RwLock<Option<Arc<Coordinator>>> = RwLock::new(None);

/// Builds the process-wide coordinator on first call; returns it afterwards.
pub fn init(builder: CoordinatorBuilder) -> Result<Arc<Coordinator>, RuntimeError> {
    let mut slot = SLOT.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(existing) = slot.as_ref() {
        return Ok(Arc::clone(existing));
    }

    let coordinator = builder.build()?;
    *slot = Some(Arc::clone(&coordinator));
    Ok(coordinator)
}

/// Returns the process-wide coordinator.
///
/// # Panics
/// Panics if [`init`] has not been called yet.
pub fn get() -> Arc<Coordinator> {
    try_get().expect("coordinator is not initialized; call lifeline::global::init first")
}

/// Returns the process-wide coordinator, or `None` before [`init`].
pub fn try_get() -> Option<Arc<Coordinator>> {
    SLOT.read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .as_ref()
        .map(Arc::clone)
}

/// Clears the slot so the next [`init`] builds a fresh coordinator.
#[cfg(test)]
pub(crate) fn reset() {
    *SLOT.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    static SERIAL: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    #[tokio::test]
    async fn test_get_before_init_panics() {
        let _serial = SERIAL.lock().await;
        reset();

        let res = std::panic::catch_unwind(get);
        assert!(res.is_err());
        assert!(try_get().is_none());
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let _serial = SERIAL.lock().await;
        reset();

        let first = init(Coordinator::builder(Config::without_signals())).unwrap();
        let second = init(Coordinator::builder(Config::default())).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &get()));
        assert!(!second.config().handle_signals);
        reset();
    }
}
