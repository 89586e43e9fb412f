//! # Signal bridge: OS signals and parent cancellation → one shutdown trigger.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal) → shutdown
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes) → shutdown
//! - `SIGTSTP` (Ctrl-Z, pause request) → logged, keeps listening
//!
//! **Other platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`] → shutdown
//!
//! ## State machine
//! ```text
//! Listening ──(interrupt | terminate | parent cancelled)──► shutdown() ──► Listening
//! Listening ──(pause)──► log ──► Listening
//! Listening ──(done)──► exit
//! ```
//!
//! Triggers arriving after shutdown started are still logged, marked as
//! already in progress; `shutdown()` ignores them.
//!
//! Unix listeners are installed synchronously in [`SignalBridge::install`], so
//! a signal raised right after the coordinator is built is already observed.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::{Config, Coordinator};

/// Operating-system notification observed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsSignal {
    /// Interrupt (`SIGINT`, Ctrl-C).
    Interrupt,
    /// Terminate (`SIGTERM`).
    Terminate,
    /// Pause request (`SIGTSTP`, Ctrl-Z).
    Pause,
}

impl OsSignal {
    /// Returns `true` for signals that start the shutdown sequence.
    pub fn triggers_shutdown(&self) -> bool {
        matches!(self, OsSignal::Interrupt | OsSignal::Terminate)
    }
}

impl fmt::Display for OsSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsSignal::Interrupt => f.write_str("SIGINT"),
            OsSignal::Terminate => f.write_str("SIGTERM"),
            OsSignal::Pause => f.write_str("SIGTSTP"),
        }
    }
}

/// Owns the OS listeners and drives the listening loop.
pub(crate) struct SignalBridge {
    listeners: Listeners,
}

impl SignalBridge {
    /// Installs the listeners requested by `cfg`.
    ///
    /// Requires an entered runtime context.
    pub(crate) fn install(cfg: &Config) -> std::io::Result<Self> {
        Ok(Self {
            listeners: Listeners::install(cfg)?,
        })
    }

    /// Listens until the coordinator is done.
    ///
    /// ### Flow
    /// 1. Parent token cancelled (observed once) → `shutdown()`
    /// 2. Done token cancelled → exit
    /// 3. Interrupt/terminate → `shutdown()`
    /// 4. Pause → log
    pub(crate) async fn listen(mut self, coordinator: Arc<Coordinator>, parent: CancellationToken) {
        let done = coordinator.done_token();
        let pid = std::process::id();
        let mut parent_seen = false;

        loop {
            tokio::select! {
                biased;
                _ = parent.cancelled(), if !parent_seen => {
                    parent_seen = true;
                    request_shutdown(&coordinator, "context done signal", pid);
                }
                _ = done.cancelled() => return,
                sig = self.listeners.recv() => match sig {
                    Some(sig) if sig.triggers_shutdown() => {
                        request_shutdown(&coordinator, sig, pid);
                    }
                    Some(sig) => {
                        coordinator.logger().info(format_args!(
                            "received {sig} for process {pid}, ignoring"
                        ));
                    }
                    // Signal driver is gone; keep watching the tokens.
                    None => {
                        self.listeners = Listeners::none();
                    }
                },
            }
        }
    }
}

/// Logs the trigger, then starts shutdown if nothing else did yet.
fn request_shutdown(coordinator: &Coordinator, source: impl fmt::Display, pid: u32) {
    if coordinator.is_shutting_down() {
        coordinator.logger().info(format_args!(
            "received {source} for process {pid}, shutdown already in progress"
        ));
        return;
    }
    coordinator.logger().info(format_args!(
        "received {source} for process {pid}, shutting down"
    ));
    coordinator.shutdown();
}

#[cfg(unix)]
struct Listeners {
    interrupt: Option<tokio::signal::unix::Signal>,
    terminate: Option<tokio::signal::unix::Signal>,
    pause: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl Listeners {
    fn install(cfg: &Config) -> std::io::Result<Self> {
        use nix::sys::signal::Signal;
        use tokio::signal::unix::{SignalKind, signal};

        if !cfg.handle_signals {
            return Ok(Self::none());
        }
        let pause = if cfg.listens_for_pause() {
            Some(signal(SignalKind::from_raw(Signal::SIGTSTP as i32))?)
        } else {
            None
        };

        Ok(Self {
            interrupt: Some(signal(SignalKind::interrupt())?),
            terminate: Some(signal(SignalKind::terminate())?),
            pause,
        })
    }

    fn none() -> Self {
        Self {
            interrupt: None,
            terminate: None,
            pause: None,
        }
    }

    async fn recv(&mut self) -> Option<OsSignal> {
        async fn next(sig: &mut Option<tokio::signal::unix::Signal>) -> Option<()> {
            match sig {
                Some(s) => s.recv().await,
                None => std::future::pending().await,
            }
        }

        tokio::select! {
            Some(()) = next(&mut self.interrupt) => Some(OsSignal::Interrupt),
            Some(()) = next(&mut self.terminate) => Some(OsSignal::Terminate),
            Some(()) = next(&mut self.pause) => Some(OsSignal::Pause),
            else => None,
        }
    }
}

#[cfg(not(unix))]
struct Listeners {
    enabled: bool,
}

#[cfg(not(unix))]
impl Listeners {
    fn install(cfg: &Config) -> std::io::Result<Self> {
        Ok(Self {
            enabled: cfg.handle_signals,
        })
    }

    fn none() -> Self {
        Self { enabled: false }
    }

    async fn recv(&mut self) -> Option<OsSignal> {
        if !self.enabled {
            return std::future::pending().await;
        }
        match tokio::signal::ctrl_c().await {
            Ok(()) => Some(OsSignal::Interrupt),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_interrupt_and_terminate_trigger_shutdown() {
        assert!(OsSignal::Interrupt.triggers_shutdown());
        assert!(OsSignal::Terminate.triggers_shutdown());
        assert!(!OsSignal::Pause.triggers_shutdown());
    }

    #[test]
    fn test_display_uses_posix_names() {
        assert_eq!(OsSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(OsSignal::Terminate.to_string(), "SIGTERM");
        assert_eq!(OsSignal::Pause.to_string(), "SIGTSTP");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_disabled_listeners_never_fire() {
        let mut listeners = Listeners::install(&Config::without_signals()).unwrap();
        let res =
            tokio::time::timeout(std::time::Duration::from_millis(50), listeners.recv()).await;
        assert!(res.is_err());
    }
}
