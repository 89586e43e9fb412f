#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lifeline::{CleanupFn, CleanupRef, Logger, TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;

pub const TICK: Duration = Duration::from_millis(200);

/// Logger that keeps every line in memory.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }
}

impl Logger for RecordingLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push((Level::Info, args.to_string()));
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push((Level::Error, args.to_string()));
    }
}

/// Long-running task: bumps `count` once per tick until the token fires.
pub fn ticker(name: &'static str, count: Arc<AtomicU32>) -> TaskRef {
    TaskFn::arc(name, move |ctx: CancellationToken| {
        let count = count.clone();
        async move {
            loop {
                if ctx.is_cancelled() {
                    return Ok::<(), TaskError>(());
                }
                count.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(TICK).await;
            }
        }
    })
}

/// Cleanup task: sleeps briefly, bumps `count`, then returns `result`.
pub fn counting_cleanup(
    name: &'static str,
    count: Arc<AtomicU32>,
    result: Result<(), TaskError>,
) -> CleanupRef {
    CleanupFn::arc(name, move || {
        let count = count.clone();
        let result = result.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            count.fetch_add(1, Ordering::SeqCst);
            result
        }
    })
}

/// Cancels `token` after `delay`.
pub fn cancel_after(token: CancellationToken, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        token.cancel();
    });
}

pub fn counter() -> Arc<AtomicU32> {
    Arc::new(AtomicU32::new(0))
}

pub fn load(count: &AtomicU32) -> u32 {
    count.load(Ordering::SeqCst)
}

/// Panics with `msg`; typed so it can end a task body.
pub fn explode(msg: &str) -> Result<(), TaskError> {
    panic!("{msg}")
}
