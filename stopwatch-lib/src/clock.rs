//! Millisecond time sources for the stopwatch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic millisecond clock.
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed since the clock's origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Clock backed by [`Instant`], with its origin at construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Deterministic clock that only moves when told to.
///
/// Meant for tests and for replaying recorded timings: elapsed values then
/// depend on [`advance`](Self::advance) calls, never on the scheduler.
/// Clones share the same reading, so a test can keep one handle and give
/// another to a [`Stopwatch`](crate::Stopwatch). Use [`SystemClock`] for
/// real timing.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to `ms`. Earlier readings are ignored to keep the clock monotonic.
    pub fn set(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
