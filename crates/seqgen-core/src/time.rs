//! Time sources for period gating
//!
//! A generator reads the current time once per step and compares the
//! elapsed milliseconds against its change and save periods:
//! - `TimeSource` - Anything that can report "now" in milliseconds
//! - `SystemClock` - Monotonic wall time, the default
//! - `ManualClock` - Simulated time that only moves when told to

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Milliseconds on some clock's own timeline
pub type Millis = u64;

/// A source of the current time in milliseconds
///
/// Only differences between readings matter, so the origin is up to the
/// implementation.
pub trait TimeSource: fmt::Debug + Send + Sync {
    fn now_ms(&self) -> Millis;
}

/// Monotonic clock measuring milliseconds since its own creation
#[derive(Debug, Clone, Copy)]
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

impl TimeSource for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Simulated clock for deterministic stepping
///
/// Clones share the same underlying instant, so a test can keep one
/// handle and hand another to a generator.
///
/// ```
/// use seqgen_core::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new(0);
/// let handle = clock.clone();
/// clock.advance(250);
/// assert_eq!(handle.now_ms(), 250);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at the given instant
    pub fn new(start: Millis) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, delta: Millis) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }

    /// Jump to an absolute instant (may move backwards)
    pub fn set(&self, at: Millis) {
        self.now.store(at, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}
