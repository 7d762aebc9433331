//! Time sources for id generation
//!
//! Generators read nanosecond wall-clock time through [`Clock`] so tests can
//! drive regression, expiry and rollover deterministically.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;

/// A nanosecond wall clock that can also put the caller to sleep
pub trait Clock: Send + Sync {
    /// Current wall-clock time in nanoseconds since the Unix epoch
    fn now_nanos(&self) -> i64;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline(always)]
    fn now_nanos(&self) -> i64 {
        // Saturates past 2262
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}

/// Manually advanced clock. Clones share the same time.
///
/// `sleep` does not block; it moves the shared time forward instead.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_nanos: i64) -> Self {
        Self {
            nanos: Arc::new(AtomicI64::new(start_nanos)),
        }
    }

    pub fn set(&self, nanos: i64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, duration: Duration) {
        self.nanos
            .fetch_add(duration_nanos(duration), Ordering::SeqCst);
    }

    pub fn rewind(&self, duration: Duration) {
        self.nanos
            .fetch_sub(duration_nanos(duration), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.nanos.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Duration as signed nanoseconds, saturating at i64::MAX
#[inline(always)]
pub(crate) fn duration_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}
