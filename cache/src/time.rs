//! Time sources used for item expiration.
//!
//! Every expiry check reads the clock through a [`TimeSource`] handed to the
//! cache at build time, so tests can move time forward without sleeping.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The process-wide wall clock, shared by every cache that does not
/// install its own time source.
static SYSTEM_CLOCK: Lazy<Arc<dyn TimeSource>> = Lazy::new(|| Arc::new(SystemClock));

/// A source of monotonic "now" readings.
pub trait TimeSource: Send + Sync {
  fn now(&self) -> Instant;
}

/// Reads [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
  #[inline]
  fn now(&self) -> Instant {
    Instant::now()
  }
}

/// A clock that only moves when told to.
///
/// It starts at the instant it was created.
pub struct ManualClock {
  origin: Instant,
  offset_nanos: AtomicU64,
}

impl ManualClock {
  pub fn new() -> Self {
    Self {
      origin: Instant::now(),
      offset_nanos: AtomicU64::new(0),
    }
  }

  /// Moves the clock forward by `by`.
  pub fn advance(&self, by: Duration) {
    let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
    // Saturate instead of wrapping.
    let _ = self
      .offset_nanos
      .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
        Some(current.saturating_add(nanos))
      });
  }

  /// Time elapsed since the clock was created.
  pub fn elapsed(&self) -> Duration {
    Duration::from_nanos(self.offset_nanos.load(Ordering::Acquire))
  }
}

impl Default for ManualClock {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for ManualClock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ManualClock")
      .field("elapsed", &self.elapsed())
      .finish()
  }
}

impl TimeSource for ManualClock {
  fn now(&self) -> Instant {
    self.origin + self.elapsed()
  }
}

/// Returns the shared wall clock.
#[inline]
pub(crate) fn system_clock() -> Arc<dyn TimeSource> {
  Arc::clone(&SYSTEM_CLOCK)
}
