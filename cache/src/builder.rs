use crate::error::BuildError;
use crate::handles::Cache;
use crate::item::Item;
use crate::number::{Number, NumberCache};
use crate::policy::{Clock, Fifo, Lfu, Lru, Mru, Simple};
use crate::shared::{CacheShared, ItemStore};
use crate::store::Store;
use crate::task::cancel::CancelToken;
use crate::task::janitor::Janitor;
use crate::time::{self, TimeSource};

use core::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// How often the janitor sweeps when no interval is configured.
pub const DEFAULT_JANITOR_INTERVAL: Duration = Duration::from_secs(60);

/// A builder for creating `Cache` and `NumberCache` instances.
pub struct CacheBuilder<K, V> {
  store: Option<ItemStore<K, V>>,
  janitor_interval: Duration,
  cancel_token: Option<CancelToken>,
  time_source: Option<Arc<dyn TimeSource>>,
}

// Manual Debug implementation for CacheBuilder.
impl<K, V> fmt::Debug for CacheBuilder<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("has_store", &self.store.is_some())
      .field("janitor_interval", &self.janitor_interval)
      .field("has_cancel_token", &self.cancel_token.is_some())
      .finish_non_exhaustive()
  }
}

// --- General Configuration Methods ---
// This impl block has no restrictive bounds on K or V.
impl<K, V> CacheBuilder<K, V> {
  /// Creates a new `CacheBuilder` with default settings.
  pub fn new() -> Self {
    Self {
      store: None,
      janitor_interval: DEFAULT_JANITOR_INTERVAL,
      cancel_token: None,
      time_source: None,
    }
  }

  /// Sets how often the janitor reclaims expired entries.
  ///
  /// A zero interval falls back to [`DEFAULT_JANITOR_INTERVAL`].
  pub fn janitor_interval(mut self, interval: Duration) -> Self {
    self.janitor_interval = if interval.is_zero() {
      DEFAULT_JANITOR_INTERVAL
    } else {
      interval
    };
    self
  }

  /// Binds the janitor to `token`: cancelling it stops the janitor for good.
  ///
  /// Without a token the janitor runs until the last cache handle is dropped.
  pub fn cancel_token(mut self, token: CancelToken) -> Self {
    self.cancel_token = Some(token);
    self
  }

  /// Replaces the clock used for expiration.
  /// (Primarily for testing purposes).
  #[doc(hidden)]
  pub fn time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
    self.time_source = Some(time_source);
    self
  }
}

impl<K, V> Default for CacheBuilder<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

// --- Policy Selection and Build Methods ---
impl<K, V> CacheBuilder<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  /// Uses `store` as the eviction policy.
  pub fn store<S>(mut self, store: S) -> Self
  where
    S: Store<K, Arc<Item<K, V>>> + 'static,
  {
    self.store = Some(Box::new(store));
    self
  }

  /// Unbounded, never evicts. This is the default.
  pub fn simple(self) -> Self {
    self.store(Simple::new())
  }

  /// Least recently used eviction. A capacity of zero is unbounded.
  pub fn lru(self, capacity: usize) -> Self {
    self.store(Lru::with_capacity(capacity))
  }

  /// Least frequently used eviction. A capacity of zero is unbounded.
  pub fn lfu(self, capacity: usize) -> Self {
    self.store(Lfu::with_capacity(capacity))
  }

  /// First-in, first-out eviction. A capacity of zero is unbounded.
  pub fn fifo(self, capacity: usize) -> Self {
    self.store(Fifo::with_capacity(capacity))
  }

  /// Most recently used eviction. A capacity of zero is unbounded.
  pub fn mru(self, capacity: usize) -> Self {
    self.store(Mru::with_capacity(capacity))
  }

  /// Clock (second-chance) eviction. The ring always has at least one slot.
  pub fn clock(self, capacity: usize) -> Self {
    self.store(Clock::with_capacity(capacity))
  }

  /// Builds a `Cache` and starts its janitor.
  pub fn build(self) -> Result<Cache<K, V>, BuildError> {
    let shared = self.build_shared_core()?;
    Ok(Cache { shared })
  }

  /// Builds a `NumberCache` and starts its janitor.
  pub fn build_number(self) -> Result<NumberCache<K, V>, BuildError>
  where
    V: Number,
  {
    self.build().map(NumberCache::new)
  }

  /// Central logic to construct the shared core of the cache.
  fn build_shared_core(self) -> Result<Arc<CacheShared<K, V>>, BuildError> {
    let store = self.store.unwrap_or_else(|| Box::new(Simple::new()));
    let clock = self.time_source.unwrap_or_else(time::system_clock);

    let shared = Arc::new(CacheShared::new(store, clock, self.janitor_interval));

    // The janitor gets its own child token so dropping the cache can stop
    // it without cancelling a token the caller still owns.
    let token = match &self.cancel_token {
      Some(parent) => parent.child_token(),
      None => CancelToken::new(),
    };
    let janitor = Janitor::spawn(Arc::downgrade(&shared), self.janitor_interval, token)
      .map_err(BuildError::JanitorSpawn)?;
    // A freshly built core has no janitor yet, so this cannot fail.
    let _ = shared.janitor.set(janitor);

    Ok(shared)
  }
}
