use crate::time::TimeSource;

use std::time::{Duration, Instant};

/// A stored value together with its optional expiration deadline.
///
/// Items are built fresh on every `set` and never change afterwards; an
/// overwrite replaces the whole item.
#[derive(Debug, Clone)]
pub struct Item<K, V> {
  key: K,
  value: V,
  /// Absolute deadline. `None` means the item never expires.
  expiration: Option<Instant>,
}

impl<K, V> Item<K, V> {
  /// Creates an item whose deadline is `ttl` after the clock's current time.
  ///
  /// A missing or zero `ttl` means "no expiration", not "already expired".
  pub(crate) fn new(key: K, value: V, ttl: Option<Duration>, clock: &dyn TimeSource) -> Self {
    let expiration = ttl
      .filter(|ttl| !ttl.is_zero())
      .and_then(|ttl| clock.now().checked_add(ttl));

    Self {
      key,
      value,
      expiration,
    }
  }

  #[inline]
  pub fn key(&self) -> &K {
    &self.key
  }

  #[inline]
  pub fn value(&self) -> &V {
    &self.value
  }

  #[inline]
  pub fn expiration(&self) -> Option<Instant> {
    self.expiration
  }

  /// Returns `true` if a deadline is set and the clock is strictly past it.
  #[inline]
  pub fn is_expired(&self, clock: &dyn TimeSource) -> bool {
    match self.expiration {
      Some(deadline) => clock.now() > deadline,
      None => false,
    }
  }
}
