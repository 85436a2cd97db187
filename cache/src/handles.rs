use crate::builder::CacheBuilder;
use crate::shared::CacheShared;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use ahash::RandomState;

/// A thread-safe cache over one eviction policy.
///
/// `Cache` is a handle: clones share the same store and janitor. The
/// janitor stops when its cancel token fires or when the last handle is
/// dropped.
#[derive(Debug)]
pub struct Cache<K, V> {
  pub(crate) shared: Arc<CacheShared<K, V>>,
}

impl<K, V> Clone for Cache<K, V> {
  fn clone(&self) -> Self {
    Self {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<K, V> Cache<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  /// Returns a builder for a cache. Defaults to the [`Simple`](crate::policy::Simple)
  /// policy and a one minute janitor interval.
  pub fn builder() -> CacheBuilder<K, V> {
    CacheBuilder::new()
  }

  /// Looks up a key's value.
  ///
  /// Counts as an access for the policy. An expired item reads as absent
  /// but is left in place for the janitor to reclaim.
  pub fn get(&self, key: &K) -> Option<V> {
    self.shared.get(key)
  }

  /// Sets a value without expiration, replacing any existing value.
  pub fn set(&self, key: K, value: V) {
    self.shared.set(key, value, None);
  }

  /// Sets a value that expires `ttl` from now, replacing any existing value.
  ///
  /// A zero `ttl` means the value never expires.
  pub fn set_with_expiration(&self, key: K, value: V, ttl: Duration) {
    self.shared.set(key, value, Some(ttl));
  }

  /// Deletes a key. Deleting an absent key does nothing.
  pub fn delete(&self, key: &K) {
    self.shared.delete(key);
  }

  /// Returns the stored keys in the policy's eviction order, next victim
  /// first. Expired entries not yet reclaimed are included.
  pub fn keys(&self) -> Vec<K> {
    self.shared.keys()
  }

  /// Returns a snapshot of every stored key and value.
  ///
  /// Like [`keys`](Self::keys), this includes expired entries that have not
  /// been reclaimed yet. Listing does not count as an access. The map is
  /// hashed with [`RandomState`](crate::RandomState).
  pub fn list(&self) -> HashMap<K, V, RandomState> {
    self.shared.list()
  }

  /// Deletes every entry.
  pub fn flush(&self) {
    self.shared.flush();
  }

  /// Reports whether the store holds `key`.
  ///
  /// Unlike [`get`](Self::get) this does not look at expiration: an expired
  /// entry that has not been reclaimed yet is still reported as present.
  /// It does not count as an access.
  pub fn contains(&self, key: &K) -> bool {
    self.shared.contains(key)
  }

  /// Number of stored entries, including expired ones not yet reclaimed.
  pub fn len(&self) -> usize {
    self.shared.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Deletes every expired entry now instead of waiting for the janitor.
  /// Returns how many entries were removed.
  pub fn delete_expired(&self) -> usize {
    self.shared.delete_expired()
  }

  /// Returns `false` once the janitor thread has exited.
  pub fn janitor_running(&self) -> bool {
    self.shared.janitor_running()
  }
}
