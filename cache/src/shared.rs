use crate::item::Item;
use crate::store::Store;
use crate::task::janitor::Janitor;
use crate::time::TimeSource;

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use ahash::{HashMap, HashMapExt, RandomState};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

/// The policy store as seen by the cache: items behind shared pointers.
pub(crate) type ItemStore<K, V> = Box<dyn Store<K, Arc<Item<K, V>>>>;

/// The internal, thread-safe core of the cache.
///
/// One reader/writer lock guards the whole store. Reads (`get`, `keys`,
/// `list`, `contains`, `len`) share it; writes (`set`, `delete`, `flush`
/// and each per-key step of `delete_expired`) hold it exclusively.
pub(crate) struct CacheShared<K, V> {
  pub(crate) store: RwLock<ItemStore<K, V>>,
  pub(crate) clock: Arc<dyn TimeSource>,
  pub(crate) janitor: OnceCell<Janitor>,
  pub(crate) janitor_interval: Duration,
}

impl<K, V> fmt::Debug for CacheShared<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let store = self.store.read();
    f.debug_struct("CacheShared")
      .field("len", &store.len())
      .field("capacity", &store.capacity())
      .field("janitor_interval", &self.janitor_interval)
      .finish_non_exhaustive()
  }
}

impl<K, V> Drop for CacheShared<K, V> {
  fn drop(&mut self) {
    if let Some(janitor) = self.janitor.get() {
      janitor.stop();
    }
  }
}

impl<K, V> CacheShared<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  pub(crate) fn new(store: ItemStore<K, V>, clock: Arc<dyn TimeSource>, janitor_interval: Duration) -> Self {
    Self {
      store: RwLock::new(store),
      clock,
      janitor: OnceCell::new(),
      janitor_interval,
    }
  }

  pub(crate) fn get(&self, key: &K) -> Option<V> {
    let store = self.store.read();
    let item = store.get(key)?;

    // Expired items read as absent but stay in the store; reclaiming them
    // is left to `delete_expired`.
    if item.is_expired(self.clock.as_ref()) {
      return None;
    }
    Some(item.value().clone())
  }

  pub(crate) fn set(&self, key: K, value: V, ttl: Option<Duration>) {
    let item = Arc::new(Item::new(key.clone(), value, ttl, self.clock.as_ref()));
    self.store.write().set(key, item);
  }

  pub(crate) fn delete(&self, key: &K) {
    self.store.write().delete(key);
  }

  pub(crate) fn keys(&self) -> Vec<K> {
    self.store.read().keys()
  }

  pub(crate) fn list(&self) -> std::collections::HashMap<K, V, RandomState> {
    let store = self.store.read();
    let keys = store.keys();
    let mut items = HashMap::with_capacity(keys.len());
    for key in keys {
      if let Some(item) = store.peek(&key) {
        items.insert(key, item.value().clone());
      }
    }
    items
  }

  pub(crate) fn flush(&self) {
    let store = self.store.write();
    for key in store.keys() {
      store.delete(&key);
    }
  }

  pub(crate) fn contains(&self, key: &K) -> bool {
    self.store.read().peek(key).is_some()
  }

  pub(crate) fn len(&self) -> usize {
    self.store.read().len()
  }

  /// Removes every entry that is expired at the moment it is examined.
  ///
  /// The key list is a snapshot taken under the shared lock. Each key is
  /// then re-read and, if still present and expired, deleted under its own
  /// exclusive acquisition, so the lock is never held for the whole sweep.
  pub(crate) fn delete_expired(&self) -> usize {
    let keys = self.store.read().keys();
    let mut reclaimed = 0;

    for key in keys {
      let store = self.store.write();
      let expired = store
        .peek(&key)
        .map_or(false, |item| item.is_expired(self.clock.as_ref()));
      if expired {
        store.delete(&key);
        reclaimed += 1;
      }
    }

    reclaimed
  }

  pub(crate) fn janitor_running(&self) -> bool {
    self.janitor.get().map_or(false, Janitor::is_running)
  }
}
