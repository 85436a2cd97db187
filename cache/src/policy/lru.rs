use super::order_list::OrderList;
use super::{bound, is_full, DEFAULT_CAPACITY};
use crate::store::Store;

use parking_lot::Mutex;
use std::hash::Hash;

/// A store that evicts the least recently used entry.
///
/// Both `get` hits and `set` move a key to the most recent end.
/// `keys()` runs from least to most recently used.
#[derive(Debug)]
pub struct Lru<K: Eq + Hash + Clone, V> {
  // Head is the most recently used entry, tail the least.
  list: Mutex<OrderList<K, V>>,
  capacity: Option<usize>,
}

impl<K: Eq + Hash + Clone, V> Lru<K, V> {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Creates an LRU store holding at most `capacity` entries.
  /// A capacity of zero makes it unbounded.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      list: Mutex::new(OrderList::new()),
      capacity: bound(capacity),
    }
  }
}

impl<K: Eq + Hash + Clone, V> Default for Lru<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> Store<K, V> for Lru<K, V>
where
  K: Eq + Hash + Clone + Send,
  V: Clone + Send,
{
  fn get(&self, key: &K) -> Option<V> {
    let mut list = self.list.lock();
    if !list.move_to_front(key) {
      return None;
    }
    list.get(key).cloned()
  }

  fn peek(&self, key: &K) -> Option<V> {
    self.list.lock().get(key).cloned()
  }

  fn set(&self, key: K, value: V) {
    let mut list = self.list.lock();

    if !list.contains(&key) && is_full(list.len(), self.capacity) {
      if list.pop_back().is_some() {
        tracing::trace!("lru evicted least recently used entry");
      }
    }
    list.push_front(key, value);
  }

  fn keys(&self) -> Vec<K> {
    self.list.lock().keys_from_tail()
  }

  fn delete(&self, key: &K) {
    self.list.lock().remove(key);
  }

  fn len(&self) -> usize {
    self.list.lock().len()
  }

  fn capacity(&self) -> Option<usize> {
    self.capacity
  }
}
