use super::order_list::OrderList;
use super::{bound, is_full, DEFAULT_CAPACITY};
use crate::store::Store;

use parking_lot::Mutex;
use std::hash::Hash;

/// A store that evicts entries in a First-In, First-Out (FIFO) manner.
///
/// Overwriting a key replaces its value in place; its position in the queue
/// stays where the first insert put it. `keys()` runs oldest to newest.
#[derive(Debug)]
pub struct Fifo<K: Eq + Hash + Clone, V> {
  list: Mutex<OrderList<K, V>>,
  capacity: Option<usize>,
}

impl<K: Eq + Hash + Clone, V> Fifo<K, V> {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Creates a FIFO store holding at most `capacity` entries.
  /// A capacity of zero makes it unbounded.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      list: Mutex::new(OrderList::new()),
      capacity: bound(capacity),
    }
  }
}

impl<K: Eq + Hash + Clone, V> Default for Fifo<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> Store<K, V> for Fifo<K, V>
where
  K: Eq + Hash + Clone + Send,
  V: Clone + Send,
{
  /// Reads do not affect FIFO order.
  fn get(&self, key: &K) -> Option<V> {
    self.list.lock().get(key).cloned()
  }

  fn peek(&self, key: &K) -> Option<V> {
    self.get(key)
  }

  fn set(&self, key: K, value: V) {
    let mut list = self.list.lock();

    if let Some(slot) = list.get_mut(&key) {
      *slot = value;
      return;
    }

    if is_full(list.len(), self.capacity) {
      // The tail is the oldest insert.
      if list.pop_back().is_some() {
        tracing::trace!("fifo evicted oldest entry");
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
