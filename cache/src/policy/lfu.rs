use super::order_list::OrderList;
use super::{bound, is_full, DEFAULT_CAPACITY};
use crate::store::Store;

use ahash::{HashMap, HashMapExt};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Frequency a key starts with when first inserted.
const INITIAL_FREQUENCY: u64 = 1;

#[derive(Debug)]
struct LfuEntry<V> {
  value: V,
  frequency: u64,
}

#[derive(Debug)]
struct LfuState<K: Eq + Hash + Clone, V> {
  entries: HashMap<K, LfuEntry<V>>,
  // One queue per frequency. Inside a queue the tail is the key that
  // reached this frequency first.
  buckets: BTreeMap<u64, OrderList<K, ()>>,
}

impl<K: Eq + Hash + Clone, V> LfuState<K, V> {
  fn new() -> Self {
    Self {
      entries: HashMap::new(),
      buckets: BTreeMap::new(),
    }
  }

  fn unlink(&mut self, key: &K, frequency: u64) {
    if let Some(bucket) = self.buckets.get_mut(&frequency) {
      bucket.remove(key);
      if bucket.is_empty() {
        self.buckets.remove(&frequency);
      }
    }
  }

  fn link(&mut self, key: K, frequency: u64) {
    self
      .buckets
      .entry(frequency)
      .or_insert_with(OrderList::new)
      .push_front(key, ());
  }

  /// Bumps a key's frequency, moving it to the newest end of the next bucket.
  fn touch(&mut self, key: &K) -> Option<&V> {
    let old = self.entries.get(key)?.frequency;
    let new = old.saturating_add(1);
    self.unlink(key, old);
    self.link(key.clone(), new);

    let entry = self.entries.get_mut(key)?;
    entry.frequency = new;
    Some(&entry.value)
  }

  /// Removes the oldest key of the lowest frequency.
  fn evict(&mut self) -> Option<K> {
    let mut lowest = self.buckets.first_entry()?;
    let victim = lowest.get_mut().pop_back().map(|(key, _)| key);
    if lowest.get().is_empty() {
      lowest.remove();
    }

    let key = victim?;
    self.entries.remove(&key);
    Some(key)
  }
}

/// A store that evicts the least frequently used entry.
///
/// Keys start at frequency 1 and every `get` hit adds one. Overwriting a key
/// replaces its value and keeps its frequency. Among keys sharing the lowest
/// frequency, the one that reached it first is evicted.
///
/// `keys()` runs in ascending frequency, ties in that same arrival order.
#[derive(Debug)]
pub struct Lfu<K: Eq + Hash + Clone, V> {
  state: Mutex<LfuState<K, V>>,
  capacity: Option<usize>,
}

impl<K: Eq + Hash + Clone, V> Lfu<K, V> {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Creates an LFU store holding at most `capacity` entries.
  /// A capacity of zero makes it unbounded.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      state: Mutex::new(LfuState::new()),
      capacity: bound(capacity),
    }
  }

  /// Returns the access frequency recorded for `key`.
  pub fn frequency(&self, key: &K) -> Option<u64> {
    self.state.lock().entries.get(key).map(|e| e.frequency)
  }
}

impl<K: Eq + Hash + Clone, V> Default for Lfu<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> Store<K, V> for Lfu<K, V>
where
  K: Eq + Hash + Clone + Send,
  V: Clone + Send,
{
  fn get(&self, key: &K) -> Option<V> {
    self.state.lock().touch(key).cloned()
  }

  fn peek(&self, key: &K) -> Option<V> {
    self.state.lock().entries.get(key).map(|e| e.value.clone())
  }

  fn set(&self, key: K, value: V) {
    let mut state = self.state.lock();

    if let Some(entry) = state.entries.get_mut(&key) {
      entry.value = value;
      return;
    }

    if is_full(state.entries.len(), self.capacity) && state.evict().is_some() {
      tracing::trace!("lfu evicted least frequently used entry");
    }

    state.link(key.clone(), INITIAL_FREQUENCY);
    state.entries.insert(
      key,
      LfuEntry {
        value,
        frequency: INITIAL_FREQUENCY,
      },
    );
  }

  fn keys(&self) -> Vec<K> {
    let state = self.state.lock();
    let mut keys = Vec::with_capacity(state.entries.len());
    for bucket in state.buckets.values() {
      keys.extend(bucket.keys_from_tail());
    }
    keys
  }

  fn delete(&self, key: &K) {
    let mut state = self.state.lock();
    if let Some(entry) = state.entries.remove(key) {
      state.unlink(key, entry.frequency);
    }
  }

  fn len(&self) -> usize {
    self.state.lock().entries.len()
  }

  fn capacity(&self) -> Option<usize> {
    self.capacity
  }
}
