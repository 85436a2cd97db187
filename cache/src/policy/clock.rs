use super::DEFAULT_CAPACITY;
use crate::store::Store;

use ahash::{HashMap, HashMapExt};
use parking_lot::Mutex;
use std::hash::Hash;

/// An occupied slot on the clock face.
#[derive(Debug)]
struct ClockSlot<K, V> {
  key: K,
  value: V,
  referenced: bool,
}

#[derive(Debug)]
struct ClockState<K, V> {
  // The circular "clock face". Its length never changes.
  slots: Vec<Option<ClockSlot<K, V>>>,
  index: HashMap<K, usize>,
  // Empty slots, popped lowest index first.
  free: Vec<usize>,
  // The next eviction candidate.
  hand: usize,
}

impl<K: Eq + Hash + Clone, V> ClockState<K, V> {
  fn new(capacity: usize) -> Self {
    Self {
      slots: (0..capacity).map(|_| None).collect(),
      index: HashMap::with_capacity(capacity),
      free: (0..capacity).rev().collect(),
      hand: 0,
    }
  }

  fn advance(&mut self) -> usize {
    let current = self.hand;
    self.hand = (self.hand + 1) % self.slots.len();
    current
  }

  fn occupy(&mut self, position: usize, key: K, value: V) -> Option<ClockSlot<K, V>> {
    self.index.insert(key.clone(), position);
    self.slots[position].replace(ClockSlot {
      key,
      value,
      referenced: false,
    })
  }

  /// Sweeps the hand until it finds a slot without its use bit, clearing
  /// bits on the way, and puts the new entry there.
  fn sweep_and_insert(&mut self, key: K, value: V) {
    loop {
      let position = self.advance();
      if let Some(slot) = self.slots[position].as_mut() {
        if slot.referenced {
          slot.referenced = false;
          continue;
        }
      }

      if let Some(victim) = self.occupy(position, key, value) {
        self.index.remove(&victim.key);
        tracing::trace!(slot = position, "clock evicted entry");
      }
      return;
    }
  }
}

/// A store based on the Clock (second-chance) algorithm, an approximation
/// of LRU.
///
/// Entries live in a fixed ring of slots with one use bit each. New entries
/// start with the bit clear; `get` hits and overwrites set it. A new key
/// takes a free slot when there is one. Otherwise the hand sweeps the ring,
/// clearing set bits, and replaces the first entry whose bit is already
/// clear.
///
/// `keys()` lists occupied slots in ring order starting at the hand.
#[derive(Debug)]
pub struct Clock<K, V> {
  state: Mutex<ClockState<K, V>>,
  capacity: usize,
}

impl<K: Eq + Hash + Clone, V> Clock<K, V> {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Creates a clock with `capacity` slots. The ring needs at least one
  /// slot, so zero is raised to one.
  pub fn with_capacity(capacity: usize) -> Self {
    let capacity = capacity.max(1);
    Self {
      state: Mutex::new(ClockState::new(capacity)),
      capacity,
    }
  }
}

impl<K: Eq + Hash + Clone, V> Default for Clock<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> Store<K, V> for Clock<K, V>
where
  K: Eq + Hash + Clone + Send,
  V: Clone + Send,
{
  fn get(&self, key: &K) -> Option<V> {
    let mut state = self.state.lock();
    let position = *state.index.get(key)?;
    let slot = state.slots[position].as_mut()?;
    slot.referenced = true;
    Some(slot.value.clone())
  }

  fn peek(&self, key: &K) -> Option<V> {
    let state = self.state.lock();
    let position = *state.index.get(key)?;
    state.slots[position].as_ref().map(|slot| slot.value.clone())
  }

  fn set(&self, key: K, value: V) {
    let mut state = self.state.lock();

    if let Some(&position) = state.index.get(&key) {
      if let Some(slot) = state.slots[position].as_mut() {
        slot.value = value;
        slot.referenced = true;
        return;
      }
    }

    match state.free.pop() {
      Some(position) => {
        state.occupy(position, key, value);
      }
      None => state.sweep_and_insert(key, value),
    }
  }

  fn keys(&self) -> Vec<K> {
    let state = self.state.lock();
    let len = state.slots.len();
    (0..len)
      .filter_map(|offset| state.slots[(state.hand + offset) % len].as_ref())
      .map(|slot| slot.key.clone())
      .collect()
  }

  fn delete(&self, key: &K) {
    let mut state = self.state.lock();
    if let Some(position) = state.index.remove(key) {
      state.slots[position] = None;
      state.free.push(position);
    }
  }

  fn len(&self) -> usize {
    self.state.lock().index.len()
  }

  fn capacity(&self) -> Option<usize> {
    Some(self.capacity)
  }
}
