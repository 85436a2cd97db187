use crate::store::Store;

use ahash::{HashMap, HashMapExt};
use parking_lot::Mutex;
use std::hash::Hash;

/// An unbounded store that never evicts.
///
/// `keys()` comes back in hash order, which callers must not rely on.
#[derive(Debug)]
pub struct Simple<K, V> {
  items: Mutex<HashMap<K, V>>,
}

impl<K, V> Simple<K, V> {
  pub fn new() -> Self {
    Self {
      items: Mutex::new(HashMap::new()),
    }
  }
}

impl<K, V> Default for Simple<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> Store<K, V> for Simple<K, V>
where
  K: Eq + Hash + Clone + Send,
  V: Clone + Send,
{
  fn get(&self, key: &K) -> Option<V> {
    self.items.lock().get(key).cloned()
  }

  fn peek(&self, key: &K) -> Option<V> {
    self.get(key)
  }

  fn set(&self, key: K, value: V) {
    self.items.lock().insert(key, value);
  }

  fn keys(&self) -> Vec<K> {
    self.items.lock().keys().cloned().collect()
  }

  fn delete(&self, key: &K) {
    self.items.lock().remove(key);
  }

  fn len(&self) -> usize {
    self.items.lock().len()
  }

  fn capacity(&self) -> Option<usize> {
    None
  }
}
