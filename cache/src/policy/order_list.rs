use std::hash::Hash;

use ahash::{HashMap, HashMapExt};
use generational_arena::{Arena, Index};

#[derive(Debug)]
pub(super) struct Node<K, T> {
  pub(crate) key: K,
  pub(crate) value: T,
  pub(crate) next: Option<Index>,
  pub(crate) prev: Option<Index>,
}

// An ordered, keyed list backed by an arena.
// Nodes link to each other by arena index, so there is no shared ownership
// between neighbours and every operation except iteration is O(1).
#[derive(Debug)]
pub(super) struct OrderList<K: Eq + Hash + Clone, T> {
  // Arena stores all nodes contiguously.
  pub(crate) nodes: Arena<Node<K, T>>,
  // Key to node index in the arena.
  pub(crate) lookup: HashMap<K, Index>,
  // Head is the newest / most recently touched node.
  pub(crate) head: Option<Index>,
  // Tail is the oldest / least recently touched node.
  pub(crate) tail: Option<Index>,
}

impl<K: Eq + Hash + Clone, T> OrderList<K, T> {
  pub fn new() -> Self {
    Self {
      nodes: Arena::new(),
      lookup: HashMap::new(),
      head: None,
      tail: None,
    }
  }

  // Detaches a node from its neighbours. The node stays in the arena.
  fn unlink(&mut self, index: Index) {
    let node = &self.nodes[index];
    let prev_node_idx = node.prev;
    let next_node_idx = node.next;

    if let Some(prev_idx) = prev_node_idx {
      self.nodes[prev_idx].next = next_node_idx;
    } else {
      self.head = next_node_idx;
    }

    if let Some(next_idx) = next_node_idx {
      self.nodes[next_idx].prev = prev_node_idx;
    } else {
      self.tail = prev_node_idx;
    }
  }

  // Links an arena node in as the new head.
  fn push_front_node(&mut self, index: Index) {
    let old_head_idx = self.head;
    self.nodes[index].next = old_head_idx;
    self.nodes[index].prev = None;
    self.head = Some(index);

    if let Some(old_head) = old_head_idx {
      self.nodes[old_head].prev = Some(index);
    }

    if self.tail.is_none() {
      self.tail = Some(index);
    }
  }

  pub fn len(&self) -> usize {
    self.lookup.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lookup.is_empty()
  }

  pub fn contains(&self, key: &K) -> bool {
    self.lookup.contains_key(key)
  }

  pub fn get(&self, key: &K) -> Option<&T> {
    let index = *self.lookup.get(key)?;
    self.nodes.get(index).map(|node| &node.value)
  }

  pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
    let index = *self.lookup.get(key)?;
    self.nodes.get_mut(index).map(|node| &mut node.value)
  }

  /// Inserts `key` at the head, or replaces its value and moves it there.
  /// Returns the replaced value.
  pub fn push_front(&mut self, key: K, value: T) -> Option<T> {
    if let Some(&index) = self.lookup.get(&key) {
      let old = std::mem::replace(&mut self.nodes[index].value, value);
      self.move_to_front(&key);
      Some(old)
    } else {
      let index = self.nodes.insert(Node {
        key: key.clone(),
        value,
        next: None,
        prev: None,
      });
      self.lookup.insert(key, index);
      self.push_front_node(index);
      None
    }
  }

  /// Moves an existing key to the head. Returns `false` if it is absent.
  pub fn move_to_front(&mut self, key: &K) -> bool {
    match self.lookup.get(key) {
      Some(&index) => {
        if self.head != Some(index) {
          self.unlink(index);
          self.push_front_node(index);
        }
        true
      }
      None => false,
    }
  }

  pub fn pop_back(&mut self) -> Option<(K, T)> {
    let tail_index = self.tail?;
    self.remove_index(tail_index)
  }

  pub fn pop_front(&mut self) -> Option<(K, T)> {
    let head_index = self.head?;
    self.remove_index(head_index)
  }

  pub fn remove(&mut self, key: &K) -> Option<T> {
    let index = *self.lookup.get(key)?;
    self.remove_index(index).map(|(_, value)| value)
  }

  fn remove_index(&mut self, index: Index) -> Option<(K, T)> {
    self.unlink(index);
    let node = self.nodes.remove(index)?;
    self.lookup.remove(&node.key);
    Some((node.key, node.value))
  }

  /// Keys from the tail (oldest) to the head (newest).
  pub fn keys_from_tail(&self) -> Vec<K> {
    let mut keys = Vec::with_capacity(self.len());
    let mut current = self.tail;
    while let Some(index) = current {
      keys.push(self.nodes[index].key.clone());
      current = self.nodes[index].prev;
    }
    keys
  }

  /// Keys from the head (newest) to the tail (oldest).
  pub fn keys_from_head(&self) -> Vec<K> {
    let mut keys = Vec::with_capacity(self.len());
    let mut current = self.head;
    while let Some(index) = current {
      keys.push(self.nodes[index].key.clone());
      current = self.nodes[index].next;
    }
    keys
  }
}
