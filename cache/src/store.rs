/// The key-value contract every eviction policy implements.
///
/// All methods take `&self`: a policy keeps its bookkeeping behind its own
/// lock, so a touching read (`get`) can run while the owning cache only
/// holds its shared lock. No method fails; absence is reported as `None`.
///
/// The order returned by [`Store::keys`] is policy-defined and lists the
/// next eviction candidate first.
pub trait Store<K, V>: Send + Sync {
  /// Looks up a key, recording the access in the policy's bookkeeping.
  fn get(&self, key: &K) -> Option<V>;

  /// Looks up a key without touching recency, frequency or use bits.
  fn peek(&self, key: &K) -> Option<V>;

  /// Inserts or replaces a value, evicting one entry if the policy is full.
  fn set(&self, key: K, value: V);

  /// Returns every stored key, without duplicates, in eviction order.
  fn keys(&self) -> Vec<K>;

  /// Removes a key. Removing an absent key is a no-op.
  fn delete(&self, key: &K);

  /// Returns the number of stored entries.
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the maximum number of entries, or `None` when unbounded.
  fn capacity(&self) -> Option<usize>;
}
