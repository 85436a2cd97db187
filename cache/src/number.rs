use crate::handles::Cache;

use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::Mutex;

/// Numeric values a [`NumberCache`] can increment and decrement.
///
/// `Default` must be zero. Integer arithmetic wraps on overflow so the
/// operations never panic; floats follow IEEE rules.
pub trait Number: Copy + Default + Send + Sync + 'static {
  fn plus(self, rhs: Self) -> Self;
  fn minus(self, rhs: Self) -> Self;
}

macro_rules! impl_number_int {
  ($($t:ty),* $(,)?) => {
    $(
      impl Number for $t {
        #[inline]
        fn plus(self, rhs: Self) -> Self {
          self.wrapping_add(rhs)
        }

        #[inline]
        fn minus(self, rhs: Self) -> Self {
          self.wrapping_sub(rhs)
        }
      }
    )*
  };
}

macro_rules! impl_number_float {
  ($($t:ty),* $(,)?) => {
    $(
      impl Number for $t {
        #[inline]
        fn plus(self, rhs: Self) -> Self {
          self + rhs
        }

        #[inline]
        fn minus(self, rhs: Self) -> Self {
          self - rhs
        }
      }
    )*
  };
}

impl_number_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_number_float!(f32, f64);

/// A cache of numbers with read-modify-write helpers.
///
/// Derefs to [`Cache`] for the plain API. `increment` and `decrement` are
/// serialized against each other by a lock of their own; they are not
/// serialized against plain `set`/`delete` calls made at the same time.
pub struct NumberCache<K, V> {
  cache: Cache<K, V>,
  // Guards the get-then-set sequence. Lock order is this one first, then
  // the cache's own lock, never the reverse.
  numeric: Arc<Mutex<()>>,
}

impl<K, V> NumberCache<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Number,
{
  pub(crate) fn new(cache: Cache<K, V>) -> Self {
    Self {
      cache,
      numeric: Arc::new(Mutex::new(())),
    }
  }

  /// Adds `n` to the value at `key` and returns the result.
  ///
  /// A missing or expired value counts as zero. The result is stored
  /// without expiration.
  pub fn increment(&self, key: K, n: V) -> V {
    self.update(key, |current| current.plus(n))
  }

  /// Subtracts `n` from the value at `key` and returns the result.
  ///
  /// A missing or expired value counts as zero. The result is stored
  /// without expiration.
  pub fn decrement(&self, key: K, n: V) -> V {
    self.update(key, |current| current.minus(n))
  }

  fn update(&self, key: K, f: impl FnOnce(V) -> V) -> V {
    let _guard = self.numeric.lock();
    let current = self.cache.get(&key).unwrap_or_default();
    let next = f(current);
    self.cache.set(key, next);
    next
  }
}

impl<K, V> Deref for NumberCache<K, V> {
  type Target = Cache<K, V>;

  fn deref(&self) -> &Self::Target {
    &self.cache
  }
}

impl<K, V> Clone for NumberCache<K, V> {
  fn clone(&self) -> Self {
    Self {
      cache: self.cache.clone(),
      numeric: Arc::clone(&self.numeric),
    }
  }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NumberCache<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NumberCache")
      .field("cache", &self.cache)
      .finish_non_exhaustive()
  }
}
