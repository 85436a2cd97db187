//! Eviction policies. Each type here implements [`Store`](crate::store::Store)
//! on its own and can be handed to
//! [`CacheBuilder::store`](crate::CacheBuilder::store) or used directly.

pub mod clock;
pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod mru;
pub mod simple;

mod order_list;

pub use clock::Clock;
pub use fifo::Fifo;
pub use lfu::Lfu;
pub use lru::Lru;
pub use mru::Mru;
pub use simple::Simple;

/// Capacity used by the bounded policies when none is given.
pub const DEFAULT_CAPACITY: usize = 128;

/// Maps a requested capacity onto an optional bound. Zero means unbounded.
#[inline]
pub(crate) fn bound(capacity: usize) -> Option<usize> {
  if capacity == 0 {
    None
  } else {
    Some(capacity)
  }
}

/// Returns `true` if inserting one more key would exceed `bound`.
#[inline]
pub(crate) fn is_full(len: usize, bound: Option<usize>) -> bool {
  bound.map_or(false, |cap| len >= cap)
}
