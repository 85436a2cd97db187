//! A thread-safe, in-process key-value cache with interchangeable eviction
//! policies and per-item expiration.
//!
//! # Features
//! - **Six Policies**: Simple (never evicts), LRU, LFU, FIFO, MRU and Clock,
//!   all behind one [`Store`] trait and selected when the cache is built.
//! - **Expiration**: items may carry a deadline. Expired items read as absent
//!   right away and are reclaimed by a background janitor.
//! - **Cancellable Janitor**: bind the sweep to a [`CancelToken`] to stop it.
//! - **Numbers**: [`NumberCache`] adds lost-update-free `increment` and
//!   `decrement`.
//!
//! ```
//! use polycache::Cache;
//! use std::time::Duration;
//!
//! let cache = Cache::builder().lru(2).build().unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");
//! cache.set("c", 3);
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.keys(), vec!["a", "c"]);
//!
//! cache.set_with_expiration("d", 4, Duration::from_secs(30));
//! assert_eq!(cache.get(&"d"), Some(4));
//! ```

// Public modules that form the API
pub mod builder;
pub mod error;
pub mod handles;
pub mod item;
pub mod number;
pub mod policy;
pub mod store;
pub mod task;
pub mod time;

// Internal, crate-only modules
mod shared;

// Re-export the primary user-facing types for convenience
pub use builder::CacheBuilder;
pub use error::BuildError;
pub use handles::Cache;
pub use item::Item;
pub use number::{Number, NumberCache};
pub use store::Store;
pub use task::cancel::CancelToken;

// The hasher of the maps returned by `Cache::list`.
pub use ahash::RandomState;
