#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use polycache::time::ManualClock;
use polycache::{Cache, CacheBuilder};

/// Names of the bounded policies, for table-driven tests.
pub const BOUNDED_POLICIES: [&str; 5] = ["lru", "lfu", "fifo", "mru", "clock"];

/// Applies one of the named policies with the given capacity.
pub fn with_policy<K, V>(builder: CacheBuilder<K, V>, policy: &str, capacity: usize) -> CacheBuilder<K, V>
where
  K: Eq + std::hash::Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  match policy {
    "simple" => builder.simple(),
    "lru" => builder.lru(capacity),
    "lfu" => builder.lfu(capacity),
    "fifo" => builder.fifo(capacity),
    "mru" => builder.mru(capacity),
    "clock" => builder.clock(capacity),
    other => panic!("unknown policy {}", other),
  }
}

// Helper to build a cache whose clock only moves when the test says so.
// The janitor interval is long enough that it never fires during a test.
pub fn build_manual_cache(policy: &str, capacity: usize) -> (Cache<String, i32>, Arc<ManualClock>) {
  let clock = Arc::new(ManualClock::new());
  let cache = with_policy(CacheBuilder::new(), policy, capacity)
    .time_source(clock.clone())
    .janitor_interval(Duration::from_secs(3600))
    .build()
    .unwrap();
  (cache, clock)
}

pub fn key(s: &str) -> String {
  s.to_string()
}
