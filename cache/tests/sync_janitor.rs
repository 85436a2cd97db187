use polycache::time::ManualClock;
use polycache::{CacheBuilder, CancelToken};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const JANITOR_TICK: Duration = Duration::from_millis(20);
const WAIT_LIMIT: Duration = Duration::from_secs(5);

// Polls `condition` until it holds or the wait limit passes.
fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
  let start = Instant::now();
  while start.elapsed() < WAIT_LIMIT {
    if condition() {
      return true;
    }
    thread::sleep(Duration::from_millis(5));
  }
  condition()
}

#[test]
fn test_sync_janitor_reclaims_expired_items() {
  let cache = CacheBuilder::<&str, i32>::new()
    .lru(16)
    .janitor_interval(JANITOR_TICK)
    .build()
    .unwrap();

  cache.set_with_expiration("short", 1, Duration::from_millis(50));
  cache.set("long", 2);
  assert!(cache.contains(&"short"));

  assert!(
    wait_for(|| !cache.contains(&"short")),
    "Janitor should have reclaimed the expired key"
  );
  assert_eq!(cache.keys(), vec!["long"]);
  assert!(!cache.list().contains_key(&"short"));
}

#[test]
fn test_sync_janitor_uses_cache_clock() {
  let clock = Arc::new(ManualClock::new());
  let cache = CacheBuilder::<&str, i32>::new()
    .fifo(16)
    .time_source(clock.clone())
    .janitor_interval(JANITOR_TICK)
    .build()
    .unwrap();

  cache.set_with_expiration("a", 1, Duration::from_secs(10));
  thread::sleep(JANITOR_TICK * 5);
  assert!(cache.contains(&"a"), "Wall time passing must not expire the item");

  clock.advance(Duration::from_secs(11));
  assert!(wait_for(|| cache.is_empty()));
}

#[test]
fn test_sync_cancelled_janitor_stops_reclaiming() {
  let clock = Arc::new(ManualClock::new());
  let token = CancelToken::new();
  let cache = CacheBuilder::<&str, i32>::new()
    .clock(8)
    .time_source(clock.clone())
    .janitor_interval(JANITOR_TICK)
    .cancel_token(token.clone())
    .build()
    .unwrap();
  assert!(cache.janitor_running());

  token.cancel();
  assert!(wait_for(|| !cache.janitor_running()), "Janitor should exit on cancel");

  cache.set_with_expiration("a", 1, Duration::from_millis(1));
  clock.advance(Duration::from_secs(1));
  thread::sleep(JANITOR_TICK * 5);

  assert_eq!(cache.get(&"a"), None, "Lazy expiration still applies");
  assert!(cache.contains(&"a"), "Nothing reclaims after cancellation");

  // Manual reclamation keeps working.
  assert_eq!(cache.delete_expired(), 1);
  assert!(cache.is_empty());
}

#[test]
fn test_sync_token_cancelled_before_build() {
  let token = CancelToken::new();
  token.cancel();

  let cache = CacheBuilder::<i32, i32>::new()
    .cancel_token(token)
    .build()
    .unwrap();
  assert!(wait_for(|| !cache.janitor_running()));

  cache.set(1, 1);
  assert_eq!(cache.get(&1), Some(1), "The cache works without a janitor");
}

#[test]
fn test_sync_one_token_stops_many_janitors() {
  let token = CancelToken::new();
  let caches: Vec<_> = (0..3)
    .map(|_| {
      CacheBuilder::<i32, i32>::new()
        .janitor_interval(JANITOR_TICK)
        .cancel_token(token.clone())
        .build()
        .unwrap()
    })
    .collect();

  token.cancel();
  for cache in &caches {
    assert!(wait_for(|| !cache.janitor_running()));
  }
}

#[test]
fn test_sync_flush_and_delete_do_not_stop_janitor() {
  let cache = CacheBuilder::<i32, i32>::new()
    .janitor_interval(JANITOR_TICK)
    .build()
    .unwrap();

  cache.set(1, 1);
  cache.delete(&1);
  cache.flush();
  thread::sleep(JANITOR_TICK * 3);
  assert!(cache.janitor_running());
}

#[test]
fn test_sync_dropping_cache_leaves_caller_token_alone() {
  let token = CancelToken::new();
  let cache = CacheBuilder::<i32, i32>::new()
    .janitor_interval(JANITOR_TICK)
    .cancel_token(token.clone())
    .build()
    .unwrap();
  let clone = cache.clone();

  drop(cache);
  assert!(clone.janitor_running(), "A live clone keeps the janitor");
  drop(clone);

  assert!(!token.is_cancelled());
}
