use polycache::{CacheBuilder, NumberCache};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

fn new_number_cache() -> NumberCache<String, i64> {
  CacheBuilder::new().build_number().unwrap()
}

#[test]
fn test_increment_and_decrement() {
  let nc = new_number_cache();
  nc.set("a".to_string(), 1);
  nc.set_with_expiration("b".to_string(), 2, Duration::from_secs(60));

  assert_eq!(nc.increment("a".to_string(), 1), 2);
  assert_eq!(nc.get(&"a".to_string()), Some(2));

  assert_eq!(nc.decrement("b".to_string(), 1), 1);
  assert_eq!(nc.get(&"b".to_string()), Some(1));
}

#[test]
fn test_missing_keys_start_at_zero() {
  let nc = new_number_cache();
  assert_eq!(nc.increment("c".to_string(), 100), 100);
  assert_eq!(nc.decrement("d".to_string(), 100), -100);
}

#[test]
fn test_float_values() {
  let nc: NumberCache<&str, f64> = CacheBuilder::new().lru(4).build_number().unwrap();
  assert_eq!(nc.increment("x", 0.5), 0.5);
  assert_eq!(nc.increment("x", 0.25), 0.75);
  assert_eq!(nc.decrement("x", 1.0), -0.25);
}

#[test]
fn test_unsigned_decrement_wraps() {
  let nc: NumberCache<&str, u8> = CacheBuilder::new().build_number().unwrap();
  assert_eq!(nc.decrement("x", 1), u8::MAX);
  assert_eq!(nc.increment("x", 2), 1);
}

#[test]
fn test_concurrent_increments_do_not_lose_updates() {
  const THREADS: usize = 8;
  const PER_THREAD: usize = 500;

  let nc: NumberCache<&str, u64> = CacheBuilder::new().lfu(16).build_number().unwrap();
  let barrier = Arc::new(Barrier::new(THREADS));
  let mut handles = Vec::with_capacity(THREADS);

  for _ in 0..THREADS {
    let nc = nc.clone();
    let barrier = barrier.clone();
    handles.push(thread::spawn(move || {
      barrier.wait();
      for _ in 0..PER_THREAD {
        nc.increment("counter", 1);
      }
    }));
  }

  for handle in handles {
    handle.join().unwrap();
  }

  assert_eq!(nc.get(&"counter"), Some((THREADS * PER_THREAD) as u64));
}

#[test]
fn test_concurrent_mixed_increments_and_decrements() {
  let nc: NumberCache<i32, i32> = CacheBuilder::new().build_number().unwrap();
  let barrier = Arc::new(Barrier::new(4));

  let handles: Vec<_> = (0..4)
    .map(|i| {
      let nc = nc.clone();
      let barrier = barrier.clone();
      thread::spawn(move || {
        barrier.wait();
        for _ in 0..250 {
          if i % 2 == 0 {
            nc.increment(7, 3);
          } else {
            nc.decrement(7, 1);
          }
        }
      })
    })
    .collect();

  for handle in handles {
    handle.join().unwrap();
  }

  // Two threads add 750 each, two subtract 250 each.
  assert_eq!(nc.get(&7), Some(1000));
}

#[test]
fn test_increment_result_has_no_expiration() {
  let nc = new_number_cache();
  nc.set_with_expiration("a".to_string(), 5, Duration::from_millis(100));
  assert_eq!(nc.increment("a".to_string(), 1), 6);

  thread::sleep(Duration::from_millis(200));
  assert_eq!(nc.get(&"a".to_string()), Some(6));
}
