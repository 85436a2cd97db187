use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polycache::{CacheBuilder, NumberCache};
use rand::prelude::*;

const CAPACITY: usize = 100_000;
const NUM_OPS: usize = 200_000;

// --- Enums for Operations ---
#[derive(Clone)]
enum Op {
  Read(u64),
  Write(u64, u64),
  Increment(u64),
}

// --- Setup ---

// Cubing a uniform sample skews keys toward the low end of the range,
// giving a small hot set the eviction policies can keep resident.
fn skewed_key(rng: &mut StdRng) -> u64 {
  let x: f64 = rng.random();
  (x * x * x * CAPACITY as f64 * 2.0) as u64
}

fn setup(policy: &str, workload: &str, concurrency: usize) -> (NumberCache<u64, u64>, Vec<Vec<Op>>) {
  let builder = CacheBuilder::new();
  let builder = match policy {
    "lru" => builder.lru(CAPACITY),
    "lfu" => builder.lfu(CAPACITY),
    "fifo" => builder.fifo(CAPACITY),
    "mru" => builder.mru(CAPACITY),
    _ => builder.clock(CAPACITY),
  };
  let cache = builder.build_number().unwrap();

  // Pre-fill the cache to its capacity to simulate a warm state.
  for i in 0..CAPACITY as u64 {
    cache.set(i, i);
  }

  let mut rng = StdRng::seed_from_u64(42);
  let reads = match workload {
    "Read100_Skewed" => 100,
    "Read75Write25_Skewed" => 75,
    _ => 0,
  };

  let mut ops_by_thread = vec![Vec::with_capacity(NUM_OPS / concurrency); concurrency];
  for i in 0..NUM_OPS {
    let key = skewed_key(&mut rng);
    let op = if workload == "Increment_Skewed" {
      Op::Increment(key)
    } else if i % 100 < reads {
      Op::Read(key)
    } else {
      Op::Write(key, i as u64)
    };
    ops_by_thread[i % concurrency].push(op);
  }

  (cache, ops_by_thread)
}

// --- Benchmark Logic ---

fn run_workload(cache: &NumberCache<u64, u64>, ops_by_thread: &[Vec<Op>]) -> Duration {
  let barrier = Arc::new(Barrier::new(ops_by_thread.len()));
  let start_time = Instant::now();

  thread::scope(|s| {
    for thread_ops in ops_by_thread {
      let barrier = barrier.clone();
      s.spawn(move || {
        barrier.wait();
        for op in thread_ops {
          match op {
            Op::Read(key) => {
              black_box(cache.get(key));
            }
            Op::Write(key, value) => cache.set(*key, *value),
            Op::Increment(key) => {
              black_box(cache.increment(*key, 1));
            }
          }
        }
      });
    }
  });

  start_time.elapsed()
}

fn sync_general_benches(c: &mut Criterion) {
  for workload in ["Read100_Skewed", "Read75Write25_Skewed", "Write100_Skewed", "Increment_Skewed"] {
    let mut group = c.benchmark_group(format!("SyncGeneral/{}", workload));
    group.throughput(Throughput::Elements(NUM_OPS as u64));
    group.sample_size(10);

    for policy in ["lru", "lfu", "fifo", "mru", "clock"] {
      for concurrency in [1usize, 4, 8] {
        let id = BenchmarkId::new(policy, format!("Threads-{}", concurrency));
        group.bench_function(id, |b| {
          b.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for _ in 0..iters {
              let (cache, ops_by_thread) = setup(policy, workload, concurrency);
              total += run_workload(&cache, &ops_by_thread);
            }
            total
          });
        });
      }
    }
    group.finish();
  }
}

criterion_group!(benches, sync_general_benches);
criterion_main!(benches);
