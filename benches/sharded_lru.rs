//! Sharded cache throughput under thread contention.
//!
//! Each iteration spawns `threads` workers that run a fixed put+get loop on a
//! shared cache, so the measured time includes lock contention between
//! workers routed to the same shard.

use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use shardlru::policy::sharded_lru::ShardedLruCache;

const OPS_PER_THREAD: u64 = 10_000;
const CAPACITY_PER_SHARD: usize = 128;

fn run_workers(cache: &Arc<ShardedLruCache<u64, u64>>, threads: usize, key_space: u64) {
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|tid| {
            let cache = Arc::clone(cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = SmallRng::seed_from_u64(tid as u64);
                barrier.wait();
                for i in 0..OPS_PER_THREAD {
                    let key = rng.gen_range(0..key_space);
                    cache.insert(key, i);
                    black_box(cache.get(&key));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

fn bench_shard_scaling(c: &mut Criterion) {
    let threads = 8;
    let mut group = c.benchmark_group("sharded_lru_shards");
    group.sample_size(20);
    group.throughput(Throughput::Elements(threads as u64 * OPS_PER_THREAD * 2));

    for shards in [1usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(shards), &shards, |b, &shards| {
            let cache = Arc::new(ShardedLruCache::new(CAPACITY_PER_SHARD, shards));
            b.iter(|| run_workers(&cache, threads, 1 << 16));
        });
    }
    group.finish();
}

fn bench_thread_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_lru_threads");
    group.sample_size(20);

    for threads in [1usize, 2, 4, 8, 12] {
        group.throughput(Throughput::Elements(threads as u64 * OPS_PER_THREAD * 2));
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                let cache = Arc::new(ShardedLruCache::new(CAPACITY_PER_SHARD, 16));
                b.iter(|| run_workers(&cache, threads, 1 << 16));
            },
        );
    }
    group.finish();
}

fn bench_single_thread_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_lru_ops");
    group.throughput(Throughput::Elements(1));

    let cache = ShardedLruCache::new(CAPACITY_PER_SHARD, 16);
    for k in 0..1024u64 {
        cache.insert(k, k);
    }
    group.bench_function("get_hit", |b| {
        let mut k = 0u64;
        b.iter(|| {
            k = (k + 1) & 1023;
            black_box(cache.get(&black_box(k)))
        })
    });
    group.bench_function("len_sweep", |b| b.iter(|| black_box(cache.len())));
    group.finish();
}

criterion_group!(
    benches,
    bench_shard_scaling,
    bench_thread_scaling,
    bench_single_thread_ops
);
criterion_main!(benches);
