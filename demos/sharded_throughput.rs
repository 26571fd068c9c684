//! Concurrent put+get throughput against a 16-shard cache.
//!
//! ```text
//! cargo run --release --example sharded_throughput
//! RUST_LOG=shardlru=debug cargo run --release --example sharded_throughput
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use shardlru::error::ConfigError;
use shardlru::policy::sharded_lru::ShardedLruCache;
use tracing::info;

const THREADS: usize = 12;
const OPS_PER_THREAD: usize = 20_000;
const SHARDS: usize = 16;
const CAPACITY_PER_SHARD: usize = 128;
const KEY_SPACE: usize = 4_096;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cache: Arc<ShardedLruCache<usize, usize>> =
        Arc::new(ShardedLruCache::try_new(CAPACITY_PER_SHARD, SHARDS)?);

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS)
        .map(|tid| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    // Overlapping key ranges so threads contend on shared shards.
                    let key = (tid * 257 + i) % KEY_SPACE;
                    cache.insert(key, i);
                    let _ = cache.get(&key);
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("worker thread panicked");
        }
    }
    let elapsed = start.elapsed();

    let total_ops = (THREADS * OPS_PER_THREAD * 2) as f64;
    let secs = elapsed.as_secs_f64();
    let ops_per_sec = if secs > 0.0 { total_ops / secs } else { 0.0 };

    info!(
        threads = THREADS,
        shards = SHARDS,
        len = cache.len(),
        capacity = cache.capacity(),
        "workload finished"
    );
    println!(
        "{} operations in {} ms ({:.2} ops/s)",
        total_ops as u64,
        elapsed.as_millis(),
        ops_per_sec
    );
    println!("shard occupancy: {:?}", cache.shard_lens());

    Ok(())
}
