//! Eviction policies.
//!
//! - [`lru::LruCore`]: single-threaded LRU engine, one per shard.
//! - [`sharded_lru::ShardedLruCache`]: thread-safe cache built from
//!   independently locked `LruCore` shards.

pub mod lru;
pub mod sharded_lru;
