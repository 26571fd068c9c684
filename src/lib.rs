//! shardlru: a sharded, thread-safe LRU cache.
//!
//! Keys are routed by a seeded hash to one of a fixed number of shards. Each
//! shard is a bounded [`LruCore`](policy::lru::LruCore) behind its own lock,
//! so threads working on different shards do not contend.
//!
//! ```
//! use shardlru::prelude::*;
//!
//! let cache: ShardedLruCache<&str, u32> = ShardedLruCache::new(2, 1);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! assert_eq!(cache.get(&"a"), Some(1));
//! cache.insert("c", 3);
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! Layout:
//!
//! - [`ds`]: slot arena, arena-backed recency list, shard selector.
//! - [`policy`]: the single-shard engine and the sharded cache.
//! - [`traits`]: cache trait hierarchy implemented by the engine.
//! - [`error`]: configuration and invariant errors.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
