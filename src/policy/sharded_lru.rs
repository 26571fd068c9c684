//! # Sharded LRU Cache
//!
//! A thread-safe LRU cache that partitions its key space across a fixed set
//! of shards. Each shard is an independent [`LruCore`] behind its own
//! `parking_lot::Mutex`, so operations on keys in different shards never
//! contend.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     ShardedLruCache<K, V, S>                         │
//!   │                                                                      │
//!   │   selector: ShardSelector<S>     key ──► hash(seed, key) % N         │
//!   │                                                   │                  │
//!   │   shards: Box<[Shard]>  (fixed length N)          ▼                  │
//!   │   ┌──────────────────┬──────────────────┬─────┬──────────────────┐   │
//!   │   │ Mutex<LruCore>   │ Mutex<LruCore>   │ ... │ Mutex<LruCore>   │   │
//!   │   │  cap = C         │  cap = C         │     │  cap = C         │   │
//!   │   └──────────────────┴──────────────────┴─────┴──────────────────┘   │
//!   │        shard 0            shard 1                  shard N-1         │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shard Locks
//!
//! An LRU `get` reorders the recency list, so every lookup mutates its shard
//! and each shard is guarded by a plain `parking_lot::Mutex`. [`peek`] and
//! [`contains`] do not reorder but take the same mutex.
//!
//! ## Locking Rules
//!
//! - Single-key operations lock exactly one shard and release it before
//!   returning. The guard is dropped on every path, including misses.
//! - [`len`], [`clear`], [`is_empty`] and [`shard_lens`] sweep the shards in
//!   index order, taking and releasing one lock at a time.
//! - No code path ever holds two shard locks, so there is no lock ordering
//!   to get wrong and no cross-shard deadlock.
//!
//! ## Consistency
//!
//! Recency and capacity are per shard. A key in a quiet shard can outlive a
//! more recently used key in a busy one, and a skewed key distribution can
//! make one shard evict while others are nearly empty. Total capacity is
//! exactly `capacity_per_shard × shard_count`.
//!
//! The sweeps are best-effort: `len` may report a total that never existed at
//! a single instant while other threads write, and a reader racing `clear`
//! may see some shards emptied and others not. Callers needing a global
//! snapshot must add their own coordination on top.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use shardlru::policy::sharded_lru::ShardedLruCache;
//!
//! let cache = Arc::new(ShardedLruCache::new(64, 8));
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100u64 {
//!                 let key = t * 1_000 + i;
//!                 cache.insert(key, i);
//!                 assert_eq!(cache.get(&key), Some(i));
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert!(cache.len() <= cache.capacity());
//! ```
//!
//! [`peek`]: ShardedLruCache::peek
//! [`contains`]: ShardedLruCache::contains
//! [`len`]: ShardedLruCache::len
//! [`clear`]: ShardedLruCache::clear
//! [`is_empty`]: ShardedLruCache::is_empty
//! [`shard_lens`]: ShardedLruCache::shard_lens

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxBuildHasher;

use crate::ds::shard::ShardSelector;
use crate::error::ConfigError;
use crate::policy::lru::LruCore;
use crate::traits::ConcurrentCache;

/// One partition: an engine and the lock that guards it.
struct Shard<K, V> {
    core: Mutex<LruCore<K, V>>,
}

impl<K, V> Shard<K, V>
where
    K: Clone + Eq + Hash,
{
    fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            core: Mutex::new(LruCore::try_new(capacity)?),
        })
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, LruCore<K, V>> {
        self.core.lock()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`ShardedLruCache`] routing parameters.
///
/// ```
/// use shardlru::policy::sharded_lru::ShardedLruCache;
///
/// let cache = ShardedLruCache::<String, u32>::builder(128, 16)
///     .seed(0x5eed)
///     .try_build()
///     .unwrap();
/// assert_eq!(cache.shard_count(), 16);
/// assert_eq!(cache.capacity(), 128 * 16);
/// ```
pub struct ShardedLruCacheBuilder<K, V, S = FxBuildHasher> {
    capacity_per_shard: usize,
    shard_count: usize,
    seed: u64,
    hasher: S,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> ShardedLruCacheBuilder<K, V, FxBuildHasher> {
    /// Starts a builder with seed 0 and the default hasher.
    pub fn new(capacity_per_shard: usize, shard_count: usize) -> Self {
        Self {
            capacity_per_shard,
            shard_count,
            seed: 0,
            hasher: FxBuildHasher,
            _marker: PhantomData,
        }
    }
}

impl<K, V, S> ShardedLruCacheBuilder<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    /// Sets the seed mixed into every routing hash.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the routing hasher.
    pub fn hasher<T: BuildHasher>(self, hasher: T) -> ShardedLruCacheBuilder<K, V, T> {
        ShardedLruCacheBuilder {
            capacity_per_shard: self.capacity_per_shard,
            shard_count: self.shard_count,
            seed: self.seed,
            hasher,
            _marker: PhantomData,
        }
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero. See [`try_build`](Self::try_build).
    pub fn build(self) -> ShardedLruCache<K, V, S> {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the cache, returning an error on invalid sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity_per_shard` or `shard_count` is
    /// zero, or if their product does not fit in a `usize`. No shard is
    /// allocated in that case.
    pub fn try_build(self) -> Result<ShardedLruCache<K, V, S>, ConfigError> {
        if self.capacity_per_shard == 0 {
            return Err(ConfigError::zero("capacity_per_shard"));
        }
        let selector = ShardSelector::try_with_hasher(self.shard_count, self.seed, self.hasher)?;
        if self.capacity_per_shard.checked_mul(self.shard_count).is_none() {
            tracing::debug!(
                shard_count = self.shard_count,
                capacity_per_shard = self.capacity_per_shard,
                "rejected cache configuration"
            );
            return Err(ConfigError::new(
                "capacity_per_shard",
                format!(
                    "capacity_per_shard ({}) × shard_count ({}) overflows usize",
                    self.capacity_per_shard, self.shard_count
                ),
            ));
        }
        let shards = (0..self.shard_count)
            .map(|_| Shard::new(self.capacity_per_shard))
            .collect::<Result<Box<[_]>, _>>()?;

        tracing::debug!(
            shard_count = self.shard_count,
            capacity_per_shard = self.capacity_per_shard,
            seed = self.seed,
            "created sharded LRU cache"
        );

        Ok(ShardedLruCache {
            shards,
            selector,
            capacity_per_shard: self.capacity_per_shard,
        })
    }
}

impl<K, V, S> fmt::Debug for ShardedLruCacheBuilder<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCacheBuilder")
            .field("capacity_per_shard", &self.capacity_per_shard)
            .field("shard_count", &self.shard_count)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Thread-safe LRU cache split into independently locked shards.
///
/// All methods take `&self`; share the cache across threads with
/// `Arc<ShardedLruCache<..>>`. The shard set is fixed at construction.
pub struct ShardedLruCache<K, V, S = FxBuildHasher> {
    shards: Box<[Shard<K, V>]>,
    selector: ShardSelector<S>,
    capacity_per_shard: usize,
}

impl<K, V> ShardedLruCache<K, V, FxBuildHasher>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with `shard_count` shards of `capacity_per_shard`
    /// entries each.
    ///
    /// # Panics
    ///
    /// Panics if either argument is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity_per_shard: usize, shard_count: usize) -> Self {
        ShardedLruCacheBuilder::new(capacity_per_shard, shard_count).build()
    }

    /// Creates a cache, returning an error if either argument is zero.
    ///
    /// ```
    /// use shardlru::policy::sharded_lru::ShardedLruCache;
    ///
    /// assert!(ShardedLruCache::<u32, u32>::try_new(0, 4).is_err());
    /// assert!(ShardedLruCache::<u32, u32>::try_new(4, 0).is_err());
    /// assert!(ShardedLruCache::<u32, u32>::try_new(4, 4).is_ok());
    /// ```
    pub fn try_new(capacity_per_shard: usize, shard_count: usize) -> Result<Self, ConfigError> {
        ShardedLruCacheBuilder::new(capacity_per_shard, shard_count).try_build()
    }

    /// Returns a builder for seed and hasher configuration.
    pub fn builder(capacity_per_shard: usize, shard_count: usize) -> ShardedLruCacheBuilder<K, V> {
        ShardedLruCacheBuilder::new(capacity_per_shard, shard_count)
    }
}

impl<K, V, S> ShardedLruCache<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    /// Index of the shard responsible for `key`. Stable for the lifetime of
    /// the cache.
    #[inline]
    pub fn shard_for_key(&self, key: &K) -> usize {
        self.selector.shard_for_key(key)
    }

    #[inline]
    fn shard(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.shard_for_key(key)]
    }

    /// Returns a clone of the value for `key`, promoting it within its shard.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    /// Runs `f` on the value for `key` while its shard is locked, promoting
    /// the entry. Avoids cloning `V`.
    ///
    /// `f` runs under the shard lock: keep it short and never call back into
    /// this cache from it.
    ///
    /// ```
    /// use shardlru::policy::sharded_lru::ShardedLruCache;
    ///
    /// let cache = ShardedLruCache::new(4, 2);
    /// cache.insert("k", vec![1u8, 2, 3]);
    /// assert_eq!(cache.get_with(&"k", |v| v.len()), Some(3));
    /// ```
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.shard(key).lock().get(key).map(f)
    }

    /// Returns a clone of the value for `key` without promoting it.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().peek(key).cloned()
    }

    /// Checks for `key` without promoting it.
    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    /// Inserts or updates `key`, returning the previous value.
    ///
    /// A new key entering a full shard evicts that shard's least recently
    /// used entry; other shards are untouched.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let shard = self.shard(&key);
        let mut core = shard.lock();
        core.insert(key, value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Promotes `key` within its shard. Returns `false` if absent.
    pub fn touch(&self, key: &K) -> bool {
        self.shard(key).lock().touch(key)
    }
}

impl<K, V, S> ShardedLruCache<K, V, S>
where
    K: Clone + Eq + Hash,
{
    /// Total entries across all shards.
    ///
    /// Each shard is locked and released in turn, so under concurrent writes
    /// the sum is a best-effort snapshot rather than a linearizable read.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// `true` if every shard is empty when visited.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Per-shard entry counts in shard order, taken with the same
    /// one-lock-at-a-time sweep as [`len`](Self::len).
    pub fn shard_lens(&self) -> Vec<usize> {
        self.shards
            .iter()
            .map(|shard| shard.lock().len())
            .collect()
    }

    /// Empties every shard, one lock at a time in shard order.
    ///
    /// Not atomic across shards: a concurrent reader may observe some shards
    /// cleared and others not yet visited, and a concurrent writer may
    /// repopulate a shard the sweep has already passed.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
        tracing::debug!(shard_count = self.shards.len(), "cleared sharded LRU cache");
    }

    /// Total capacity, `capacity_per_shard × shard_count`. Construction
    /// rejects configurations where this overflows.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity_per_shard * self.shards.len()
    }

    #[inline]
    pub fn capacity_per_shard(&self) -> usize {
        self.capacity_per_shard
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

impl<K, V, S> ConcurrentCache for ShardedLruCache<K, V, S>
where
    K: Send,
    V: Send,
    S: Send + Sync,
{
}

impl<K, V, S> fmt::Debug for ShardedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shard_count", &self.shards.len())
            .field("capacity_per_shard", &self.capacity_per_shard)
            .finish_non_exhaustive()
    }
}
