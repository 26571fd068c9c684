//! # Cache Trait Hierarchy
//!
//! Interfaces shared by the single-shard engine and anything else that wants
//! to be driven generically as a cache.
//!
//! ```text
//!   ┌───────────────────────────────────┐
//!   │          CoreCache<K, V>          │
//!   │  insert(&mut, K, V) → Option<V>   │
//!   │  get(&mut, &K) → Option<&V>       │
//!   │  contains(&, &K) → bool           │
//!   │  len / is_empty / capacity        │
//!   │  clear(&mut)                      │
//!   └─────────────────┬─────────────────┘
//!                     ▼
//!   ┌───────────────────────────────────┐
//!   │        MutableCache<K, V>         │
//!   │  remove(&mut, &K) → Option<V>     │
//!   └─────────────────┬─────────────────┘
//!                     ▼
//!   ┌───────────────────────────────────┐
//!   │        LruCacheTrait<K, V>        │
//!   │  pop_lru / peek_lru               │
//!   │  touch / recency_rank             │
//!   └───────────────────────────────────┘
//!
//!   ConcurrentCache: Send + Sync marker for types safe to share by `&self`
//! ```
//!
//! These traits take `&mut self`: implementors are not internally
//! synchronized. [`ShardedLruCache`](crate::policy::sharded_lru::ShardedLruCache)
//! provides the `&self` thread-safe surface on top of them.

/// Operations every cache supports.
///
/// # Example
///
/// ```
/// use shardlru::policy::lru::LruCore;
/// use shardlru::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCore::new(8);
/// warm(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value if it existed.
    ///
    /// Inserting a new key into a full cache evicts one entry according to
    /// the cache's policy first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`. May update policy state (recency, frequency).
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for `key` without touching policy state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that allow removing an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in turn; results line up with `keys`.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-specific operations.
///
/// # Example
///
/// ```
/// use shardlru::policy::lru::LruCore;
/// use shardlru::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCore::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.insert(3, "c");
///
/// assert!(cache.touch(&1));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// assert_eq!(cache.pop_lru(), Some((2, "b")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing the order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order (0 = most recent). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that are safe to share between threads by reference.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use shardlru::policy::sharded_lru::ShardedLruCache;
/// use shardlru::traits::ConcurrentCache;
///
/// fn share<C: ConcurrentCache + 'static>(cache: Arc<C>) -> Arc<C> {
///     let clone = Arc::clone(&cache);
///     std::thread::spawn(move || drop(clone)).join().unwrap();
///     cache
/// }
///
/// let cache = share(Arc::new(ShardedLruCache::<u64, u64>::new(4, 2)));
/// assert!(cache.is_empty());
/// ```
pub trait ConcurrentCache: Send + Sync {}
