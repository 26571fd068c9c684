//! # Single-Shard LRU Engine
//!
//! A capacity-bounded key/value map that keeps its entries in recency order
//! and evicts the least recently used entry when a new key would overflow it.
//! This is the building block [`ShardedLruCache`](super::sharded_lru::ShardedLruCache)
//! composes, one instance per shard.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                          LruCore<K, V>                            │
//!   │                                                                   │
//!   │   index: FxHashMap<K, SlotId>                                     │
//!   │   ┌─────────┬────────┐                                            │
//!   │   │  "a"    │ id_0 ──┼───────────┐                                │
//!   │   │  "b"    │ id_2 ──┼───────┐   │                                │
//!   │   │  "c"    │ id_1 ──┼───┐   │   │                                │
//!   │   └─────────┴────────┘   │   │   │                                │
//!   │                          ▼   ▼   ▼                                │
//!   │   order: IntrusiveList<Entry<K, V>>  (nodes live in a SlotArena)  │
//!   │                                                                   │
//!   │   head ──► [c] ◄──► [b] ◄──► [a] ◄── tail                         │
//!   │            MRU                LRU                                 │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index stores arena handles rather than references, so splicing a node
//! never invalidates anything the index holds. The engine contains no
//! `unsafe` and no raw pointers.
//!
//! ## Invariants
//!
//! - The index key set equals the list key set, and each index handle
//!   addresses the node holding that key.
//! - `len() <= capacity()` after every operation.
//! - Right after `get(k)` or `insert(k, _)`, `k` is at the head.
//!
//! ## Operations
//!
//! | Method             | Complexity | Notes                                  |
//! |--------------------|------------|----------------------------------------|
//! | `try_new(cap)`     | O(1)       | `ConfigError` if `cap == 0`            |
//! | `insert(k, v)`     | O(1)*      | update in place or insert; evicts ≤ 1  |
//! | `get(&k)`          | O(1)*      | promotes to MRU                        |
//! | `peek(&k)`         | O(1)*      | no promotion                           |
//! | `remove(&k)`       | O(1)*      |                                        |
//! | `pop_lru()`        | O(1)       |                                        |
//! | `touch(&k)`        | O(1)*      | promote without reading                |
//! | `recency_rank(&k)` | O(n)       | 0 = MRU                                |
//! | `clear()`          | O(n)       | drops all entries                      |
//!
//! `*` expected, hash lookup.
//!
//! ## Thread Safety
//!
//! `LruCore` is not synchronized. Every method that changes recency takes
//! `&mut self`; wrap it in a lock or use the sharded cache for shared access.
//!
//! ## Example
//!
//! ```
//! use shardlru::policy::lru::LruCore;
//!
//! let mut cache = LruCore::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//!
//! cache.insert(3, "three"); // evicts 2, the least recently used
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some(&"three"));
//! assert_eq!(cache.get(&1), Some(&"one"));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Upper bound on slots reserved at construction; larger caches grow on demand.
const MAX_PREALLOC: usize = 1024;

/// Owned key/value pair stored in the recency list.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Unsynchronized LRU cache with a fixed entry capacity.
pub struct LruCore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an engine holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an engine holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// ```
    /// use shardlru::policy::lru::LruCore;
    ///
    /// assert!(LruCore::<u32, u32>::try_new(0).is_err());
    /// assert_eq!(LruCore::<u32, u32>::try_new(4).unwrap().capacity(), 4);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero("capacity"));
        }
        let reserve = capacity.min(MAX_PREALLOC);
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: IntrusiveList::with_capacity(reserve),
            capacity,
        })
    }

    /// Inserts or updates `key` and makes it the most recently used entry.
    ///
    /// Updating an existing key replaces its value in place and returns the
    /// old one; it never evicts. Inserting a new key into a full cache first
    /// evicts the least recently used entry, so at most one entry leaves per
    /// call and the arena never grows past `capacity` slots.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let previous = self
                .order
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.order.move_to_front(id);
            self.debug_validate();
            return previous;
        }

        if self.order.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.debug_validate();
        None
    }

    /// Returns the value for `key` and promotes it to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Mutable counterpart of [`get`](Self::get); also promotes.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the value for `key` without changing recency order.
    ///
    /// ```
    /// use shardlru::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(2);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// assert_eq!(cache.peek(&"a"), Some(&1));
    ///
    /// cache.insert("c", 3); // "a" was only peeked, so it is still LRU
    /// assert!(!cache.contains(&"a"));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id);
        self.debug_validate();
        entry.map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        self.debug_validate();
        Some((entry.key, entry.value))
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Promotes `key` to most recently used. Returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_front(id),
            None => false,
        }
    }

    /// Returns the position of `key` in recency order; 0 is the most recent.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.index.get(key)?;
        self.order.iter_entries().position(|(id, _)| id == target)
    }

    /// Number of entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies that the index and the recency list describe the same entries
    /// and that the capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.validate()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, recency list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.order.iter_entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list node {id:?} is not the indexed slot for its key"
                )));
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.order.pop_back() {
            self.index.remove(&entry.key);
            tracing::trace!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(e) = self.check_invariants() {
                panic!("{}", e);
            }
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCore::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCore::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCore::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCore::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCore::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCore::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCore::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCore::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCore::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCore::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
