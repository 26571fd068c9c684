//! Deterministic key-to-shard routing.
//!
//! ## Architecture
//!
//! ```text
//!   key ──► ShardSelector { shards: 4, seed: 42, hasher: S }
//!             1. h = hasher.build_hasher()
//!             2. seed.hash(&mut h)
//!             3. key.hash(&mut h)
//!             4. h.finish() % 4
//!           ──► shard index in [0, 4)
//!
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! ## Key Concepts
//!
//! - **Pure**: the index depends only on the key, the seed, the hasher and
//!   the shard count. There is no per-call state.
//! - **Fixed**: shard count and hasher are chosen at construction and never
//!   change; a selector cannot be resized.
//! - **Seed isolation**: different seeds give independent distributions,
//!   which helps when a key set collides badly under one seed.
//!
//! The default hasher is [`FxBuildHasher`]: fast and unkeyed, so routing is
//! also stable across processes. Pass a keyed hasher through
//! [`ShardSelector::try_with_hasher`] when keys are attacker-controlled.
//!
//! ## Example Usage
//!
//! ```
//! use shardlru::ds::ShardSelector;
//!
//! let selector = ShardSelector::try_new(4, 0).unwrap();
//! let shard = selector.shard_for_key(&"user:123");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key(&"user:123"), shard);
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

use rustc_hash::FxBuildHasher;

use crate::error::ConfigError;

/// Maps keys to shard indices with a seeded hash.
#[derive(Clone)]
pub struct ShardSelector<S = FxBuildHasher> {
    shards: usize,
    seed: u64,
    hasher: S,
}

impl ShardSelector<FxBuildHasher> {
    /// Creates a selector over `shards` shards using the default hasher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `shards` is zero.
    pub fn try_new(shards: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::try_with_hasher(shards, seed, FxBuildHasher)
    }
}

impl<S: BuildHasher> ShardSelector<S> {
    /// Creates a selector with a caller-supplied hasher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `shards` is zero.
    pub fn try_with_hasher(shards: usize, seed: u64, hasher: S) -> Result<Self, ConfigError> {
        if shards == 0 {
            return Err(ConfigError::zero("shard_count"));
        }
        Ok(Self {
            shards,
            seed,
            hasher,
        })
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the shard index for `key`, always in `[0, shard_count)`.
    #[inline]
    pub fn shard_for_key<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        if self.shards == 1 {
            return 0;
        }
        let mut state = self.hasher.build_hasher();
        self.seed.hash(&mut state);
        key.hash(&mut state);
        (state.finish() % self.shards as u64) as usize
    }
}

impl<S> fmt::Debug for ShardSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardSelector")
            .field("shards", &self.shards)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
