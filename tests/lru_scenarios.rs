// ==============================================
// LRU BEHAVIOUR SCENARIOS (integration)
// ==============================================
//
// End-to-end checks of the public surface: the single-shard engine and the
// sharded cache driven through the same scenarios, plus the configuration
// errors both reject.

use shardlru::error::ConfigError;
use shardlru::policy::lru::LruCore;
use shardlru::policy::sharded_lru::ShardedLruCache;
use shardlru::traits::{CoreCache, LruCacheTrait};

// ==============================================
// Engine Scenarios
// ==============================================

mod engine {
    use super::*;

    #[test]
    fn capacity_two_evicts_the_unread_key() {
        let mut cache = LruCore::new(2);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.get(&1), Some(&"one"));

        cache.insert(3, "three");

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(&"three"));
        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn overflow_without_reads_evicts_first_inserted() {
        let capacity = 8;
        let mut cache = LruCore::new(capacity);
        for k in 0..=capacity {
            cache.insert(k, k * 2);
        }

        assert!(!cache.contains(&0));
        assert!((1..=capacity).all(|k| cache.contains(&k)));
        assert_eq!(cache.len(), capacity);
    }

    #[test]
    fn repeated_identical_insert_keeps_len() {
        let mut cache = LruCore::new(4);
        cache.insert("k", 7);
        let before = cache.len();
        for _ in 0..10 {
            cache.insert("k", 7);
        }
        assert_eq!(cache.len(), before);
        assert_eq!(cache.recency_rank(&"k"), Some(0));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = LruCore::new(4);
        for k in 0..4 {
            cache.insert(k, k);
        }
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!((0..4).all(|k| cache.get(&k).is_none()));

        cache.insert(9, 9);
        assert_eq!(cache.peek_lru(), Some((&9, &9)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err: ConfigError = LruCore::<u8, u8>::try_new(0).unwrap_err();
        assert_eq!(err.parameter(), "capacity");
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn driven_through_traits() {
        fn fill<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
            for k in 0..n {
                cache.insert(k, k);
            }
        }

        let mut cache = LruCore::new(3);
        fill(&mut cache, 5);
        assert_eq!(CoreCache::len(&cache), 3);
        assert_eq!(LruCacheTrait::pop_lru(&mut cache), Some((2, 2)));
    }
}

// ==============================================
// Sharded Scenarios
// ==============================================

mod sharded {
    use super::*;

    #[test]
    fn single_shard_matches_engine_scenario() {
        let cache = ShardedLruCache::new(2, 1);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.get(&1), Some("one"));

        cache.insert(3, "three");

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some("three"));
        assert_eq!(cache.get(&1), Some("one"));
    }

    #[test]
    fn three_inserts_then_clear() {
        let cache = ShardedLruCache::new(3, 4);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), None);
    }

    #[test]
    fn zero_parameters_are_rejected() {
        let per_shard = ShardedLruCache::<u32, u32>::try_new(0, 4).unwrap_err();
        assert_eq!(per_shard.parameter(), "capacity_per_shard");

        let shards = ShardedLruCache::<u32, u32>::try_new(4, 0).unwrap_err();
        assert_eq!(shards.parameter(), "shard_count");

        assert!(ShardedLruCache::<u32, u32>::builder(0, 0)
            .try_build()
            .is_err());
    }

    #[test]
    fn routing_is_stable_for_a_given_configuration() {
        let a = ShardedLruCache::<String, u32>::builder(4, 8).seed(17).build();
        let b = ShardedLruCache::<String, u32>::builder(4, 8).seed(17).build();

        for i in 0..500 {
            let key = format!("key-{i}");
            let shard = a.shard_for_key(&key);
            a.insert(key.clone(), i);
            assert_eq!(a.shard_for_key(&key), shard);
            assert_eq!(b.shard_for_key(&key), shard);
        }
    }

    #[test]
    fn len_is_bounded_by_total_capacity() {
        let cache = ShardedLruCache::new(4, 4);
        for k in 0..1_000u32 {
            cache.insert(k, k);
            assert!(cache.len() <= cache.capacity());
        }
        assert!(cache.shard_lens().iter().all(|&n| n <= 4));
    }

    #[test]
    fn hit_keeps_value_until_next_mutation() {
        let cache = ShardedLruCache::new(8, 2);
        cache.insert("k", 1);
        assert_eq!(cache.get(&"k"), Some(1));
        assert_eq!(cache.get(&"k"), Some(1));
        assert_eq!(cache.insert("k", 2), Some(1));
        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.remove(&"k"), Some(2));
        assert_eq!(cache.get(&"k"), None);
    }
}

// ==============================================
// Model-Based Property Tests
// ==============================================
//
// A sharded cache with one shard must agree exactly with the engine.

mod equivalence {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, u16),
        Get(u8),
        Remove(u8),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k % 32, v)),
            4 => any::<u8>().prop_map(|k| Op::Get(k % 32)),
            1 => any::<u8>().prop_map(|k| Op::Remove(k % 32)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn single_shard_cache_tracks_engine(
            capacity in 1usize..10,
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut engine = LruCore::new(capacity);
            let sharded = ShardedLruCache::new(capacity, 1);

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(sharded.insert(k, v), engine.insert(k, v));
                    }
                    Op::Get(k) => {
                        prop_assert_eq!(sharded.get(&k), engine.get(&k).copied());
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(sharded.remove(&k), engine.remove(&k));
                    }
                    Op::Clear => {
                        sharded.clear();
                        engine.clear();
                    }
                }
                prop_assert_eq!(sharded.len(), engine.len());
                prop_assert!(engine.check_invariants().is_ok());
            }
        }
    }
}
