#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use shardlru::policy::sharded_lru::ShardedLruCache;

// Fuzz arbitrary operation sequences on ShardedLruCache
//
// Uses enough capacity per shard that nothing is evicted, so the cache must
// agree exactly with a HashMap. Shard count and seed come from the input.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let shard_count = (data[0] as usize % 32) + 1;
    let cache: ShardedLruCache<u8, u16> = ShardedLruCache::<u8, u16>::builder(256, shard_count)
        .seed(u64::from(data[1]))
        .build();
    let mut model: HashMap<u8, u16> = HashMap::new();

    for (step, pair) in data[2..].chunks_exact(2).enumerate() {
        let key = pair[1];
        match pair[0] % 5 {
            0 => assert_eq!(cache.insert(key, step as u16), model.insert(key, step as u16)),
            1 => assert_eq!(cache.get(&key), model.get(&key).copied()),
            2 => assert_eq!(cache.remove(&key), model.remove(&key)),
            3 => assert_eq!(cache.contains(&key), model.contains_key(&key)),
            4 => {
                if key < 8 {
                    cache.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }
        assert!(cache.shard_for_key(&key) < shard_count);
        assert_eq!(cache.len(), model.len());
    }
});
