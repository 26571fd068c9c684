#![no_main]

use libfuzzer_sys::fuzz_target;
use shardlru::policy::lru::LruCore;

// Fuzz arbitrary operation sequences on LruCore
//
// Compares against a Vec ordered most- to least-recently used and runs the
// full invariant check after every operation.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = (cap_byte as usize % 16) + 1;
    let mut cache: LruCore<u8, u32> = LruCore::new(capacity);
    let mut model: Vec<(u8, u32)> = Vec::new();

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let key = pair[1] % 32;
        let value = step as u32;

        match pair[0] % 7 {
            0 => {
                let previous = model.iter().position(|&(k, _)| k == key).map(|i| model.remove(i).1);
                if previous.is_none() && model.len() == capacity {
                    model.pop();
                }
                model.insert(0, (key, value));
                assert_eq!(cache.insert(key, value), previous);
            }
            1 => {
                let hit = model.iter().position(|&(k, _)| k == key).map(|i| {
                    let entry = model.remove(i);
                    model.insert(0, entry);
                    entry.1
                });
                assert_eq!(cache.get(&key).copied(), hit);
            }
            2 => {
                let expected = model.iter().find(|&&(k, _)| k == key).map(|&(_, v)| v);
                assert_eq!(cache.peek(&key).copied(), expected);
            }
            3 => {
                let expected = model.iter().position(|&(k, _)| k == key).map(|i| model.remove(i).1);
                assert_eq!(cache.remove(&key), expected);
            }
            4 => {
                assert_eq!(cache.pop_lru(), model.pop());
            }
            5 => {
                let hit = model.iter().position(|&(k, _)| k == key).map(|i| {
                    let entry = model.remove(i);
                    model.insert(0, entry);
                });
                assert_eq!(cache.touch(&key), hit.is_some());
            }
            6 => {
                if key == 0 {
                    cache.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(cache.len(), model.len());
        assert!(cache.len() <= capacity);
        if let Err(e) = cache.check_invariants() {
            panic!("{}", e);
        }
    }

    let order: Vec<(u8, u32)> = cache.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(order, model);
});
