#![no_main]

use libfuzzer_sys::fuzz_target;
use shardlru::ds::{SlotArena, SlotId};

// Fuzz arbitrary operation sequences on SlotArena
//
// Tracks live ids alongside the arena and checks that every live id resolves
// to the value it was given and that freed slots are reused before the
// arena grows.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut live: Vec<(SlotId, u32)> = Vec::new();

    for pair in data.chunks_exact(2) {
        let value = u32::from(pair[1]);

        match pair[0] % 5 {
            0 => {
                let slots_before = arena.slot_count();
                let had_free = arena.len() < slots_before;
                let id = arena.insert(value);
                if had_free {
                    assert_eq!(arena.slot_count(), slots_before);
                }
                live.push((id, value));
            }
            1 => {
                if !live.is_empty() {
                    let (id, expected) = live.swap_remove(value as usize % live.len());
                    assert_eq!(arena.remove(id), Some(expected));
                    assert!(!arena.contains(id));
                    assert_eq!(arena.remove(id), None);
                }
            }
            2 => {
                if !live.is_empty() {
                    let i = value as usize % live.len();
                    let (id, _) = live[i];
                    if let Some(v) = arena.get_mut(id) {
                        *v = v.wrapping_add(1);
                        live[i].1 = *v;
                    }
                }
            }
            3 => {
                if value % 16 == 0 {
                    arena.clear();
                    live.clear();
                    assert!(arena.is_empty());
                }
            }
            4 => {
                for &(id, v) in &live {
                    assert_eq!(arena.get(id), Some(&v));
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        assert!(arena.len() <= arena.slot_count());
    }
});
