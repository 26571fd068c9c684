#![no_main]

use libfuzzer_sys::fuzz_target;
use shardlru::ds::{IntrusiveList, SlotId};

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Mirrors the list in a Vec of (id, value) pairs ordered head to tail and
// validates links after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut model: Vec<(SlotId, u32)> = Vec::new();

    for pair in data.chunks_exact(2) {
        let value = u32::from(pair[1]);

        match pair[0] % 6 {
            0 => {
                let id = list.push_front(value);
                model.insert(0, (id, value));
                assert_eq!(list.front(), Some(&value));
            }
            1 => {
                let expected = model.pop().map(|(_, v)| v);
                assert_eq!(list.pop_back(), expected);
            }
            2 => {
                if !model.is_empty() {
                    let entry = model.remove(value as usize % model.len());
                    assert!(list.move_to_front(entry.0));
                    model.insert(0, entry);
                    assert_eq!(list.front_id(), Some(entry.0));
                }
            }
            3 => {
                if !model.is_empty() {
                    let (id, v) = model.remove(value as usize % model.len());
                    assert_eq!(list.remove(id), Some(v));
                    assert!(!list.contains(id));
                    assert!(!list.move_to_front(id));
                }
            }
            4 => {
                let walked: Vec<u32> = list.iter().copied().collect();
                let expected: Vec<u32> = model.iter().map(|&(_, v)| v).collect();
                assert_eq!(walked, expected);
            }
            5 => {
                if value % 16 == 0 {
                    list.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.back_id(), model.last().map(|&(id, _)| id));
        if let Err(e) = list.validate() {
            panic!("{}", e);
        }
    }
});
