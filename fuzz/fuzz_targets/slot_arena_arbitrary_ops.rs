#![no_main]

use boundkit::ds::{SlotArena, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary alloc/free/get sequences on SlotArena
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 32) + 1;
    let mut arena: SlotArena<u32> = SlotArena::with_capacity(capacity);
    let mut live: Vec<SlotId> = Vec::new();

    for pair in ops.chunks_exact(2) {
        let value = u32::from(pair[1]);
        match pair[0] % 5 {
            0 => match arena.alloc(value) {
                Ok(id) => {
                    assert_eq!(arena.get(id), Some(&value));
                    live.push(id);
                }
                Err(back) => {
                    assert_eq!(back, value);
                    assert!(arena.is_full());
                }
            },
            1 => {
                if !live.is_empty() {
                    let id = live.swap_remove(pair[1] as usize % live.len());
                    assert!(arena.free(id).is_some());
                    assert!(!arena.contains(id));
                    assert!(arena.free(id).is_none());
                }
            }
            2 => {
                if !live.is_empty() {
                    let id = live[pair[1] as usize % live.len()];
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                    }
                    assert_eq!(arena.get(id), Some(&value));
                }
            }
            3 => {
                assert_eq!(arena.iter().count(), live.len());
            }
            _ => {
                if pair[1] == 0 {
                    arena.clear();
                    live.clear();
                }
            }
        }
        assert_eq!(arena.len(), live.len());
    }

    arena.check_invariants().unwrap();
});
