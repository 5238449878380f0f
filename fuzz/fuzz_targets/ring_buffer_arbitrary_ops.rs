#![no_main]

use std::collections::VecDeque;

use boundkit::ds::RingBuffer;
use libfuzzer_sys::fuzz_target;

// Fuzz RingBuffer against a VecDeque model, with and without overwrite
fuzz_target!(|data: &[u8]| {
    let Some((&cfg, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cfg % 16) + 1;
    let overwrite = cfg & 0x80 != 0;
    let mut ring = if overwrite {
        RingBuffer::with_overwrite(capacity)
    } else {
        RingBuffer::new(capacity)
    };
    let mut model: VecDeque<u8> = VecDeque::new();

    for pair in ops.chunks_exact(2) {
        let value = pair[1];
        match pair[0] % 5 {
            0 => {
                let full = model.len() == capacity;
                let result = ring.push(value);
                if full && !overwrite {
                    assert_eq!(result, Err(value));
                } else {
                    assert!(result.is_ok());
                    if full {
                        model.pop_front();
                    }
                    model.push_back(value);
                }
            }
            1 => assert_eq!(ring.pop(), model.pop_front()),
            2 => assert_eq!(ring.discard(), model.pop_front().is_some()),
            3 => {
                let displaced = ring.push_overwrite(value);
                let expected = if model.len() == capacity {
                    model.pop_front()
                } else {
                    None
                };
                model.push_back(value);
                assert_eq!(displaced, expected);
            }
            _ => {
                assert_eq!(ring.front(), model.front());
                assert_eq!(ring.back(), model.back());
            }
        }
        assert_eq!(ring.len(), model.len());
    }

    assert!(ring.iter().eq(model.iter()));
    ring.check_invariants().unwrap();
});
