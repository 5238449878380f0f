#![no_main]

use boundkit::policy::lru::LruCache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let key = pair[1] % 32;
        match pair[0] % 7 {
            0 => {
                let was_full = cache.len() == capacity;
                let existed = cache.contains(&key);
                cache.put(key, step as u32);
                assert_eq!(cache.peek(&key), Some(&(step as u32)));
                if was_full && !existed {
                    assert_eq!(cache.len(), capacity);
                }
            }
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.iter().next().map(|(k, _)| *k), Some(key));
                }
            }
            2 => {
                let existed = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), existed);
                assert!(!cache.contains(&key));
            }
            3 => {
                let expected = cache.peek_lru().map(|(k, _)| *k);
                assert_eq!(cache.pop_lru().map(|(k, _)| k), expected);
            }
            4 => {
                let _ = cache.touch(&key);
            }
            5 => {
                let _ = cache.peek(&key);
            }
            _ => {
                if pair[1] == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }
        assert!(cache.len() <= capacity);
    }

    cache.check_invariants().unwrap();
});
