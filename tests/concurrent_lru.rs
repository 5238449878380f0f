// ==============================================
// CONCURRENT LRU TESTS (integration)
// ==============================================
//
// Shared-access checks for the lock-guarded wrapper.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use boundkit::policy::concurrent_lru::ConcurrentLruCache;

#[test]
fn parallel_writers_respect_capacity() {
    let cache = Arc::new(ConcurrentLruCache::new(128));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..5_000u64 {
                    let key = (t as u64) * 10_000 + i % 200;
                    cache.put(key, i);
                    let _ = cache.get(&key);
                    if i % 7 == 0 {
                        cache.remove(&key);
                    }
                    assert!(cache.len() <= 128);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let inner = Arc::try_unwrap(cache).ok().unwrap().into_inner();
    assert!(inner.len() <= 128);
    inner.check_invariants().unwrap();
}

#[test]
fn readers_and_writers_interleave() {
    let cache = Arc::new(ConcurrentLruCache::new(16));
    for k in 0..16u32 {
        cache.put(k, k * 2);
    }

    let reader = {
        let cache = cache.clone();
        thread::spawn(move || {
            for _ in 0..10_000 {
                for k in 0..16u32 {
                    if let Some(v) = cache.peek(&k) {
                        assert_eq!(v % 2, 0);
                    }
                }
            }
        })
    };

    for round in 0..1_000u32 {
        cache.put(16 + round, round * 2);
    }
    reader.join().unwrap();
    assert_eq!(cache.len(), 16);
}
