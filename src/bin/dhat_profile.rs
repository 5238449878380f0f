//! DHAT heap profiler for boundkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>
//!
//! Every container preallocates at construction, so the steady-state
//! workloads below should show no allocation growth past setup.

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::thread;

use boundkit::ds::{RingBuffer, spsc};
use boundkit::policy::lru::LruCache;
use boundkit::traits::CoreCache;

/// XorShift64 for deterministic key streams.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// 90% of accesses hit the first 10% of the key space.
fn hotset_workload<C: CoreCache<u64, u64>>(cache: &mut C, operations: usize, universe: u64) {
    let mut rng = XorShift64::new(42);
    let hot = universe / 10;
    for _ in 0..operations {
        let key = if rng.next_u64() % 10 != 0 {
            rng.next_u64() % hot
        } else {
            hot + rng.next_u64() % (universe - hot)
        };
        if cache.get(&key).is_none() {
            cache.insert(key, key);
        }
    }
}

fn profile_lru() {
    println!("=== Profiling LRU ===");
    let capacity = 4096;
    let mut cache = LruCache::new(capacity);

    for i in 0..capacity as u64 {
        cache.put(i, i);
    }
    hotset_workload(&mut cache, 100_000, 16_384);
    // Eviction churn: every insert displaces the LRU entry.
    for i in 0..25_000u64 {
        cache.put(1_000_000 + i, i);
    }

    println!("  Final size: {}", cache.len());
}

fn profile_spsc() {
    println!("=== Profiling SPSC ===");
    let items = 200_000u64;
    let (mut tx, mut rx) = spsc::channel::<u64>(1024);

    let producer = thread::spawn(move || {
        for i in 0..items {
            let mut value = i;
            while let Err(back) = tx.push(value) {
                value = back;
                std::hint::spin_loop();
            }
        }
    });

    let mut received = 0u64;
    while received < items {
        match rx.pop() {
            Some(_) => received += 1,
            None => std::hint::spin_loop(),
        }
    }
    let _ = producer.join();

    println!("  Items transferred: {}", received);
}

fn profile_ring_buffer() {
    println!("=== Profiling RingBuffer ===");
    let mut ring = RingBuffer::with_overwrite(4096);
    for i in 0..100_000u64 {
        let _ = ring.push(i);
    }
    println!("  Final size: {}", ring.len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("boundkit DHAT Heap Profiling");
    println!("============================\n");

    profile_lru();
    profile_spsc();
    profile_ring_buffer();

    println!("\n============================");
    println!("Profile written to dhat-heap.json");
}
