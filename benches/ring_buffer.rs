use std::hint::black_box;

use boundkit::ds::RingBuffer;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_ring_push_pop(c: &mut Criterion) {
    let mut ring = RingBuffer::new(1024);
    c.bench_function("ring_push_pop", |b| {
        b.iter(|| {
            for i in 0..1024u64 {
                let _ = ring.push(black_box(i));
            }
            while let Some(v) = ring.pop() {
                black_box(v);
            }
        })
    });
}

fn bench_ring_overwrite(c: &mut Criterion) {
    let mut ring = RingBuffer::with_overwrite(1024);
    c.bench_function("ring_overwrite", |b| {
        b.iter(|| {
            for i in 0..4096u64 {
                let _ = ring.push(black_box(i));
            }
        })
    });
}

criterion_group!(benches, bench_ring_push_pop, bench_ring_overwrite);
criterion_main!(benches);
