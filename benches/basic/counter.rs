//! Single-threaded cost of the counter operations

use criterion::{black_box, BenchmarkId, Criterion};
use tallyx::{MemoryOrdering, SharedCounter};

const ORDERINGS: [MemoryOrdering; 3] = [
    MemoryOrdering::Relaxed,
    MemoryOrdering::AcquireRelease,
    MemoryOrdering::SequentiallyConsistent,
];

pub fn bench_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter");

    for ordering in ORDERINGS {
        group.bench_with_input(
            BenchmarkId::new("increment_1000", format!("{:?}", ordering)),
            &ordering,
            |b, &ordering| {
                b.iter(|| {
                    let counter = SharedCounter::with_ordering(ordering);
                    for _ in 0..1000 {
                        counter.increment();
                    }
                    black_box(counter.read())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("read_1000", format!("{:?}", ordering)),
            &ordering,
            |b, &ordering| {
                let counter = SharedCounter::with_ordering(ordering);
                b.iter(|| {
                    let mut sum = 0u64;
                    for _ in 0..1000 {
                        sum = sum.wrapping_add(counter.read());
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}
