use criterion::{BenchmarkId, Criterion};
use matchmaker_rs::{IntervalIndex, IntervalKey};
use std::hint::black_box;

/// Build an index of `count` disjoint windows
fn populated_index(count: u32) -> IntervalIndex<u32> {
    let mut index = IntervalIndex::new();
    for i in 0..count {
        let _ = index.insert_or_find_overlap(IntervalKey::new(i * 10, i * 10 + 4), i);
    }
    index
}

/// Register benchmarks for probing a populated index
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("IntervalIndex - Probe");

    for size in [16u32, 256, 4096].iter() {
        group.bench_with_input(BenchmarkId::new("find_overlap_hit", size), size, |b, &size| {
            let index = populated_index(size);
            b.iter(|| black_box(index.find_overlap(&IntervalKey::new(size * 5, size * 5 + 1))))
        });

        group.bench_with_input(BenchmarkId::new("find_overlap_miss", size), size, |b, &size| {
            let index = populated_index(size);
            b.iter(|| black_box(index.find_overlap(&IntervalKey::new(size * 5 + 6, size * 5 + 8))))
        });
    }

    group.finish();
}
