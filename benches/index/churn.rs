use criterion::Criterion;
use matchmaker_rs::{IntervalIndex, IntervalKey, Probe};
use std::hint::black_box;

/// Register benchmarks that mimic search processes inserting and removing windows
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("IntervalIndex - Churn");

    group.bench_function("insert_then_remove", |b| {
        b.iter(|| {
            let mut index = IntervalIndex::new();
            let mut handles = Vec::with_capacity(100);
            for i in 0..100u32 {
                if let Probe::Inserted(handle) =
                    index.insert_or_find_overlap(IntervalKey::new(i * 20, i * 20 + 9), i)
                {
                    handles.push(handle);
                }
            }
            for handle in handles {
                black_box(index.remove(handle));
            }
        })
    });

    group.bench_function("insert_then_collide", |b| {
        b.iter(|| {
            let mut index = IntervalIndex::new();
            for i in 0..100u32 {
                let _ = index.insert_or_find_overlap(IntervalKey::new(i * 20, i * 20 + 9), i);
            }
            for i in 0..100u32 {
                black_box(index.insert_or_find_overlap(IntervalKey::new(i * 20 + 5, i * 20 + 6), i));
            }
        })
    });

    group.finish();
}
