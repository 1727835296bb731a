use criterion::{BenchmarkId, Criterion};
use matchmaker_rs::{IntervalIndex, IntervalKey, Probe};
use parking_lot::Mutex;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Register benchmarks of many threads sharing one locked index
pub fn register_contention_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("IntervalIndex - Lock Contention");

    for thread_count in [2usize, 8, 16].iter() {
        group.bench_with_input(
            BenchmarkId::new("probe_and_remove", thread_count),
            thread_count,
            |b, &thread_count| b.iter_custom(|iters| measure_contention(thread_count, iters)),
        );
    }

    group.finish();
}

/// Every thread repeatedly probes a window around its own rating and removes it
/// again if nobody collided with it, as a search process does.
fn measure_contention(thread_count: usize, iterations: u64) -> Duration {
    let index: Arc<Mutex<IntervalIndex<usize>>> = Arc::new(Mutex::new(IntervalIndex::new()));
    let barrier = Arc::new(Barrier::new(thread_count + 1)); // +1 for main thread

    let handles: Vec<_> = (0..thread_count)
        .map(|thread_id| {
            let index = Arc::clone(&index);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let rating = 1500 + (thread_id as u32) * 40;
                for _ in 0..iterations {
                    let probe = index
                        .lock()
                        .insert_or_find_overlap(IntervalKey::around(rating, 30), thread_id);
                    if let Probe::Inserted(handle) = probe {
                        let _ = index.lock().remove(handle);
                    }
                }
            })
        })
        .collect();

    let start = Instant::now();
    barrier.wait();
    for handle in handles {
        handle.join().expect("bench thread panicked");
    }
    start.elapsed()
}
