use criterion::{criterion_group, criterion_main};

mod concurrent;
mod index;
mod simple;

use concurrent::register_benchmarks as register_concurrent_benchmarks;
use index::register_benchmarks as register_index_benchmarks;
use simple::basic::benchmark_data;

// Define the benchmark groups
criterion_group!(
    benches,
    benchmark_data,
    register_index_benchmarks,
    register_concurrent_benchmarks,
);

criterion_main!(benches);
