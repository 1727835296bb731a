mod contention;
mod run;

pub use contention::register_contention_benchmarks;

// Import the concurrent benchmarks into the main bench group
pub fn register_benchmarks(c: &mut criterion::Criterion) {
    run::register_benchmarks(c);
    register_contention_benchmarks(c);
}
