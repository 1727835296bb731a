pub mod churn;
pub mod probe;

// Import index benchmarks into the main bench group
pub fn register_benchmarks(c: &mut criterion::Criterion) {
    probe::register_benchmarks(c);
    churn::register_benchmarks(c);
}
