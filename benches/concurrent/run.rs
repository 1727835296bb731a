use criterion::{BenchmarkId, Criterion};
use matchmaker_rs::{Coordinator, MatchmakerConfig};
use std::time::Duration;

/// Register benchmarks of complete coordinator runs
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Coordinator - Full Run");
    group.sample_size(10);

    for entity_count in [10usize, 50].iter() {
        group.bench_with_input(
            BenchmarkId::new("run_to_cap_200", entity_count),
            entity_count,
            |b, &entity_count| {
                b.iter(|| {
                    let config = MatchmakerConfig::default()
                        .with_entity_count(entity_count)
                        .with_pairing_cap(200)
                        .with_wait_interval(Duration::from_millis(1))
                        .with_max_start_delay(Duration::ZERO)
                        .with_record_history(false);
                    let coordinator = Coordinator::new(config).expect("valid config");
                    coordinator.run().expect("run succeeds")
                })
            },
        );
    }

    group.finish();
}
