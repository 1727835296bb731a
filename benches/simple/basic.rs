use criterion::Criterion;
use matchmaker_rs::{Outcome, RatingModel};
use std::hint::black_box;

pub fn benchmark_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("Basic Rating Operations");

    group.bench_function("expectation", |b| {
        b.iter(|| RatingModel::expectation(black_box(1930), black_box(1870)))
    });

    group.bench_function("apply_pairing", |b| {
        let model = RatingModel::new(60.0);
        b.iter(|| model.apply(black_box(Outcome::Win), black_box(1900), black_box(1900)))
    });

    group.finish();
}
