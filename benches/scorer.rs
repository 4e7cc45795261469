use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crop_advisor_rust::SuitabilityScorer;

fn bench_scorer(c: &mut Criterion) {
    let scorer = SuitabilityScorer::new().expect("builtin catalog must validate");

    c.bench_function("score_ranked_loamy", |b| {
        b.iter(|| {
            scorer.score(
                black_box("Loamy"),
                black_box(22.0),
                black_box(90.0),
                black_box(65.0),
            )
        })
    });

    c.bench_function("score_fallback_unknown_soil", |b| {
        b.iter(|| {
            scorer.score(
                black_box("Unknown-Soil-XYZ"),
                black_box(22.0),
                black_box(90.0),
                black_box(65.0),
            )
        })
    });
}

criterion_group!(benches, bench_scorer);
criterion_main!(benches);
