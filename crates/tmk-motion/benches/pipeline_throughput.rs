use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tmk_motion::synthetic::random_walk_dataset;
use tmk_motion::{analyze_tracks, BatchOpts};

fn pipeline_bench(c: &mut Criterion) {
    let samples = random_walk_dataset(50, 600, 0.5, Some(3.0), 42);
    let opts = BatchOpts::default();
    c.bench_function("analyze_tracks_50x600", |b| {
        b.iter(|| {
            let report = analyze_tracks(black_box(&samples), &opts);
            black_box(report);
        });
    });
}

criterion_group!(benches, pipeline_bench);
criterion_main!(benches);
