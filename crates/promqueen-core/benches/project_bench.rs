use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use promqueen_core::{Projector, StrategyKind};

fn wave(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.01).sin() * 100.0 + i as f64 * 0.001).collect()
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for &n in &[60usize, 10_000, 50_000] {
        let points = wave(n);
        for kind in StrategyKind::ALL {
            let projector = Projector::from_kind(kind);
            group.bench_with_input(
                BenchmarkId::new(kind.name(), n),
                &points,
                |b, pts| b.iter(|| projector.project(black_box(pts), 200, 60).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_project);
criterion_main!(benches);
