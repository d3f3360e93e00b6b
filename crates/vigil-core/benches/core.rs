//! Micro-benchmarks for the hot store/classification paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vigil_core::{status, Simulator, VitalField, VitalsStore};

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_heart_rate", |b| {
        b.iter(|| status::classify(VitalField::HeartRate, black_box(104.0)));
    });

    c.bench_function("overall_status", |b| {
        let store = VitalsStore::new();
        b.iter(|| status::overall(black_box(store.record())));
    });
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("simulator_tick", |b| {
        let mut sim = Simulator::new(7);
        let mut store = VitalsStore::new();
        b.iter(|| sim.tick(&mut store));
    });
}

criterion_group!(benches, bench_classify, bench_tick);
criterion_main!(benches);
