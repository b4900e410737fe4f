//! Performance benchmarks for EVONET

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evonet::{Config, Network, Trainer, TrainingSet, Unit};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_unit_evaluate(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut unit = Unit::new(16);
    unit.randomise(10.0, &mut rng);
    let inputs = [0.5f32; 16];

    c.bench_function("unit_evaluate", |b| {
        b.iter(|| unit.evaluate(black_box(&inputs)).unwrap())
    });
}

fn benchmark_network_run(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let net = Network::new(8, &[6, 4, 1], true, 10.0, &mut rng);
    let inputs = [0.5f32; 8];

    c.bench_function("network_run", |b| {
        b.iter(|| net.run(black_box(&inputs)).unwrap())
    });
}

fn benchmark_generation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");
    let data = TrainingSet::logical_or();

    for pool_size in [100, 500, 1000].iter() {
        let mut config = Config::default();
        config.evolution.pool_size = *pool_size;
        config.network.sigmoid_output = true;

        let mut trainer = Trainer::new_with_seed(&config, 42);

        // Warm up
        for _ in 0..5 {
            trainer.step(&data).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("pool", pool_size), pool_size, |b, _| {
            b.iter(|| {
                trainer.step(&data).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_unit_evaluate,
    benchmark_network_run,
    benchmark_generation_step
);
criterion_main!(benches);
