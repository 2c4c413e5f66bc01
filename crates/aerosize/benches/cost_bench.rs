//! Criterion benchmarks for the CER set.

use aerosize::cost::{estimate_costs, CostInputs};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_costs(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost");
    group.bench_function("fifth_gen_fighter", |b| {
        let inputs = CostInputs::fifth_gen_fighter(43_352.3);
        b.iter(|| estimate_costs(&inputs).unwrap())
    });
    group.bench_function("random_airframes", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter_batched(
            || CostInputs {
                q: rng.gen_range(50.0..1_500.0),
                ..CostInputs::fifth_gen_fighter(rng.gen_range(10_000.0..80_000.0))
            },
            |inputs| estimate_costs(&inputs).unwrap(),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_costs);
criterion_main!(benches);
