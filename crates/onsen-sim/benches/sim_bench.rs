use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;

fn bench_days(c: &mut Criterion) {
    let mut resort = onsen_core::Resort::new("Bench Springs");
    resort.money = 10_000_000;
    resort
        .build_pool("Moonlight Bath", onsen_core::PoolSize::Large, 41.0)
        .unwrap();
    resort
        .build_pool("River Stone", onsen_core::PoolSize::Medium, 39.0)
        .unwrap();
    resort
        .build_facility(onsen_core::Facility::restaurant("Noodle Stand", "Japanese", 1))
        .unwrap();
    for i in 0..6 {
        resort.roster.staff.push(onsen_core::Staff::new(
            format!("Staff {i}"),
            onsen_core::StaffRole::Cleaner,
            3,
        ));
    }
    let config = onsen_core::SimConfig::default();
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(config.rng_seed);
    c.bench_function("advance_one_day", |b| {
        b.iter(|| {
            onsen_sim::advance_one_day_with(&mut resort, &config, &mut rng);
        })
    });
}

criterion_group!(benches, bench_days);
criterion_main!(benches);
