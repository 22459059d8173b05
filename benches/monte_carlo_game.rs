#[macro_use]
extern crate criterion;
extern crate holdem_equity;

use criterion::{BenchmarkId, Criterion};
use holdem_equity::holdem::{MonteCarloGame, PocketHand, winning_category_counts};
use rand::{SeedableRng, rngs::StdRng};

fn simulate_one_trial(c: &mut Criterion) {
    let hero: PocketHand = "AdAh".parse().unwrap();
    let mut group = c.benchmark_group("monte_carlo_single_trial");
    for opponents in [1, 3, 8] {
        let mut game = MonteCarloGame::new(hero, opponents, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(opponents as u64);
        group.bench_with_input(
            BenchmarkId::from_parameter(opponents),
            &opponents,
            |b, _| b.iter(|| game.simulate(&mut rng)),
        );
    }
    group.finish();
}

fn estimate_thousand(c: &mut Criterion) {
    let hero: PocketHand = "Ts9s".parse().unwrap();
    let mut game = MonteCarloGame::new(hero, 4, 1).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("Estimate equity over 1000 trials", |b| {
        b.iter(|| game.estimate_equity(1_000, &mut rng))
    });
}

fn winning_categories(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("Count winning categories over 1000 deals", |b| {
        b.iter(|| winning_category_counts(6, 1_000, &mut rng))
    });
}

criterion_group!(
    benches,
    simulate_one_trial,
    estimate_thousand,
    winning_categories
);
criterion_main!(benches);
