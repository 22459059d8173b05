#[macro_use]
extern crate criterion;
extern crate holdem_equity;

use criterion::Criterion;
use holdem_equity::holdem::{EquitySweepBuilder, PocketHand};

fn sweep_premium_hands(c: &mut Criterion) {
    let hands: Vec<PocketHand> = ["AsAh", "KsKh", "QsQh", "AsKs", "JcTc"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let sweep = EquitySweepBuilder::default()
        .hands(hands)
        .trials(200)
        .seed(0)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("equity_sweep");
    group.sample_size(10);
    group.bench_function("5 hands x 8 table sizes x 200 trials", |b| {
        b.iter(|| sweep.run())
    });
    group.finish();
}

criterion_group!(benches, sweep_premium_hands);
criterion_main!(benches);
