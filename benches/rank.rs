#[macro_use]
extern crate criterion;
extern crate holdem_equity;

use criterion::Criterion;
use holdem_equity::core::{FlatDeck, Hand, Rankable, break_tie, classify};
use rand::{SeedableRng, rngs::StdRng};

fn sample(n: usize) -> Hand {
    let mut rng = StdRng::seed_from_u64(0);
    let mut deck = FlatDeck::default();
    deck.shuffle(&mut rng);
    Hand::new_with_cards(deck[0..n].to_vec())
}

fn rank_one(c: &mut Criterion) {
    let hand = sample(5);
    c.bench_function("Rank one 5 card hand", move |b| b.iter(|| hand.rank()));
}

fn rank_best_seven(c: &mut Criterion) {
    let hand = sample(7);
    c.bench_function("Rank best 5card hand from 7", move |b| {
        b.iter(|| hand.rank())
    });
}

fn tie_break(c: &mut Criterion) {
    let a = classify(&Hand::new_from_str("AdKc9h7s4c3d2h").unwrap()[..]).unwrap();
    let b = classify(&Hand::new_from_str("AhKs9c7d4h3s2s").unwrap()[..]).unwrap();
    c.bench_function("Break a high card tie", move |bench| {
        bench.iter(|| break_tie(&a, &b))
    });
}

criterion_group!(benches, rank_one, rank_best_seven, tie_break);
criterion_main!(benches);
