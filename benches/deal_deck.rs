#[macro_use]
extern crate criterion;
extern crate holdem_equity;

use holdem_equity::core::{Deck, FlatDeck};
use rand::rng;

fn deal_all_flat_deck(c: &mut criterion::Criterion) {
    let mut rng = rng();
    let mut flat_deck = FlatDeck::default();

    c.bench_function("deal all from FlatDeck", |b| {
        b.iter(|| {
            flat_deck.shuffle(&mut rng);
            while let Some(_card) = flat_deck.deal() {}
        });
    });
}

fn deal_table_with_burns(c: &mut criterion::Criterion) {
    let mut rng = rng();
    let mut flat_deck = FlatDeck::default();

    c.bench_function("deal 8 holes and a burned board", |b| {
        b.iter(|| {
            flat_deck.shuffle(&mut rng);
            let holes = flat_deck.deal_n(16).map(|cards| cards.len()).unwrap_or(0);
            let mut board = 0;
            for street in [3, 1, 1] {
                if flat_deck.burn().is_ok() {
                    board += flat_deck.deal_n(street).map(|cards| cards.len()).unwrap_or(0);
                }
            }
            holes + board
        });
    });
}

fn remove_from_deck(c: &mut criterion::Criterion) {
    c.bench_function("remove two cards from Deck", |b| {
        b.iter(|| {
            let deck = Deck::default();
            let cards: Vec<_> = deck.iter().take(2).collect();
            deck.without(&cards).len()
        });
    });
}

criterion_group!(
    benches,
    deal_all_flat_deck,
    deal_table_with_burns,
    remove_from_deck
);
criterion_main!(benches);
