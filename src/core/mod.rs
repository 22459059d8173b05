//! This is the core module. It exports the non-holdem
//! related code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// Error types.
mod error;
pub use self::error::PokerError;

/// A 64 bit set of cards.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Code related to cards in hands.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Flattened deck that cards are dealt from.
mod flat_deck;
/// Export the playing deck.
pub use self::flat_deck::FlatDeck;

/// Best hand ranking from five or more cards.
mod rank;
/// Export the trait and the results.
pub use self::rank::{HandCategory, Rank, Rankable, TieBreakKey, break_tie, classify};
