use std::fmt::Debug;
use std::ops::{BitOr, BitOrAssign, Not};

use super::Card;

/// This struct is a bitset for cards
/// Each card is represented by a bit in a 64 bit integer
///
/// The bit is set if the card present
/// The bit is unset if the card not in the set
///
/// Used to exclude known cards from a deck and to reject duplicate cards
/// before ranking.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardBitSet {
    // The bitset
    cards: u64,
}

const FIFTY_TWO_ONES: u64 = (1 << 52) - 1;

impl CardBitSet {
    /// Create a new empty bitset
    ///
    /// ```
    /// use holdem_equity::core::CardBitSet;
    /// let cards = CardBitSet::new();
    /// assert!(cards.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { cards: 0 }
    }

    /// Every card of the 52 card deck.
    ///
    /// ```
    /// use holdem_equity::core::CardBitSet;
    ///
    /// assert_eq!(52, CardBitSet::full().count());
    /// ```
    pub fn full() -> Self {
        Self {
            cards: FIFTY_TWO_ONES,
        }
    }

    /// Insert a card, returning true if it was not already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1 << u8::from(card);
        let added = self.cards & bit == 0;
        self.cards |= bit;
        added
    }

    /// Remove a card from the bitset, returning true if it was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1 << u8::from(card);
        let present = self.cards & bit != 0;
        self.cards &= !bit;
        present
    }

    /// Is the card in the bitset ?
    pub fn contains(&self, card: Card) -> bool {
        (self.cards & (1 << u8::from(card))) != 0
    }

    /// Is the bitset empty ?
    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// How many cards are in the bitset ?
    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    /// Build a set out of cards, failing on the first card seen twice.
    pub fn from_distinct<'a, I>(cards: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut set = Self::new();
        for card in cards {
            if !set.insert(*card) {
                return None;
            }
        }
        Some(set)
    }
}

impl BitOr<Card> for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Card) -> Self::Output {
        Self {
            cards: self.cards | (1 << u8::from(rhs)),
        }
    }
}

impl BitOrAssign<Card> for CardBitSet {
    fn bitor_assign(&mut self, rhs: Card) {
        self.cards |= 1 << u8::from(rhs);
    }
}

impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            cards: !self.cards & FIFTY_TWO_ONES, // Ensure we only keep the first 52 bits
        }
    }
}

/// The iterator for the CardBitSet
/// It iterates over the cards in the bitset, lowest card first.
pub struct CardBitSetIter(u64);

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardBitSetIter(self.cards)
    }
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let card = self.0.trailing_zeros();
        self.0 &= !(1 << card);

        Some(Card::from(card as u8))
    }
}

impl Debug for CardBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(*self).finish()
    }
}
