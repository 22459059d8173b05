use std::ops::{Index, Range, RangeFull};

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, Deck, PokerError};

/// `FlatDeck` is the playing deck used for a single trial.
///
/// It is a fixed arena of card slots plus a cursor. Dealing hands out the
/// card under the cursor and advances it, burning advances it without
/// handing anything out. Shuffling permutes every slot and rewinds the
/// cursor, so the same `FlatDeck` can be reused for every trial without
/// reallocating.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
    /// Index of the next card to be dealt.
    cursor: usize,
}

impl FlatDeck {
    /// How many cards are left to deal?
    pub fn len(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots, dealt or not.
    pub fn capacity(&self) -> usize {
        self.cards.len()
    }

    /// The cards that have not been dealt yet, in dealing order.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.cursor..]
    }

    /// Randomly shuffle every slot and rewind the cursor.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cursor = 0;
        self.cards.shuffle(rng)
    }

    /// Put every dealt card back without changing the order.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Deal a card if there is one there to deal.
    /// None if the deck is empty
    ///
    /// ```
    /// use holdem_equity::core::{Card, FlatDeck, Suit, Value};
    ///
    /// let ace = Card::new(Value::Ace, Suit::Club);
    /// let mut deck: FlatDeck = vec![ace].into();
    ///
    /// assert_eq!(Some(ace), deck.deal());
    /// assert_eq!(None, deck.deal());
    /// ```
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }

    /// Deal `n` cards at once.
    pub fn deal_n(&mut self, n: usize) -> Result<&[Card], PokerError> {
        self.ensure(n)?;
        let start = self.cursor;
        self.cursor += n;
        Ok(&self.cards[start..self.cursor])
    }

    /// Discard the top card.
    pub fn burn(&mut self) -> Result<(), PokerError> {
        self.ensure(1)?;
        self.cursor += 1;
        Ok(())
    }

    fn ensure(&self, requested: usize) -> Result<(), PokerError> {
        let remaining = self.len();
        if requested > remaining {
            return Err(PokerError::InsufficientDeck {
                requested,
                remaining,
            });
        }
        Ok(())
    }
}

impl Index<usize> for FlatDeck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}
impl Index<Range<usize>> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: Range<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeFull> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for FlatDeck {
    fn from(value: Vec<Card>) -> Self {
        Self {
            cards: value,
            cursor: 0,
        }
    }
}

/// Allow creating a flat deck from a Deck
impl From<Deck> for FlatDeck {
    /// Flatten this deck, producing a `FlatDeck` that's
    /// easier to get random access to.
    ///
    /// The slots start in the deck's fixed order so that the same input
    /// cards and the same rng always produce the same shuffle.
    fn from(value: Deck) -> Self {
        value.into_iter().collect::<Vec<Card>>().into()
    }
}

impl Default for FlatDeck {
    /// The full 52 card deck in its fixed order. Shuffle before dealing.
    fn default() -> Self {
        Deck::default().into()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::card::{Suit, Value};

    #[test]
    fn test_deck_from() {
        let fd: FlatDeck = Deck::default().into();
        assert_eq!(52, fd.len());
    }

    #[test]
    fn test_from_vec() {
        let c = Card {
            value: Value::Nine,
            suit: Suit::Heart,
        };
        let v = vec![c];

        let mut flat_deck: FlatDeck = v.into();

        assert_eq!(1, flat_deck.len());
        assert_eq!(c, flat_deck.deal().unwrap());
        assert!(flat_deck.is_empty());
    }

    #[test]
    fn test_shuffle_rng() {
        let mut fd_one = FlatDeck::default();
        let mut fd_two = FlatDeck::default();

        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);

        fd_one.shuffle(&mut rng_one);
        fd_two.shuffle(&mut rng_two);

        assert_eq!(fd_one, fd_two);
    }

    #[test]
    fn test_burn_skips_a_card() {
        let mut fd = FlatDeck::default();
        let second = fd[1];
        fd.burn().unwrap();
        assert_eq!(Some(second), fd.deal());
        assert_eq!(50, fd.len());
        assert_eq!(52, fd.capacity());
    }

    #[test]
    fn test_deal_n() {
        let mut fd = FlatDeck::default();
        let expected = fd[0..3].to_vec();
        assert_eq!(expected, fd.deal_n(3).unwrap());
        assert_eq!(49, fd.remaining().len());
    }

    #[test]
    fn test_insufficient_deck() {
        let mut fd: FlatDeck = vec![Card::new(Value::Two, Suit::Club)].into();
        assert!(matches!(
            fd.deal_n(2),
            Err(PokerError::InsufficientDeck {
                requested: 2,
                remaining: 1
            })
        ));
        fd.deal();
        assert!(matches!(
            fd.burn(),
            Err(PokerError::InsufficientDeck { .. })
        ));
    }

    #[test]
    fn test_shuffle_rewinds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut fd = FlatDeck::default();
        fd.deal_n(10).unwrap();
        fd.shuffle(&mut rng);
        assert_eq!(52, fd.len());

        let mut seen = fd.remaining().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(52, seen.len());
    }
}
