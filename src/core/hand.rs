use std::ops::{Index, RangeFull};
use std::slice::Iter;

use super::{Card, CardBitSet, PokerError, Suit, Value};

/// An ordered collection of cards. Two hole cards before the board is
/// dealt, seven once it has been.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create a new empty hand
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    ///
    /// let hand = Hand::new();
    ///
    /// assert!(hand.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(7),
        }
    }

    pub fn new_with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// From a str create a new hand.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    /// let hand = Hand::new_from_str("AdKd").unwrap();
    /// assert_eq!(2, hand.len());
    /// ```
    ///
    /// Anything that can't be parsed will return an error.
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    /// let hand = Hand::new_from_str("AdKx");
    /// assert!(hand.is_err());
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        let mut chars = hand_string.chars();
        let mut seen = CardBitSet::new();
        let mut cards = Vec::with_capacity(hand_string.len() / 2);

        // Keep looping until we explicitly break
        loop {
            let vco = chars.next();
            if vco.is_none() {
                break;
            } else {
                let sco = chars.next();
                let v = vco
                    .and_then(Value::from_char)
                    .ok_or(PokerError::UnexpectedValueChar)?;
                let s = sco
                    .and_then(Suit::from_char)
                    .ok_or(PokerError::UnexpectedSuitChar)?;

                let c = Card { value: v, suit: s };

                if !seen.insert(c) {
                    return Err(PokerError::DuplicateCardInHand(c));
                }
                cards.push(c);
            }
        }

        Ok(Self { cards })
    }

    /// Add a card to the end of the hand.
    pub fn push(&mut self, c: Card) {
        self.cards.push(c);
    }

    /// Drop every card after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.cards.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    pub fn iter(&self) -> Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
    }
}

impl<'a> Extend<&'a Card> for Hand {
    fn extend<T: IntoIterator<Item = &'a Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
    }
}

impl Index<usize> for Hand {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl Index<RangeFull> for Hand {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

impl AsRef<[Card]> for Hand {
    fn as_ref(&self) -> &[Card] {
        &self.cards
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_card() {
        let mut h = Hand::new();
        h.push(Card::new(Value::Three, Suit::Spade));
        assert_eq!(1, h.len());
        assert!(h.contains(&Card::new(Value::Three, Suit::Spade)));
    }

    #[test]
    fn test_parse_keeps_order() {
        let h = Hand::new_from_str("9h2cAs").unwrap();
        assert_eq!(
            vec![
                Card::new(Value::Nine, Suit::Heart),
                Card::new(Value::Two, Suit::Club),
                Card::new(Value::Ace, Suit::Spade),
            ],
            h.cards()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Hand::new_from_str("Zd"),
            Err(PokerError::UnexpectedValueChar)
        ));
        assert!(matches!(
            Hand::new_from_str("A"),
            Err(PokerError::UnexpectedSuitChar)
        ));
        assert!(matches!(
            Hand::new_from_str("AdAd"),
            Err(PokerError::DuplicateCardInHand(_))
        ));
    }

    #[test]
    fn test_truncate_and_extend() {
        let mut h = Hand::new_from_str("AdKd").unwrap();
        let board = Hand::new_from_str("2c3c4c5c6c").unwrap();
        h.extend(board.iter());
        assert_eq!(7, h.len());
        h.truncate(2);
        assert_eq!(Hand::new_from_str("AdKd").unwrap(), h);
    }
}
