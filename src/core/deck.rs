use super::{Card, CardBitSet, CardBitSetIter};

/// Deck struct that can tell quickly if a card is in the deck.
///
/// A `Deck` is a template: it is cheap to copy and it iterates in a fixed
/// order (by value, then suit). Dealing happens from a `FlatDeck` built
/// out of it, so the template itself is never consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(CardBitSet);

impl Deck {
    /// Create a new empty deck
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// let deck = Deck::new();
    /// assert!(deck.is_empty());
    /// assert_eq!(0, deck.len());
    /// ```
    pub fn new() -> Self {
        Self(CardBitSet::new())
    }

    /// A copy of this deck with the given cards taken out.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Deck, Suit, Value};
    ///
    /// let ace = Card::new(Value::Ace, Suit::Heart);
    /// let deck = Deck::default();
    /// let smaller = deck.without(&[ace]);
    ///
    /// assert_eq!(52, deck.len());
    /// assert_eq!(51, smaller.len());
    /// assert!(!smaller.contains(&ace));
    /// ```
    pub fn without(&self, cards: &[Card]) -> Self {
        let mut deck = *self;
        for c in cards {
            deck.remove(c);
        }
        deck
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// Given a card remove it from the deck if it is present.
    pub fn remove(&mut self, c: &Card) -> bool {
        self.0.remove(*c)
    }

    /// Add a given card to the deck.
    pub fn insert(&mut self, c: Card) -> bool {
        self.0.insert(c)
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.0.count()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> CardBitSetIter {
        self.0.into_iter()
    }
}

impl Default for Deck {
    /// Create the default 52 card deck
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// assert_eq!(52, Deck::default().len());
    /// ```
    fn default() -> Self {
        Self(CardBitSet::full())
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = CardBitSetIter;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> CardBitSetIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::*;

    #[test]
    fn test_contains_in() {
        let d = Deck::default();
        assert!(d.contains(&Card {
            value: Value::Eight,
            suit: Suit::Heart,
        }));
    }

    #[test]
    fn test_remove() {
        let mut d = Deck::default();
        let c = Card {
            value: Value::Ace,
            suit: Suit::Heart,
        };
        assert!(d.contains(&c));
        assert!(d.remove(&c));
        assert!(!d.contains(&c));
        assert!(!d.remove(&c));
    }

    #[test]
    fn test_without_leaves_template() {
        let template = Deck::default();
        let hole = [
            Card::new(Value::Ace, Suit::Spade),
            Card::new(Value::Ace, Suit::Heart),
        ];
        let playing = template.without(&hole);
        assert_eq!(50, playing.len());
        assert_eq!(52, template.len());
        assert!(template.contains(&hole[0]));
    }

    #[test]
    fn test_cartesian_product() {
        let cards: Vec<Card> = Deck::default().into_iter().collect();
        for v in Value::values() {
            for s in Suit::suits() {
                assert!(cards.contains(&Card::new(v, s)));
            }
        }
    }
}
