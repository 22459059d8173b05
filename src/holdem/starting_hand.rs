use crate::core::{Card, Suit, Value};
use crate::holdem::PocketHand;

/// Enum to represent how the suits of a hand correspond to each other.
/// `Suitedness::Suited` will mean that all cards have the same suit
/// `Suitedness::OffSuit` will mean that all cards have the different suit
/// `Suitedness::Any` makes no promises.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy)]
pub enum Suitedness {
    /// All of the cards are the same suit
    Suited,
    /// None of the cards are the same suit
    OffSuit,
    /// No promises about suit.
    Any,
}

/// `StartingHand` represents the two card starting hand of texas holdem
/// with the suits abstracted away, like "AKs" or "72o".
/// It can generate all the possible actual pocket hands.
///
/// Give two values and if you only want suited variants.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone)]
pub struct StartingHand {
    /// The first value.
    value_one: Value,
    /// The second value.
    value_two: Value,
    /// should we only consider possible starting hands of the same suit?
    suited: Suitedness,
}

impl StartingHand {
    pub fn new(value_one: Value, value_two: Value, suited: Suitedness) -> Self {
        Self {
            value_one,
            value_two,
            suited,
        }
    }

    /// Is this starting hand a pocket pair?
    pub fn is_pair(&self) -> bool {
        self.value_one == self.value_two
    }

    pub fn suitedness(&self) -> Suitedness {
        self.suited
    }

    fn pocket(&self, suit_one: Suit, suit_two: Suit) -> Option<PocketHand> {
        PocketHand::new(
            Card::new(self.value_one, suit_one),
            Card::new(self.value_two, suit_two),
        )
        .ok()
    }

    /// Create a new vector of all suited hands.
    fn create_suited(&self) -> Vec<PocketHand> {
        // Can't have a suited pair. Not unless you're cheating.
        if self.is_pair() {
            return vec![];
        }
        Suit::suits()
            .iter()
            .filter_map(|s| self.pocket(*s, *s))
            .collect()
    }

    /// Create a new vector of all the off suit hands.
    fn create_offsuit(&self) -> Vec<PocketHand> {
        // Since the values are the same there is no reason to swap the suits.
        let expected_hands = if self.is_pair() { 6 } else { 12 };
        self.append_offsuit(Vec::with_capacity(expected_hands))
    }

    /// Append all the off suit hands to the passed in vec and
    /// then return it.
    fn append_offsuit(&self, mut hands: Vec<PocketHand>) -> Vec<PocketHand> {
        let suits = Suit::suits();
        for (i, suit_one) in suits.iter().enumerate() {
            for suit_two in &suits[i + 1..] {
                hands.extend(self.pocket(*suit_one, *suit_two));

                // If this isn't a pair then the flipped suits is needed.
                if !self.is_pair() {
                    hands.extend(self.pocket(*suit_two, *suit_one));
                }
            }
        }
        hands
    }

    /// Get all the possible pocket hands represented by the
    /// two values of this starting hand.
    pub fn possible_hands(&self) -> Vec<PocketHand> {
        match self.suited {
            Suitedness::Suited => self.create_suited(),
            Suitedness::OffSuit => self.create_offsuit(),
            Suitedness::Any => self.append_offsuit(self.create_suited()),
        }
    }

    /// Create every possible unique StartingHand, ignoring suits.
    pub fn all() -> Vec<StartingHand> {
        let mut hands = Vec::with_capacity(91);
        let values = Value::values();
        for (i, value_one) in values.iter().enumerate() {
            for value_two in &values[i..] {
                hands.push(StartingHand {
                    value_one: *value_one,
                    value_two: *value_two,
                    suited: Suitedness::Any,
                });
            }
        }
        hands
    }
}
