use std::fmt;

use super::PokerError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 in `0..13` and convert it to a value.
    ///
    /// Anything larger saturates to `Value::Ace`.
    pub fn from_u8(v: u8) -> Self {
        VALUES[usize::from(v.min(12))]
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck, or
    /// generating all possible starting hands.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// The numeric poker rank, 2 through 14 with the ace high.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(14, Value::Ace.rank());
    /// assert_eq!(2, Value::Two.rank());
    /// ```
    pub fn rank(self) -> u8 {
        self as u8 + 2
    }

    /// Build a value from its numeric poker rank (2 through 14).
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            2..=14 => Some(VALUES[usize::from(rank - 2)]),
            _ => None,
        }
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the ascii range (It should
    /// be).
    ///
    /// @returns None if there's no value there.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }

    /// How many ranks seperate the two values.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    /// assert_eq!(1, Value::Ace.gap(Value::King));
    /// assert_eq!(1, Value::King.gap(Value::Ace));
    /// ```
    pub fn gap(self, other: Self) -> u8 {
        (self as u8).abs_diff(other as u8)
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards,
/// and it follows the suit letters (c < d < h < s).
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Clubs
    Club = 0,
    /// Diamonds
    Diamond = 1,
    /// Hearts
    Heart = 2,
    /// Spades
    Spade = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

/// Impl of Suit
///
/// This is just here to provide a list of all `Suit`'s.
impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Translate a suit from a u8. Anything larger than 3 saturates to
    /// spades.
    pub fn from_u8(s: u8) -> Self {
        SUITS[usize::from(s.min(3))]
    }

    /// Parse a suit from its lower case letter.
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'd' => Some(Self::Diamond),
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// This suit to a character.
    pub fn to_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Club => 'c',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
///
/// Cards order by value first and suit second, which is also the canonical
/// order used for pocket hand labels.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        (card.value as u8) * 4 + (card.suit as u8)
    }
}

impl From<u8> for Card {
    fn from(value: u8) -> Self {
        Self {
            value: Value::from_u8(value / 4),
            suit: Suit::from_u8(value % 4),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = PokerError;

    /// Parse the two character form, value then suit.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// let card = Card::try_from("Kh").unwrap();
    /// assert_eq!(Card::new(Value::King, Suit::Heart), card);
    /// ```
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let v = chars
            .next()
            .ok_or(PokerError::TooFewChars)
            .map(Value::from_char)?
            .ok_or(PokerError::UnexpectedValueChar)?;
        let s = chars
            .next()
            .ok_or(PokerError::TooFewChars)
            .map(Suit::from_char)?
            .ok_or(PokerError::UnexpectedSuitChar)?;
        if chars.next().is_some() {
            return Err(PokerError::UnparsedCharsRemaining);
        }
        Ok(Self::new(v, s))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_constructor() {
        let c = Card {
            value: Value::Three,
            suit: Suit::Spade,
        };
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_compare() {
        let c1 = Card::new(Value::Three, Suit::Spade);
        let c2 = Card::new(Value::Four, Suit::Spade);
        let c3 = Card::new(Value::Four, Suit::Club);

        assert!(c1 == c1);
        // Values dominate
        assert!(c1 < c2);
        assert!(c1 < c3);
        // Then suit letters
        assert!(c3 < c2);
    }

    #[test]
    fn test_value_cmp() {
        assert!(Value::Two < Value::Ace);
        assert!(Value::King < Value::Ace);
        assert_eq!(Value::Two, Value::Two);
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(Value::Two, Value::from_u8(0));
        assert_eq!(Value::Ace, Value::from_u8(12));
        assert_eq!(Value::Ace, Value::from_u8(200));
    }

    #[test]
    fn test_rank_round_trip() {
        for v in Value::values() {
            assert_eq!(Some(v), Value::from_rank(v.rank()));
        }
        assert_eq!(None, Value::from_rank(1));
        assert_eq!(None, Value::from_rank(15));
    }

    #[test]
    fn test_card_u8_round_trip() {
        for i in 0..52 {
            let card = Card::from(i);
            assert_eq!(i, u8::from(card));
        }
    }

    #[test]
    fn test_char_round_trip() {
        for v in Value::values() {
            assert_eq!(Some(v), Value::from_char(v.to_char()));
        }
        for s in Suit::suits() {
            assert_eq!(Some(s), Suit::from_char(s.to_char()));
        }
    }

    #[test]
    fn test_parse_card() {
        assert_eq!(
            Card::new(Value::Ten, Suit::Spade),
            Card::try_from("Ts").unwrap()
        );
        assert!(matches!(
            Card::try_from("Xs"),
            Err(PokerError::UnexpectedValueChar)
        ));
        assert!(matches!(
            Card::try_from("Tx"),
            Err(PokerError::UnexpectedSuitChar)
        ));
        assert!(matches!(Card::try_from("T"), Err(PokerError::TooFewChars)));
        assert!(matches!(
            Card::try_from("Tsh"),
            Err(PokerError::UnparsedCharsRemaining)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!("Kh", Card::new(Value::King, Suit::Heart).to_string());
        assert_eq!("2c", Card::new(Value::Two, Suit::Club).to_string());
    }

    #[test]
    fn test_size() {
        // Card should be really small. Hopefully just two u8's
        assert!(mem::size_of::<Card>() <= 4);
    }
}
