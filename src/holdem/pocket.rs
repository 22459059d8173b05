use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::StartingHand;
use crate::core::{Card, FlatDeck, Hand, PokerError, Value};

/// Two hole cards kept in canonical order.
///
/// The lower card (by value, then by suit letter) is always stored first,
/// so a given pair of cards has exactly one representation no matter what
/// order it was dealt in. That representation is also the text label used
/// by the equity table: each card in two character form joined by `_`.
///
/// ```
/// use holdem_equity::holdem::PocketHand;
///
/// let a: PocketHand = "Ah_Kd".parse().unwrap();
/// let b: PocketHand = "KdAh".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!("Kd_Ah", a.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PocketHand {
    low: Card,
    high: Card,
}

impl PocketHand {
    /// Build a pocket hand from two cards in any order.
    pub fn new(a: Card, b: Card) -> Result<Self, PokerError> {
        if a == b {
            return Err(PokerError::DuplicateCardInHand(a));
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Card {
        self.low
    }

    pub fn high(&self) -> Card {
        self.high
    }

    /// Both cards, lower first.
    pub fn cards(&self) -> [Card; 2] {
        [self.low, self.high]
    }

    /// A number in `0..52 * 52` unique to this hand.
    pub fn id(&self) -> u16 {
        u16::from(u8::from(self.low)) * 52 + u16::from(u8::from(self.high))
    }

    /// Both cards share a value.
    pub fn is_pair(&self) -> bool {
        self.low.value == self.high.value
    }

    /// Both cards share a suit.
    pub fn is_suited(&self) -> bool {
        self.low.suit == self.high.suit
    }

    /// The values are adjacent. The ace also connects with the deuce.
    pub fn is_connected(&self) -> bool {
        let (a, b) = (self.low.value, self.high.value);
        a.gap(b) == 1 || (a == Value::Two && b == Value::Ace)
    }

    /// Every one of the 1326 distinct pocket hands.
    pub fn all() -> Vec<Self> {
        let mut hands: Vec<Self> = StartingHand::all()
            .iter()
            .flat_map(|sh| sh.possible_hands())
            .collect();
        hands.sort();
        hands
    }
}

impl fmt::Display for PocketHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.low, self.high)
    }
}

impl FromStr for PocketHand {
    type Err = PokerError;

    /// Accepts `"Ts_Kh"`, `"Kh_Ts"`, `"KhTs"` or `"Kh Ts"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .collect();
        let hand = Hand::new_from_str(&compact)?;
        match hand.cards() {
            [a, b] => Self::new(*a, *b),
            [] | [_] => Err(PokerError::TooFewChars),
            _ => Err(PokerError::UnparsedCharsRemaining),
        }
    }
}

impl TryFrom<String> for PocketHand {
    type Error = PokerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PocketHand> for String {
    fn from(value: PocketHand) -> Self {
        value.to_string()
    }
}

/// Structural pocket hand categories that can be generated on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    /// Two cards of one suit.
    Suited,
    /// Two cards of one value.
    Pair,
    /// Adjacent values, any suits.
    Connected,
    /// Adjacent values of one suit.
    ConnectedSuited,
}

impl HandKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Suited => "suited",
            Self::Pair => "pairs",
            Self::Connected => "connected",
            Self::ConnectedSuited => "connected_suited",
        }
    }

    /// Does the pocket hand belong to this kind?
    pub fn matches(self, hand: &PocketHand) -> bool {
        match self {
            Self::Suited => hand.is_suited(),
            Self::Pair => hand.is_pair(),
            Self::Connected => hand.is_connected(),
            Self::ConnectedSuited => hand.is_connected() && hand.is_suited(),
        }
    }

    /// Shuffle a fresh deck and return the first two cards, in dealing
    /// order, that form a hand of this kind.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Result<PocketHand, PokerError> {
        let mut deck = FlatDeck::default();
        deck.shuffle(rng);
        let cards = deck.remaining();
        for (i, first) in cards.iter().enumerate() {
            for second in &cards[i + 1..] {
                let hand = PocketHand::new(*first, *second)?;
                if self.matches(&hand) {
                    return Ok(hand);
                }
            }
        }
        Err(PokerError::InsufficientDeck {
            requested: 2,
            remaining: cards.len(),
        })
    }
}

impl FromStr for HandKind {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suited" => Ok(Self::Suited),
            "pair" | "pairs" => Ok(Self::Pair),
            "connected" => Ok(Self::Connected),
            "connected_suited" | "suited_connected" => Ok(Self::ConnectedSuited),
            _ => Err(PokerError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for HandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generate a random pocket hand from a category label.
///
/// ```
/// use holdem_equity::holdem::generate;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let hand = generate("pairs", &mut rng).unwrap();
/// assert!(hand.is_pair());
/// assert!(generate("trips", &mut rng).is_err());
/// ```
pub fn generate<R: Rng + ?Sized>(label: &str, rng: &mut R) -> Result<PocketHand, PokerError> {
    label.parse::<HandKind>()?.generate(rng)
}
