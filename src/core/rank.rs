use std::cmp::Ordering;
use std::fmt;

use super::{Card, CardBitSet, Hand, PokerError, Suit, Value};

/// The nine hand categories, weakest first.
///
/// A higher category always beats a lower one no matter what the kickers
/// are. The discriminant is the conventional 1 (high card) to 9 (straight
/// flush) numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    /// The lowest rank.
    /// No matches
    HighCard = 1,
    /// One Card matches another.
    OnePair = 2,
    /// Two diffent pair of matching cards.
    TwoPair = 3,
    /// Three of the same value.
    ThreeOfAKind = 4,
    /// Five cards in a sequence
    Straight = 5,
    /// Five cards of the same suit
    Flush = 6,
    /// Three of one value and two of another value
    FullHouse = 7,
    /// Four of the same value.
    FourOfAKind = 8,
    /// Five cards in a sequence all fo the same suit.
    StraightFlush = 9,
}

const CATEGORIES: [HandCategory; 9] = [
    HandCategory::HighCard,
    HandCategory::OnePair,
    HandCategory::TwoPair,
    HandCategory::ThreeOfAKind,
    HandCategory::Straight,
    HandCategory::Flush,
    HandCategory::FullHouse,
    HandCategory::FourOfAKind,
    HandCategory::StraightFlush,
];

impl HandCategory {
    /// Every category, weakest first.
    pub const fn categories() -> [Self; 9] {
        CATEGORIES
    }

    /// The 1 to 9 strength number.
    pub fn strength(self) -> u8 {
        self as u8
    }

    /// Name used when reporting which hand won a showdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::StraightFlush => "straight flush",
            Self::FourOfAKind => "four of a kind",
            Self::FullHouse => "full house",
            Self::Flush => "flush",
            Self::Straight => "straight",
            Self::ThreeOfAKind => "three of a kind",
            Self::TwoPair => "two pairs",
            Self::OnePair => "pair",
            Self::HighCard => "high cards",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The values that separate two hands of the same category, most
/// significant first. Only ever compared against a key of the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreakKey {
    StraightFlush { high: Value },
    FourOfAKind { quads: Value, kicker: Value },
    FullHouse { trips: Value, pair: Value },
    Flush { values: [Value; 5] },
    Straight { high: Value },
    ThreeOfAKind { trips: Value, kickers: [Value; 2] },
    TwoPair { high: Value, low: Value, kicker: Value },
    OnePair { pair: Value, kickers: [Value; 3] },
    HighCard { values: [Value; 5] },
}

impl TieBreakKey {
    /// The category this key belongs to.
    pub fn category(&self) -> HandCategory {
        match self {
            Self::StraightFlush { .. } => HandCategory::StraightFlush,
            Self::FourOfAKind { .. } => HandCategory::FourOfAKind,
            Self::FullHouse { .. } => HandCategory::FullHouse,
            Self::Flush { .. } => HandCategory::Flush,
            Self::Straight { .. } => HandCategory::Straight,
            Self::ThreeOfAKind { .. } => HandCategory::ThreeOfAKind,
            Self::TwoPair { .. } => HandCategory::TwoPair,
            Self::OnePair { .. } => HandCategory::OnePair,
            Self::HighCard { .. } => HandCategory::HighCard,
        }
    }
}

/// The strength of a set of cards: a category plus the key used to
/// order hands within that category.
///
/// `Rank` implements `Ord`, comparing categories first and falling through
/// to [`break_tie`] when they match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rank {
    category: HandCategory,
    key: TieBreakKey,
}

impl Rank {
    fn new(key: TieBreakKey) -> Self {
        Self {
            category: key.category(),
            key,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn key(&self) -> &TieBreakKey {
        &self.key
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| break_tie(self, other))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order two ranks that share a category.
///
/// `Greater` means `a` wins, `Less` means `b` wins and `Equal` is a split.
/// This is a single dispatch on the stored keys, the category is never
/// recomputed from cards. Callers are expected to check the category first;
/// given keys from different categories the categories are compared instead.
pub fn break_tie(a: &Rank, b: &Rank) -> Ordering {
    use TieBreakKey::*;
    match (&a.key, &b.key) {
        (StraightFlush { high: x }, StraightFlush { high: y })
        | (Straight { high: x }, Straight { high: y }) => x.cmp(y),
        (
            FourOfAKind {
                quads: qa,
                kicker: ka,
            },
            FourOfAKind {
                quads: qb,
                kicker: kb,
            },
        ) => qa.cmp(qb).then(ka.cmp(kb)),
        (FullHouse { trips: ta, pair: pa }, FullHouse { trips: tb, pair: pb }) => {
            ta.cmp(tb).then(pa.cmp(pb))
        }
        (Flush { values: va }, Flush { values: vb })
        | (HighCard { values: va }, HighCard { values: vb }) => va.cmp(vb),
        (
            ThreeOfAKind {
                trips: ta,
                kickers: ka,
            },
            ThreeOfAKind {
                trips: tb,
                kickers: kb,
            },
        ) => ta.cmp(tb).then(ka.cmp(kb)),
        (
            TwoPair {
                high: ha,
                low: la,
                kicker: ka,
            },
            TwoPair {
                high: hb,
                low: lb,
                kicker: kb,
            },
        ) => ha.cmp(hb).then(la.cmp(lb)).then(ka.cmp(kb)),
        (
            OnePair {
                pair: pa,
                kickers: ka,
            },
            OnePair {
                pair: pb,
                kickers: kb,
            },
        ) => pa.cmp(pb).then(ka.cmp(kb)),
        _ => a.category.cmp(&b.category),
    }
}

const fn value_bit(v: Value) -> u16 {
    1 << (v as u16)
}

const fn run_to(top: Value) -> u16 {
    0b1_1111 << (top as u16 - 4)
}

/// Every straight as a value bitmask, paired with its top card. Highest
/// first so the first match is the best straight.
const STRAIGHTS: [(Value, u16); 10] = [
    (Value::Ace, run_to(Value::Ace)),
    (Value::King, run_to(Value::King)),
    (Value::Queen, run_to(Value::Queen)),
    (Value::Jack, run_to(Value::Jack)),
    (Value::Ten, run_to(Value::Ten)),
    (Value::Nine, run_to(Value::Nine)),
    (Value::Eight, run_to(Value::Eight)),
    (Value::Seven, run_to(Value::Seven)),
    (Value::Six, run_to(Value::Six)),
    // Wheel. The ace plays low so the five is the top card.
    (
        Value::Five,
        value_bit(Value::Ace)
            | value_bit(Value::Two)
            | value_bit(Value::Three)
            | value_bit(Value::Four)
            | value_bit(Value::Five),
    ),
];

/// Top card of the best straight inside a set of values.
fn straight_high(value_set: u16) -> Option<Value> {
    STRAIGHTS
        .iter()
        .find(|(_, mask)| value_set & mask == *mask)
        .map(|(high, _)| *high)
}

/// The `N` highest values in a set, highest first.
fn top_values<const N: usize>(mut value_set: u16) -> Option<[Value; N]> {
    let mut out = [Value::Two; N];
    for slot in out.iter_mut() {
        if value_set == 0 {
            return None;
        }
        let idx = 15 - value_set.leading_zeros();
        *slot = Value::from_u8(idx as u8);
        value_set &= !(1 << idx);
    }
    Some(out)
}

/// Per value and per suit tallies for a set of cards.
struct Counts {
    values: [u8; 13],
    value_set: u16,
    suits: [u8; 4],
    suit_value_sets: [u16; 4],
}

impl Counts {
    fn new(cards: &[Card]) -> Self {
        let mut counts = Self {
            values: [0; 13],
            value_set: 0,
            suits: [0; 4],
            suit_value_sets: [0; 4],
        };
        for c in cards {
            let v = c.value as usize;
            let s = c.suit as usize;
            counts.values[v] += 1;
            counts.value_set |= value_bit(c.value);
            counts.suits[s] += 1;
            counts.suit_value_sets[s] |= value_bit(c.value);
        }
        counts
    }

    /// The suit holding the most cards, if it holds at least five. Equal
    /// counts go to the highest suit.
    fn flush_suit(&self) -> Option<Suit> {
        Suit::suits()
            .into_iter()
            .max_by_key(|s| (self.suits[*s as usize], *s))
            .filter(|s| self.suits[*s as usize] >= 5)
    }

    /// Every value seen at least `n` times as a bitmask.
    fn values_with_at_least(&self, n: u8) -> u16 {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, count)| **count >= n)
            .fold(0, |set, (v, _)| set | (1 << v))
    }
}

/// Classify at least five pairwise distinct cards into their best
/// category and tie break key.
///
/// Categories are checked from straight flush downwards and the first one
/// that matches wins.
///
/// ```
/// use holdem_equity::core::{Hand, HandCategory, classify};
///
/// let hand = Hand::new_from_str("Ad2c3s4h5s9d9c").unwrap();
/// let rank = classify(hand.cards()).unwrap();
/// assert_eq!(HandCategory::Straight, rank.category());
/// ```
pub fn classify(cards: &[Card]) -> Result<Rank, PokerError> {
    if cards.len() < 5 {
        return Err(PokerError::InvalidHand);
    }
    CardBitSet::from_distinct(cards).ok_or(PokerError::InvalidHand)?;

    let counts = Counts::new(cards);
    let flush_suit = counts.flush_suit();

    let straight_flush =
        flush_suit.and_then(|s| straight_high(counts.suit_value_sets[s as usize]));
    if let Some(high) = straight_flush {
        return Ok(Rank::new(TieBreakKey::StraightFlush { high }));
    }

    let quads = counts.values_with_at_least(4);
    if let Some([quads]) = top_values::<1>(quads) {
        let [kicker] = top_values::<1>(counts.value_set & !value_bit(quads))
            .ok_or(PokerError::InvalidHand)?;
        return Ok(Rank::new(TieBreakKey::FourOfAKind { quads, kicker }));
    }

    let trips_set = counts.values_with_at_least(3);
    let pairs_set = counts.values_with_at_least(2);
    let trips = top_values::<1>(trips_set).map(|[t]| t);

    if let Some(trips) = trips {
        // A second set of trips plays as the pair.
        if let Some([pair]) = top_values::<1>(pairs_set & !value_bit(trips)) {
            return Ok(Rank::new(TieBreakKey::FullHouse { trips, pair }));
        }
    }

    if let Some(suit) = flush_suit {
        let values = top_values::<5>(counts.suit_value_sets[suit as usize])
            .ok_or(PokerError::InvalidHand)?;
        return Ok(Rank::new(TieBreakKey::Flush { values }));
    }

    if let Some(high) = straight_high(counts.value_set) {
        return Ok(Rank::new(TieBreakKey::Straight { high }));
    }

    if let Some(trips) = trips {
        let kickers = top_values::<2>(counts.value_set & !value_bit(trips))
            .ok_or(PokerError::InvalidHand)?;
        return Ok(Rank::new(TieBreakKey::ThreeOfAKind { trips, kickers }));
    }

    if let Some([high, low]) = top_values::<2>(pairs_set) {
        // With three pairs the lowest one is just another kicker.
        let [kicker] = top_values::<1>(counts.value_set & !value_bit(high) & !value_bit(low))
            .ok_or(PokerError::InvalidHand)?;
        return Ok(Rank::new(TieBreakKey::TwoPair { high, low, kicker }));
    }

    if let Some([pair]) = top_values::<1>(pairs_set) {
        let kickers = top_values::<3>(counts.value_set & !value_bit(pair))
            .ok_or(PokerError::InvalidHand)?;
        return Ok(Rank::new(TieBreakKey::OnePair { pair, kickers }));
    }

    let values = top_values::<5>(counts.value_set).ok_or(PokerError::InvalidHand)?;
    Ok(Rank::new(TieBreakKey::HighCard { values }))
}

/// Can this turn into a hand rank?
pub trait Rankable {
    /// Rank the best five card hand. It doesn't do any caching so it's left
    /// up to the user to understand that duplicate work will be done if
    /// this is called more than once.
    fn rank(&self) -> Result<Rank, PokerError>;
}

impl Rankable for [Card] {
    fn rank(&self) -> Result<Rank, PokerError> {
        classify(self)
    }
}

impl Rankable for Hand {
    fn rank(&self) -> Result<Rank, PokerError> {
        classify(self.cards())
    }
}
