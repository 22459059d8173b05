use std::cmp::Ordering;

use crate::core::{Card, CardBitSet, HandCategory, PokerError, Rank, break_tie, classify};

/// How the hero fared at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Rank two hole cards together with a five card board.
fn showdown_rank(hole: &[Card], board: &[Card]) -> Result<Rank, PokerError> {
    let ([a, b], [c, d, e, f, g]) = (hole, board) else {
        return Err(PokerError::InvalidHand);
    };
    classify(&[*a, *b, *c, *d, *e, *f, *g])
}

/// Category first, then the tie break for that category.
fn compare(a: &Rank, b: &Rank) -> Ordering {
    a.category()
        .cmp(&b.category())
        .then_with(|| break_tie(a, b))
}

/// No card may appear twice across every hand and the board.
fn check_distinct<H: AsRef<[Card]>>(hands: &[H], board: &[Card]) -> Result<(), PokerError> {
    let mut seen = CardBitSet::new();
    for card in hands.iter().flat_map(|h| h.as_ref()).chain(board) {
        if !seen.insert(*card) {
            return Err(PokerError::InvalidHand);
        }
    }
    Ok(())
}

/// The best rank among a set of hole cards sharing a board.
fn best_rank<H: AsRef<[Card]>>(hands: &[H], board: &[Card]) -> Result<Rank, PokerError> {
    let mut best: Option<Rank> = None;
    for hand in hands {
        let rank = showdown_rank(hand.as_ref(), board)?;
        best = match best {
            Some(current) if compare(&rank, &current) != Ordering::Greater => Some(current),
            _ => Some(rank),
        };
    }
    best.ok_or(PokerError::EmptyOpponentPool)
}

/// Decide whether the hero wins, ties, or loses against a pool of
/// opponents on a complete board.
///
/// Each opponent's hole cards are combined with the board and the best of
/// them is kept. The hero only ties when matching that best hand exactly.
///
/// ```
/// use holdem_equity::core::Hand;
/// use holdem_equity::holdem::{Outcome, resolve};
///
/// let board = Hand::new_from_str("2s2h2d9c9s").unwrap();
/// let hero = Hand::new_from_str("9h9d").unwrap();
/// let villain = Hand::new_from_str("AcAs").unwrap();
///
/// let outcome = resolve(hero.cards(), &[villain], board.cards()).unwrap();
/// assert_eq!(Outcome::Win, outcome);
/// ```
pub fn resolve<H: AsRef<[Card]>>(
    hero: &[Card],
    opponents: &[H],
    board: &[Card],
) -> Result<Outcome, PokerError> {
    if opponents.is_empty() {
        return Err(PokerError::EmptyOpponentPool);
    }
    check_distinct(opponents, board)?;
    if opponents
        .iter()
        .flat_map(|h| h.as_ref())
        .chain(board)
        .any(|c| hero.contains(c))
    {
        return Err(PokerError::InvalidHand);
    }

    let best = best_rank(opponents, board)?;
    let hero = showdown_rank(hero, board)?;
    Ok(match compare(&hero, &best) {
        Ordering::Greater => Outcome::Win,
        Ordering::Equal => Outcome::Tie,
        Ordering::Less => Outcome::Loss,
    })
}

/// The category of the best hand at the table.
///
/// ```
/// use holdem_equity::core::{Hand, HandCategory};
/// use holdem_equity::holdem::best_category;
///
/// let board = Hand::new_from_str("2s3s4s9d9c").unwrap();
/// let hands = vec![
///     Hand::new_from_str("5s6s").unwrap(),
///     Hand::new_from_str("9h9s").unwrap(),
/// ];
/// assert_eq!(
///     HandCategory::StraightFlush,
///     best_category(&hands, board.cards()).unwrap()
/// );
/// ```
pub fn best_category<H: AsRef<[Card]>>(
    hands: &[H],
    board: &[Card],
) -> Result<HandCategory, PokerError> {
    check_distinct(hands, board)?;
    Ok(best_rank(hands, board)?.category())
}
