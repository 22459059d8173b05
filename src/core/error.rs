use thiserror::Error;

use super::Card;

/// This is the core error type for the library. It uses `thiserror` to
/// provide readable error messages.
///
/// Every variant is recoverable. A sweep that hits one of these for a single
/// hand records it and keeps going.
#[derive(Error, Debug)]
pub enum PokerError {
    #[error("A hand needs at least five distinct cards to be ranked")]
    InvalidHand,
    #[error("Unknown hand category {0:?}")]
    UnknownCategory(String),
    #[error("A showdown needs at least one opponent")]
    EmptyOpponentPool,
    #[error("Requested {requested} cards but only {remaining} remain in the deck")]
    InsufficientDeck { requested: usize, remaining: usize },
    #[error("The simulation was cancelled")]
    Cancelled,
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card already added to hand {0}")]
    DuplicateCardInHand(Card),
    #[error("Malformed equity table row: {0}")]
    InvalidTableRow(String),
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Equity table io failed")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("Equity table serialization failed")]
    Json(#[from] serde_json::Error),
}
