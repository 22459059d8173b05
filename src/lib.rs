//! Texas Hold'em starting hand equity.
//!
//! The `core` module holds cards, decks and the seven card hand evaluator.
//! The `holdem` module builds on it with showdown resolution, the monte
//! carlo equity simulation, pocket hand classification and the parallel
//! full table sweep.
//!
//! ```
//! use holdem_equity::holdem::{MonteCarloGame, PocketHand};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let aces: PocketHand = "AsAh".parse().unwrap();
//! let mut game = MonteCarloGame::new(aces, 1, 0).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let result = game.estimate_equity(1_000, &mut rng).unwrap();
//! assert!(result.equity() > 70.0);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
